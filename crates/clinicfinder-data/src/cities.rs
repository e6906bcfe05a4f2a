use serde::Serialize;

/// A canonical city with a single representative coordinate.
///
/// `key` is the lower-case comparison key; `display_name` is what callers
/// show to users.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityReference {
    pub key: &'static str,
    pub display_name: &'static str,
    pub longitude: f64,
    pub latitude: f64,
}

impl CityReference {
    const fn new(
        key: &'static str,
        display_name: &'static str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            key,
            display_name,
            longitude,
            latitude,
        }
    }

    /// Returns `(longitude, latitude)`, the GeoJSON ordering used by clinic documents.
    #[must_use]
    pub const fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

/// Canonical cities, one entry per place.
pub static CITIES: &[CityReference] = &[
    CityReference::new("delhi", "Delhi", 28.6139, 77.2090),
    CityReference::new("mumbai", "Mumbai", 19.0760, 72.8777),
    CityReference::new("navi mumbai", "Navi Mumbai", 19.0330, 73.0297),
    CityReference::new("thane", "Thane", 19.2183, 72.9781),
    CityReference::new("bangalore", "Bangalore", 12.9716, 77.5946),
    CityReference::new("chennai", "Chennai", 13.0827, 80.2707),
    CityReference::new("kolkata", "Kolkata", 22.5726, 88.3639),
    CityReference::new("hyderabad", "Hyderabad", 17.3850, 78.4867),
    CityReference::new("pune", "Pune", 18.5204, 73.8567),
    CityReference::new("ahmedabad", "Ahmedabad", 23.0225, 72.5714),
    CityReference::new("jaipur", "Jaipur", 26.9124, 75.7873),
    CityReference::new("lucknow", "Lucknow", 26.8467, 80.9462),
    CityReference::new("gurgaon", "Gurgaon", 28.4595, 77.0266),
    CityReference::new("noida", "Noida", 28.5355, 77.3910),
    CityReference::new("ghaziabad", "Ghaziabad", 28.6692, 77.4538),
    CityReference::new("faridabad", "Faridabad", 28.4089, 77.3178),
    CityReference::new("chandigarh", "Chandigarh", 30.7333, 76.7794),
    CityReference::new("dehradun", "Dehradun", 30.3165, 78.0322),
    CityReference::new("kochi", "Kochi", 9.9312, 76.2673),
    CityReference::new(
        "thiruvananthapuram",
        "Thiruvananthapuram",
        8.5241,
        76.9366,
    ),
    CityReference::new("coimbatore", "Coimbatore", 11.0168, 76.9558),
    CityReference::new("mysore", "Mysore", 12.2958, 76.6394),
    CityReference::new("mangalore", "Mangalore", 12.9141, 74.8560),
    CityReference::new("visakhapatnam", "Visakhapatnam", 17.6868, 83.2185),
    CityReference::new("indore", "Indore", 22.7196, 75.8577),
    CityReference::new("bhopal", "Bhopal", 23.2599, 77.4126),
    CityReference::new("nagpur", "Nagpur", 21.1458, 79.0882),
    CityReference::new("surat", "Surat", 21.1702, 72.8311),
    CityReference::new("vadodara", "Vadodara", 22.3072, 73.1812),
    CityReference::new("patna", "Patna", 25.5941, 85.1376),
    CityReference::new("varanasi", "Varanasi", 25.3176, 82.9739),
    CityReference::new("bhubaneswar", "Bhubaneswar", 20.2961, 85.8245),
    CityReference::new("guwahati", "Guwahati", 26.1445, 91.7362),
];

/// Spelling variants, historical names and abbreviations, mapped to a canonical key.
///
/// Union of every alias list the clinic routes have used over time. Keys must be
/// lower-case and trimmed.
pub static ALIASES: &[(&str, &str)] = &[
    ("new delhi", "delhi"),
    ("delhi ncr", "delhi"),
    ("nct of delhi", "delhi"),
    ("dilli", "delhi"),
    ("bombay", "mumbai"),
    ("mumbay", "mumbai"),
    ("new bombay", "navi mumbai"),
    ("bengaluru", "bangalore"),
    ("banglore", "bangalore"),
    ("blr", "bangalore"),
    ("madras", "chennai"),
    ("chenai", "chennai"),
    ("calcutta", "kolkata"),
    ("kolkatta", "kolkata"),
    ("secunderabad", "hyderabad"),
    ("hydrabad", "hyderabad"),
    ("cyberabad", "hyderabad"),
    ("poona", "pune"),
    ("amdavad", "ahmedabad"),
    ("gurugram", "gurgaon"),
    ("greater noida", "noida"),
    ("cochin", "kochi"),
    ("ernakulam", "kochi"),
    ("trivandrum", "thiruvananthapuram"),
    ("mysuru", "mysore"),
    ("mangaluru", "mangalore"),
    ("vizag", "visakhapatnam"),
    ("baroda", "vadodara"),
    ("banaras", "varanasi"),
    ("benares", "varanasi"),
    ("kashi", "varanasi"),
    ("bhubaneshwar", "bhubaneswar"),
    ("gauhati", "guwahati"),
];

/// Substrings searched for, in order, inside a lower-cased free-text address.
///
/// A pattern must appear before any shorter pattern it contains ("navi mumbai"
/// before "mumbai"), otherwise the shorter one would always win.
pub static ADDRESS_PATTERNS: &[(&str, &str)] = &[
    ("navi mumbai", "navi mumbai"),
    ("new bombay", "navi mumbai"),
    ("new delhi", "delhi"),
    ("delhi ncr", "delhi"),
    ("greater noida", "noida"),
    ("thiruvananthapuram", "thiruvananthapuram"),
    ("visakhapatnam", "visakhapatnam"),
    ("secunderabad", "hyderabad"),
    ("bhubaneswar", "bhubaneswar"),
    ("coimbatore", "coimbatore"),
    ("chandigarh", "chandigarh"),
    ("trivandrum", "thiruvananthapuram"),
    ("ahmedabad", "ahmedabad"),
    ("bengaluru", "bangalore"),
    ("bangalore", "bangalore"),
    ("hyderabad", "hyderabad"),
    ("faridabad", "faridabad"),
    ("ghaziabad", "ghaziabad"),
    ("mangalore", "mangalore"),
    ("mangaluru", "mangalore"),
    ("gurugram", "gurgaon"),
    ("dehradun", "dehradun"),
    ("varanasi", "varanasi"),
    ("guwahati", "guwahati"),
    ("vadodara", "vadodara"),
    ("calcutta", "kolkata"),
    ("kolkata", "kolkata"),
    ("chennai", "chennai"),
    ("gurgaon", "gurgaon"),
    ("lucknow", "lucknow"),
    ("mysuru", "mysore"),
    ("mysore", "mysore"),
    ("madras", "chennai"),
    ("bombay", "mumbai"),
    ("mumbai", "mumbai"),
    ("jaipur", "jaipur"),
    ("indore", "indore"),
    ("bhopal", "bhopal"),
    ("nagpur", "nagpur"),
    ("cochin", "kochi"),
    ("baroda", "vadodara"),
    ("delhi", "delhi"),
    ("noida", "noida"),
    ("kochi", "kochi"),
    ("thane", "thane"),
    ("surat", "surat"),
    ("patna", "patna"),
    ("vizag", "visakhapatnam"),
    ("pune", "pune"),
];
