use serde_json::{Value, json};
use tracing::info;

/// Configuration for fixture clinic documents
#[derive(Debug, Clone)]
pub struct TestDataConfig {
    /// Number of documents to return (capped at the size of the fixture set)
    pub clinic_rows: usize,
    /// Whether to include the documents with messy address data
    pub include_messy_addresses: bool,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self::sample()
    }
}

impl TestDataConfig {
    /// Minimal data for unit tests
    pub fn minimal() -> Self {
        Self {
            clinic_rows: 3,
            include_messy_addresses: false,
        }
    }

    /// Every fixture document, including the awkward ones
    pub fn sample() -> Self {
        Self {
            clinic_rows: usize::MAX,
            include_messy_addresses: true,
        }
    }
}

/// Clinic documents shaped like the records the document store returns.
///
/// Coordinates are GeoJSON `[longitude, latitude]`.
pub fn clinic_documents(config: &TestDataConfig) -> Vec<Value> {
    info!("Creating fixture clinic documents with config: {:?}", config);

    let mut docs = well_formed_documents();
    if config.include_messy_addresses {
        docs.extend(messy_documents());
    }
    docs.truncate(config.clinic_rows);
    docs
}

fn well_formed_documents() -> Vec<Value> {
    vec![
        json!({
            "_id": "c-001",
            "name": "Max Hospital",
            "address": "Press Enclave Road, Saket, Delhi",
            "city": "Delhi",
            "phone": "+91-11-2651-5050",
            "specialities": ["Cardiology", "Orthopedics", "Neurology"],
            "rating": 4.5,
            "isEmergency": true,
            "opening_hours": { "open": "00:00", "close": "23:59" },
            "location": { "type": "Point", "coordinates": [77.2090, 28.6139] },
            "doctors": [
                { "name": "Dr. Anil Kumar", "specialization": "Cardiology", "experience": 18, "consultation_fee": 1200, "availability": ["Mon", "Wed", "Fri"] },
                { "name": "Dr. Meera Shah", "specialization": "Orthopedics", "experience": 11, "consultation_fee": 900, "availability": ["Tue", "Thu"] },
                { "name": "Dr. Ravi Verma", "specialization": "Interventional Cardiology", "experience": 7, "consultation_fee": 1500, "availability": ["Sat"] }
            ]
        }),
        json!({
            "_id": "c-002",
            "name": "Kokilaben Hospital",
            "address": "Rao Saheb Achutrao Patwardhan Marg, Andheri West, Mumbai",
            "city": "Mumbai",
            "phone": "+91-22-4269-6969",
            "specialities": ["Cardiology", "Oncology"],
            "rating": 4.6,
            "isEmergency": true,
            "location": { "type": "Point", "coordinates": [72.8777, 19.0760] }
        }),
        json!({
            "_id": "c-003",
            "name": "Fortis Memorial Research Institute",
            "address": "Sector 44, Gurugram, Haryana",
            "city": "Gurgaon",
            "phone": "+91-124-496-2200",
            "specialities": ["Neurology"],
            "rating": 4.4,
            "opening_hours": { "open": "08:00", "close": "20:00" },
            "location": { "type": "Point", "coordinates": [77.0720, 28.4420] }
        }),
        json!({
            "_id": "c-004",
            "name": "Apollo Clinic Indiranagar",
            "address": "100 Feet Road, Indiranagar, Bengaluru, Karnataka",
            "city": "Bangalore",
            "phone": "+91-80-2520-0000",
            "specialities": ["Dermatology"],
            "rating": 4.1,
            "opening_hours": { "open": "09:00", "close": "21:00" },
            "location": { "type": "Point", "coordinates": [77.6408, 12.9784] }
        }),
        json!({
            "_id": "c-005",
            "name": "Sir Ganga Ram Hospital",
            "address": "Rajinder Nagar, New Delhi",
            "city": "New Delhi",
            "phone": "+91-11-2575-0000",
            "specialities": ["Orthopedics", "Pediatrics"],
            "rating": 4.3,
            "location": { "type": "Point", "coordinates": [77.1895, 28.6385] }
        }),
    ]
}

fn messy_documents() -> Vec<Value> {
    vec![
        // No city field, city only recoverable from the address text.
        json!({
            "_id": "c-101",
            "name": "Saket City Clinic",
            "address": "Press Enclave Road, Saket, Delhi",
            "phone": "+91-11-4000-1111",
            "specialities": ["General Medicine"]
        }),
        // Unknown town, falls back to the comma heuristic.
        json!({
            "_id": "c-102",
            "name": "Lakeview Family Practice",
            "address": "12 Lake Road, Ranikhet, Uttarakhand",
            "phone": "+91-5966-220000",
            "specialities": []
        }),
        // Structured address object.
        json!({
            "_id": "c-103",
            "name": "Sunrise Eye Care",
            "address": { "street": "MG Road", "area": "Camp", "city": "Pune", "state": "Maharashtra" },
            "phone": "+91-20-2612-0000",
            "specialities": ["Ophthalmology"],
            "location": { "type": "Point", "coordinates": [73.8567, 18.5204] }
        }),
        // Nothing to go on.
        json!({
            "_id": "c-104",
            "name": "Mobile Health Van",
            "specialities": ["General Medicine", "Pediatrics"]
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_truncates() {
        let docs = clinic_documents(&TestDataConfig::minimal());
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_sample_includes_messy_documents() {
        let docs = clinic_documents(&TestDataConfig::sample());
        assert!(docs.iter().any(|d| d["_id"] == "c-104"));
        assert!(docs.iter().all(|d| d.get("name").is_some()));
    }
}
