//! City name resolution.
//!
//! Turns dirty location input into a canonical city: alias lookup for explicit
//! city names, and a best-effort extraction for records that only carry an
//! address.

use clinicfinder_data::{ADDRESS_PATTERNS, ALIAS_INDEX, CityReference, city_by_key};
use once_cell::sync::Lazy;
use rapidfuzz::distance::levenshtein;
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::record::{Address, LocatableRecord};

/// Returned by [`extract_city_from_record`] when nothing usable is found.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Minimum normalised similarity for [`suggest_city`] to offer a match.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lower-case, trim and collapse inner whitespace runs to a single space.
#[must_use]
pub fn normalize_city_name(name: &str) -> String {
    WHITESPACE
        .replace_all(name.trim(), " ")
        .to_lowercase()
}

/// Resolve a free-form city name to its canonical reference.
///
/// Lookup is case-insensitive and covers aliases, so `"Bombay"` and `"mumbai"`
/// resolve to the same entry. `None` means the city is not in the table; the
/// caller decides whether that is an error.
#[instrument(level = "trace")]
#[must_use]
pub fn resolve_city_coordinates(city_name: &str) -> Option<&'static CityReference> {
    let key = normalize_city_name(city_name);
    if key.is_empty() {
        return None;
    }
    let found = ALIAS_INDEX.get(key.as_str()).copied();
    trace!(key = %key, found = ?found.map(|c| c.key), "City lookup");
    found
}

/// Closest known city by edit-distance similarity, for "did you mean" replies.
///
/// Never consulted by [`resolve_city_coordinates`]; an exact alias hit is returned as-is.
#[instrument(level = "debug")]
#[must_use]
pub fn suggest_city(city_name: &str) -> Option<&'static CityReference> {
    let key = normalize_city_name(city_name);
    if key.is_empty() {
        return None;
    }
    if let Some(exact) = ALIAS_INDEX.get(key.as_str()) {
        return Some(*exact);
    }

    let mut candidates = ALIAS_INDEX
        .iter()
        .map(|(alias, city)| {
            let score = levenshtein::normalized_similarity(key.chars(), alias.chars());
            (score, *alias, *city)
        })
        .filter(|(score, _, _)| *score >= SUGGESTION_THRESHOLD)
        .collect::<Vec<_>>();
    // Alias breaks ties so the answer does not depend on hash order.
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    let best = candidates.first().map(|(_, _, city)| *city);
    debug!(input = city_name, suggestion = ?best.map(|c| c.key), "City suggestion");
    best
}

/// Best-guess city label for a record. Never fails.
///
/// Priority:
/// 1. the record's own `city` field, trimmed, case preserved;
/// 2. the first known city pattern found in a free-text address;
/// 3. the second-to-last comma separated address segment;
/// 4. the `city` of a structured address;
/// 5. [`UNKNOWN_CITY`].
///
/// Step 3 assumes `street, area, city, state` ordering. It is a low-confidence
/// fallback and will pick the wrong segment for other conventions.
#[must_use]
pub fn extract_city_from_record(record: &LocatableRecord) -> String {
    if let Some(city) = record
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        return city.to_string();
    }

    match &record.address {
        Some(Address::Text(text)) => {
            if let Some(city) = city_from_address_text(text) {
                return city.display_name.to_string();
            }
            if let Some(segment) = second_to_last_segment(text) {
                trace!(id = %record.id, segment, "City from address segment heuristic");
                return segment.to_string();
            }
        }
        Some(Address::Structured(parts)) => {
            if let Some(city) = parts
                .city
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
            {
                return city.to_string();
            }
        }
        None => {}
    }

    trace!(id = %record.id, "No city could be extracted");
    UNKNOWN_CITY.to_string()
}

/// Scan a free-text address for the first known city pattern.
#[must_use]
pub fn city_from_address_text(text: &str) -> Option<&'static CityReference> {
    let lowered = text.to_lowercase();
    ADDRESS_PATTERNS
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .and_then(|(_, key)| city_by_key(key))
}

fn second_to_last_segment(text: &str) -> Option<&str> {
    let parts = text.split(',').collect::<Vec<_>>();
    if parts.len() < 2 {
        return None;
    }
    Some(parts[parts.len() - 2].trim()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StructuredAddress;

    #[test]
    fn test_resolve_is_case_insensitive_and_alias_aware() {
        let gurgaon = resolve_city_coordinates("Gurgaon").unwrap();
        let gurugram = resolve_city_coordinates("GURUGRAM").unwrap();
        assert_eq!(gurgaon, gurugram);

        assert_eq!(
            resolve_city_coordinates("bombay"),
            resolve_city_coordinates("mumbai")
        );
        assert_eq!(resolve_city_coordinates("  Bengaluru ").unwrap().key, "bangalore");
        assert_eq!(resolve_city_coordinates("New   Delhi").unwrap().key, "delhi");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = resolve_city_coordinates("Calcutta").unwrap();
        let again = resolve_city_coordinates(first.display_name).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        assert!(resolve_city_coordinates("Atlantis").is_none());
        assert!(resolve_city_coordinates("   ").is_none());
    }

    #[test]
    fn test_suggest_city() {
        assert_eq!(suggest_city("Hyderbad").unwrap().key, "hyderabad");
        assert_eq!(suggest_city("mumbai").unwrap().key, "mumbai");
        assert!(suggest_city("Reykjavik").is_none());
        // Suggestions never leak into exact resolution.
        assert!(resolve_city_coordinates("Hyderbad").is_none());
    }

    #[test]
    fn test_direct_city_wins_over_address() {
        let record = LocatableRecord::new("1", "A")
            .with_city(" delhi NCR ")
            .with_address_text("Linking Road, Bandra, Mumbai");
        assert_eq!(extract_city_from_record(&record), "delhi NCR");
    }

    #[test]
    fn test_address_pattern_match() {
        let record =
            LocatableRecord::new("1", "A").with_address_text("Press Enclave Road, Saket, Delhi");
        assert_eq!(extract_city_from_record(&record), "Delhi");

        let record = LocatableRecord::new("2", "B").with_address_text("Sector 62, NOIDA");
        assert_eq!(extract_city_from_record(&record), "Noida");
    }

    #[test]
    fn test_more_specific_pattern_wins() {
        let record =
            LocatableRecord::new("1", "A").with_address_text("Sector 17, Vashi, Navi Mumbai");
        assert_eq!(extract_city_from_record(&record), "Navi Mumbai");

        let record = LocatableRecord::new("2", "B").with_address_text("Karol Bagh, New Delhi");
        assert_eq!(extract_city_from_record(&record), "Delhi");
    }

    #[test]
    fn test_comma_heuristic() {
        let record =
            LocatableRecord::new("1", "A").with_address_text("12 Lake Road, Ranikhet, Uttarakhand");
        assert_eq!(extract_city_from_record(&record), "Ranikhet");

        let record = LocatableRecord::new("2", "B").with_address_text("Somewhere without commas");
        assert_eq!(extract_city_from_record(&record), UNKNOWN_CITY);
    }

    #[test]
    fn test_structured_address_and_unknown() {
        let record = LocatableRecord::new("1", "A").with_address(Address::Structured(
            StructuredAddress {
                city: Some("Shimla".into()),
                ..StructuredAddress::default()
            },
        ));
        assert_eq!(extract_city_from_record(&record), "Shimla");

        let record = LocatableRecord::new("2", "B").with_city("   ");
        assert_eq!(extract_city_from_record(&record), UNKNOWN_CITY);
    }
}
