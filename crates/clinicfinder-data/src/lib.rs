//! Static reference data for the `clinicfinder` library.
//!
//! This crate ships the canonical city table, the many-to-one alias table used to
//! normalise spelling variants ("bombay", "gurugram", "bengaluru", ...) and the
//! ordered list of substrings used to spot a city inside free-text addresses.
//! All tables are constants compiled into the binary and indexed lazily on first
//! use; nothing here is mutated after load.

use once_cell::sync::Lazy;
use tracing::debug;

mod cities;
pub mod test_data;

pub use cities::{ADDRESS_PATTERNS, ALIASES, CITIES, CityReference};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, PartialEq)]
    pub enum DataError {
        #[error("City '{key}' has coordinates out of range (lon {longitude}, lat {latitude})")]
        InvalidCityCoordinates {
            key: &'static str,
            longitude: f64,
            latitude: f64,
        },
        #[error("Duplicate canonical city key '{0}'")]
        DuplicateCityKey(&'static str),
        #[error("Alias '{alias}' points at unknown city '{key}'")]
        UnknownAliasTarget {
            alias: &'static str,
            key: &'static str,
        },
        #[error("Alias '{0}' must be lower-case and trimmed")]
        AliasNotNormalised(&'static str),
        #[error("Address pattern '{0}' is shadowed by the shorter pattern '{1}'")]
        ShadowedAddressPattern(&'static str, &'static str),
    }

    pub type Result<T> = std::result::Result<T, DataError>;
}

pub use error::{DataError, Result};

/// Alias (lower-case) to canonical city, built once from [`ALIASES`].
///
/// Every canonical key is also registered as an alias of itself.
pub static ALIAS_INDEX: Lazy<ahash::AHashMap<&'static str, &'static CityReference>> =
    Lazy::new(|| {
        let mut index = ahash::AHashMap::with_capacity(ALIASES.len() + CITIES.len());
        for city in CITIES {
            index.insert(city.key, city);
        }
        for &(alias, key) in ALIASES {
            if let Some(city) = city_by_key(key) {
                index.insert(alias, city);
            }
        }
        debug!(entries = index.len(), "Built city alias index");
        index
    });

/// Look up a canonical city by its canonical key (not by alias).
#[must_use]
pub fn city_by_key(key: &str) -> Option<&'static CityReference> {
    CITIES.iter().find(|city| city.key == key)
}

/// Check the static tables for internal consistency.
///
/// The tables are constants so this can only fail after a bad edit; it is run
/// by the test-suite and once when a searcher is constructed.
pub fn validate_tables() -> Result<()> {
    let mut seen = ahash::AHashSet::with_capacity(CITIES.len());
    for city in CITIES {
        if !(-180.0..=180.0).contains(&city.longitude) || !(-90.0..=90.0).contains(&city.latitude)
        {
            return Err(DataError::InvalidCityCoordinates {
                key: city.key,
                longitude: city.longitude,
                latitude: city.latitude,
            });
        }
        if !seen.insert(city.key) {
            return Err(DataError::DuplicateCityKey(city.key));
        }
    }

    for &(alias, key) in ALIASES {
        if alias.trim() != alias || alias.to_lowercase() != alias {
            return Err(DataError::AliasNotNormalised(alias));
        }
        if city_by_key(key).is_none() {
            return Err(DataError::UnknownAliasTarget { alias, key });
        }
    }

    // A pattern containing an earlier, shorter pattern can never match.
    for (idx, &(pattern, key)) in ADDRESS_PATTERNS.iter().enumerate() {
        if city_by_key(key).is_none() {
            return Err(DataError::UnknownAliasTarget {
                alias: pattern,
                key,
            });
        }
        if let Some(&(earlier, _)) = ADDRESS_PATTERNS[..idx]
            .iter()
            .find(|(earlier, _)| pattern.contains(earlier))
        {
            return Err(DataError::ShadowedAddressPattern(pattern, earlier));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_consistent() {
        assert_eq!(validate_tables(), Ok(()));
    }

    #[test]
    fn test_alias_index_contains_canonical_keys() {
        for city in CITIES {
            let found = ALIAS_INDEX.get(city.key).expect("canonical key indexed");
            assert_eq!(found.key, city.key);
        }
    }

    #[test]
    fn test_aliases_are_many_to_one() {
        let gurgaon = ALIAS_INDEX.get("gurgaon").unwrap();
        let gurugram = ALIAS_INDEX.get("gurugram").unwrap();
        assert!(std::ptr::eq(*gurgaon, *gurugram));

        let bombay = ALIAS_INDEX.get("bombay").unwrap();
        assert_eq!(bombay.key, "mumbai");
        assert_eq!(ALIAS_INDEX.get("bengaluru").unwrap().key, "bangalore");
    }

    #[test]
    fn test_more_specific_patterns_come_first() {
        let new_delhi = ADDRESS_PATTERNS
            .iter()
            .position(|(p, _)| *p == "new delhi")
            .unwrap();
        let delhi = ADDRESS_PATTERNS
            .iter()
            .position(|(p, _)| *p == "delhi")
            .unwrap();
        assert!(new_delhi < delhi);
    }

    #[test]
    fn test_city_by_key() {
        assert_eq!(
            city_by_key("chennai").map(|c| c.display_name),
            Some("Chennai")
        );
        assert!(city_by_key("madras").is_none(), "aliases are not keys");
    }
}
