//! Clinicfinder - Clinic and Doctor Proximity Search
//!
//! Clinicfinder takes a batch of clinic records as they come out of a document
//! store, works out which city each one is in, and answers "what is near here"
//! queries: filter by city, speciality, radius and opening time, rank by
//! great-circle distance, and optionally group by speciality.
//!
//! # Quick Start
//!
//! ```rust
//! use clinicfinder::{ClinicSearcher, LocatableRecord, SearchQuery, geo::Coordinate};
//!
//! let records = vec![
//!     LocatableRecord::new("c1", "Max Hospital")
//!         .with_city("Delhi")
//!         .with_coordinate(Coordinate::new(28.6139, 77.2090))
//!         .with_tags(["Cardiology", "Orthopedics"]),
//!     LocatableRecord::new("c2", "Fortis")
//!         .with_address_text("Sector 44, Gurgaon, Haryana")
//!         .with_coordinate(Coordinate::new(28.4420, 77.0720))
//!         .with_tags(["Neurology"]),
//! ];
//!
//! let searcher = ClinicSearcher::new()?;
//!
//! // Everything within 50 km of Delhi, nearest first
//! let query = SearchQuery::builder().near(28.6139, 77.2090).max_distance_km(50.0).build();
//! let results = searcher.search_with_query(&records, &query)?.into_ranked();
//! for result in &results {
//!     println!("{} ({}) {:?}", result.record.name, result.city, result.distance_display());
//! }
//!
//! // City names resolve through aliases
//! assert_eq!(searcher.resolve_city("Gurugram").map(|c| c.key), Some("gurgaon"));
//! # Ok::<(), clinicfinder::error::ClinicFinderError>(())
//! ```
//!
//! # Features
//!
//! - **City Resolution**: Alias-aware lookup (`Bombay` → Mumbai) and city extraction from free-text addresses
//! - **Distance Ranking**: Haversine distances, radius cutoff, nulls-last stable ordering
//! - **Grouping**: Results per speciality with city and specialist breakdowns
//! - **Batch Processing**: Many queries over one batch in parallel
//!
//! # Data
//!
//! The city, alias and address-pattern tables live in the `clinicfinder-data`
//! subcrate and are compiled in. Records are never copied or mutated; results
//! borrow from the caller's batch.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
pub mod geo;
pub mod record;
pub mod resolve;
mod search;

pub use crate::core::ClinicSearcher;

pub use clinicfinder_data as data;
pub use clinicfinder_data::CityReference;
pub use config::SearchQueryBuilder;
pub use record::{Address, Doctor, LocatableRecord, OpeningHours, StructuredAddress};
pub use search::{
    ClinicSummary, RankedResult, SearchError, SearchOutcome, SearchQuery, SpecialistKind,
    SpecialistSummary, TagGroup, categorize_specialists, find_doctors, group_by_tag, search_inner,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Clinicfinder library.
///
/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG` when set, and by
/// `level` otherwise. Only the first call has any effect.
///
/// # Examples
///
/// ```rust
/// use clinicfinder::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), clinicfinder::error::ClinicFinderError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::ClinicFinderError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("rayon_core=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    fn records() -> Vec<LocatableRecord> {
        vec![
            LocatableRecord::new("1", "Max Hospital")
                .with_city("Delhi")
                .with_coordinate(Coordinate::new(28.6139, 77.2090))
                .with_tags(["Cardiology"]),
            LocatableRecord::new("2", "Kokilaben Hospital")
                .with_city("Mumbai")
                .with_coordinate(Coordinate::new(19.0760, 72.8777))
                .with_tags(["Cardiology", "Oncology"]),
        ]
    }

    #[test]
    fn test_searcher_creation() {
        setup_test_env();

        let searcher = ClinicSearcher::new();
        assert!(
            searcher.is_ok(),
            "Should be able to create searcher with built-in tables"
        );
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        setup_test_env();
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_basic_search() {
        setup_test_env();

        let searcher = ClinicSearcher::new().unwrap();
        let records = records();
        let results = searcher.search(&records).unwrap().into_ranked();
        assert_eq!(results.len(), 2, "Default query should keep every record");
        assert!(results.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_configuration() {
        setup_test_env();

        let query = SearchQueryBuilder::nearby().city("mumbai").build();
        let searcher = ClinicSearcher::new().unwrap().with_default_query(query);
        let records = records();
        let results = searcher.search(&records).unwrap().into_ranked();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.id, "2");
        assert_eq!(results[0].distance_km, Some(0.0));
    }

    #[test]
    fn test_batch_search() {
        setup_test_env();

        let searcher = ClinicSearcher::new().unwrap();
        let records = records();
        let queries = vec![
            SearchQuery::builder().city("Mumbai").build(),
            SearchQuery::builder().city("Delhi").build(),
            SearchQuery::builder().tag_filter("oncology").build(),
        ];
        let outcomes = searcher.search_bulk(&records, &queries).unwrap();

        assert_eq!(outcomes.len(), 3, "Should have outcomes for all 3 queries");
        let first_ids = outcomes
            .iter()
            .map(|o| o.ranked().unwrap()[0].record.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(first_ids, ["2", "1", "2"]);
    }

    #[test]
    fn test_empty_search() {
        setup_test_env();

        let searcher = ClinicSearcher::new().unwrap();
        let results = searcher.search(&[]).unwrap();
        assert!(results.is_empty(), "Empty batch should not error");

        let records = records();
        let query = SearchQuery::builder().city("XYZ123NONEXISTENT").build();
        let results = searcher.search_with_query(&records, &query).unwrap();
        assert!(results.is_empty(), "Unknown city should match nothing, not error");
    }
}
