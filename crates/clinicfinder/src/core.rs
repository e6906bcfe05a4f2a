//! The [`ClinicSearcher`] facade.
//!
//! Wraps the free functions of [`crate::search`] and [`crate::resolve`] behind one
//! handle that checks the static city tables once and carries a default query.
//!
//! ```rust
//! use clinicfinder::{ClinicSearcher, LocatableRecord, SearchQuery, geo::Coordinate};
//!
//! let records = vec![
//!     LocatableRecord::new("c1", "Max Hospital")
//!         .with_city("Delhi")
//!         .with_coordinate(Coordinate::new(28.6139, 77.2090))
//!         .with_tags(["Cardiology"]),
//! ];
//!
//! let searcher = ClinicSearcher::new()?;
//! let query = SearchQuery::builder().city("delhi").max_distance_km(10.0).build();
//! let outcome = searcher.search_with_query(&records, &query)?;
//! assert_eq!(outcome.into_ranked().len(), 1);
//! # Ok::<(), clinicfinder::error::ClinicFinderError>(())
//! ```

use clinicfinder_data::{CityReference, validate_tables};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    error::Result,
    record::{Doctor, LocatableRecord},
    resolve::{extract_city_from_record, resolve_city_coordinates, suggest_city},
    search::{
        ClinicSummary, RankedResult, SearchOutcome, SearchQuery, SpecialistKind,
        SpecialistSummary, categorize_specialists, find_doctors, search_inner,
    },
};

/// Entry point for searching batches of clinic records.
///
/// Holds no record data: every search borrows the caller's batch, and the
/// results borrow from it in turn.
#[derive(Debug, Clone, Default)]
pub struct ClinicSearcher {
    default_query: SearchQuery,
}

impl ClinicSearcher {
    /// Create a searcher after checking the built-in city tables.
    #[instrument(name = "Create ClinicSearcher", level = "info")]
    pub fn new() -> Result<Self> {
        let t_init = std::time::Instant::now();
        validate_tables()?;
        info!(
            elapsed_seconds = ?t_init.elapsed(),
            cities = clinicfinder_data::CITIES.len(),
            aliases = clinicfinder_data::ALIASES.len(),
            "ClinicSearcher initialization complete"
        );
        Ok(Self::default())
    }

    /// Replace the query used by [`ClinicSearcher::search`].
    #[must_use]
    pub fn with_default_query(mut self, query: SearchQuery) -> Self {
        self.default_query = query;
        self
    }

    pub fn default_query(&self) -> &SearchQuery {
        &self.default_query
    }

    /// Search `records` with the default query.
    pub fn search<'r>(&self, records: &'r [LocatableRecord]) -> Result<SearchOutcome<'r>> {
        self.search_with_query(records, &self.default_query)
    }

    pub fn search_with_query<'r>(
        &self,
        records: &'r [LocatableRecord],
        query: &SearchQuery,
    ) -> Result<SearchOutcome<'r>> {
        search_inner(records, query).map_err(From::from)
    }

    /// Run several queries against one batch in parallel.
    ///
    /// Outcomes come back in query order. The first failing query fails the
    /// whole call.
    #[instrument(name = "Bulk Clinic Search", level = "info", skip_all, fields(records = records.len(), queries = queries.len()))]
    pub fn search_bulk<'r>(
        &self,
        records: &'r [LocatableRecord],
        queries: &[SearchQuery],
    ) -> Result<Vec<SearchOutcome<'r>>> {
        let t_search = std::time::Instant::now();
        let outcomes = queries
            .par_iter()
            .map(|query| search_inner(records, query))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        info!(elapsed_seconds = ?t_search.elapsed(), "Bulk search complete");
        Ok(outcomes)
    }

    /// Convert raw store documents into records, ready for searching.
    pub fn load_documents<'a, I>(&self, docs: I) -> Result<Vec<LocatableRecord>>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        LocatableRecord::from_documents(docs).map_err(From::from)
    }

    pub fn resolve_city(&self, city_name: &str) -> Option<&'static CityReference> {
        resolve_city_coordinates(city_name)
    }

    pub fn suggest_city(&self, city_name: &str) -> Option<&'static CityReference> {
        suggest_city(city_name)
    }

    pub fn extract_city(&self, record: &LocatableRecord) -> String {
        extract_city_from_record(record)
    }

    pub fn categorize<'r>(
        &self,
        results: &[RankedResult<'r>],
        only: Option<SpecialistKind>,
    ) -> SpecialistSummary<'r> {
        categorize_specialists(results, only)
    }

    pub fn find_doctors<'r>(
        &self,
        record: &'r LocatableRecord,
        specialization: &str,
    ) -> Result<Vec<&'r Doctor>> {
        find_doctors(record, specialization).map_err(From::from)
    }

    pub fn clinic_summary(&self, record: &LocatableRecord) -> ClinicSummary {
        ClinicSummary::from_record(record)
    }
}
