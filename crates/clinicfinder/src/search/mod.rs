//! Filtering, distance annotation, ranking and grouping of clinic records.
//!
//! [`search_inner`] is a pure function of the record batch, the query and the
//! static city tables. Everything the caller can configure lives on [`SearchQuery`].

mod doctors;
mod grouping;
mod ranker;
mod specialists;

use chrono::NaiveTime;
pub use doctors::{ClinicSummary, find_doctors};
pub use error::SearchError;
use error::Result;
pub use grouping::{TagGroup, group_by_tag};
pub use ranker::{RankedResult, SearchOutcome, search_inner};
use serde::{Deserialize, Serialize};
pub use specialists::{SpecialistKind, SpecialistSummary, categorize_specialists};
use tracing::debug;

use crate::{SearchQueryBuilder, geo::Coordinate, resolve::resolve_city_coordinates};

/// A filter and ranking request.
///
/// Field names follow the query-string names the HTTP layer receives, so a
/// query can be deserialised straight from request parameters. Numeric fields
/// stay signed/unchecked here; [`search_inner`] rejects out-of-range values
/// before doing any work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring filter on the record's extracted city. Also
    /// the source of the reference coordinate when no `coordinate` is given.
    pub city: Option<String>,
    /// Explicit reference point; takes precedence over the city's coordinate.
    pub coordinate: Option<Coordinate>,
    /// Case-insensitive substring filter on record tags.
    pub tag_filter: Option<String>,
    /// Radius cutoff in kilometres.
    pub max_distance_km: Option<f64>,
    /// Maximum number of results (per group when grouping).
    pub limit: Option<i64>,
    /// Return results grouped by tag instead of a flat list.
    pub group_by_tag: bool,
    /// Keep only single- or multi-speciality records.
    pub specialist_kind: Option<SpecialistKind>,
    /// Keep only records open at this time of day (records without hours are kept).
    pub open_at: Option<NaiveTime>,
}

impl SearchQuery {
    pub fn builder() -> SearchQueryBuilder {
        SearchQueryBuilder::new()
    }

    /// Validate the query and resolve its reference coordinate.
    pub(crate) fn prepare(&self) -> Result<PreparedQuery> {
        if let Some(max) = self.max_distance_km {
            if !max.is_finite() || max < 0.0 {
                return Err(SearchError::InvalidQuery(format!(
                    "maxDistanceKm must be a finite non-negative number, got {max}"
                )));
            }
        }

        let limit = self
            .limit
            .map(|limit| {
                usize::try_from(limit).map_err(|_| {
                    SearchError::InvalidQuery(format!("limit must not be negative, got {limit}"))
                })
            })
            .transpose()?;

        let city = non_empty_lowercase(self.city.as_deref());
        let tag_filter = non_empty_lowercase(self.tag_filter.as_deref());
        let resolved_city = self.city.as_deref().and_then(resolve_city_coordinates);

        if let Some(coordinate) = &self.coordinate {
            coordinate.validate()?;
        }

        let reference = match (self.coordinate, &city) {
            (Some(_), Some(city)) if resolved_city.is_none() => {
                return Err(SearchError::InvalidQuery(format!(
                    "coordinate was given together with city '{city}', which does not resolve; \
                     pass one source of location"
                )));
            }
            (Some(coordinate), _) => Some(coordinate),
            (None, _) => resolved_city.map(Coordinate::from),
        };

        if reference.is_none() && self.max_distance_km.is_some() {
            debug!("maxDistanceKm ignored: no reference coordinate");
        }

        Ok(PreparedQuery {
            city,
            reference,
            tag_filter,
            max_distance_km: self.max_distance_km,
            limit,
            group_by_tag: self.group_by_tag,
            specialist_kind: self.specialist_kind,
            open_at: self.open_at,
        })
    }
}

/// A validated query with normalised filters.
#[derive(Debug, Clone)]
pub(crate) struct PreparedQuery {
    pub city: Option<String>,
    pub reference: Option<Coordinate>,
    pub tag_filter: Option<String>,
    pub max_distance_km: Option<f64>,
    pub limit: Option<usize>,
    pub group_by_tag: bool,
    pub specialist_kind: Option<SpecialistKind>,
    pub open_at: Option<NaiveTime>,
}

fn non_empty_lowercase(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

mod error {
    use thiserror::Error;

    use crate::geo::GeoError;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum SearchError {
        #[error("Invalid query: {0}")]
        InvalidQuery(String),
        #[error(transparent)]
        Geo(#[from] GeoError),
    }
    pub type Result<T> = std::result::Result<T, SearchError>;
}
