use chrono::NaiveTime;

use crate::{
    geo::Coordinate,
    search::{SearchQuery, SpecialistKind},
};

/// Builder for creating search queries with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    /// Create a new builder: no filters, no radius, no limit
    pub fn new() -> Self {
        Self {
            query: SearchQuery::default(),
        }
    }

    /// Create a builder for "what is close to me" lookups (10 km, top 10)
    pub fn nearby() -> Self {
        Self::new().max_distance_km(10.0).limit(10)
    }

    /// Create a builder for browsing a whole city, grouped by speciality
    pub fn citywide() -> Self {
        Self::new().max_distance_km(50.0).limit(25).group_by_tag(true)
    }

    /// Filter on the record's city and use it as the reference point
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.query.city = Some(city.into());
        self
    }

    /// Use an explicit reference point
    pub fn coordinate(mut self, coordinate: Coordinate) -> Self {
        self.query.coordinate = Some(coordinate);
        self
    }

    /// Use an explicit reference point given as latitude and longitude
    pub fn near(self, latitude: f64, longitude: f64) -> Self {
        self.coordinate(Coordinate::new(latitude, longitude))
    }

    /// Keep only records with a tag containing `tag`
    pub fn tag_filter(mut self, tag: impl Into<String>) -> Self {
        self.query.tag_filter = Some(tag.into());
        self
    }

    /// Drop records further than `km` from the reference point
    pub fn max_distance_km(mut self, km: f64) -> Self {
        self.query.max_distance_km = Some(km);
        self
    }

    /// Set the maximum number of results to return (per group when grouping)
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
        self
    }

    /// Remove any result limit
    pub fn unlimited(mut self) -> Self {
        self.query.limit = None;
        self
    }

    /// Return tag groups instead of a flat list
    pub fn group_by_tag(mut self, enabled: bool) -> Self {
        self.query.group_by_tag = enabled;
        self
    }

    /// Keep only single- or multi-speciality clinics
    pub fn specialist_kind(mut self, kind: SpecialistKind) -> Self {
        self.query.specialist_kind = Some(kind);
        self
    }

    /// Keep only clinics open at `time`
    pub fn open_at(mut self, time: NaiveTime) -> Self {
        self.query.open_at = Some(time);
        self
    }

    /// Build the final query
    pub fn build(self) -> SearchQuery {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let query = SearchQueryBuilder::new().build();
        assert_eq!(query, SearchQuery::default());
        assert_eq!(query.limit, None);
        assert!(!query.group_by_tag);
    }

    #[test]
    fn test_nearby_preset() {
        let query = SearchQueryBuilder::nearby().build();
        assert_eq!(query.max_distance_km, Some(10.0));
        assert_eq!(query.limit, Some(10));
        assert!(!query.group_by_tag);
    }

    #[test]
    fn test_citywide_preset() {
        let query = SearchQueryBuilder::citywide().build();
        assert_eq!(query.max_distance_km, Some(50.0));
        assert_eq!(query.limit, Some(25));
        assert!(query.group_by_tag);
    }

    #[test]
    fn test_method_chaining() {
        let query = SearchQuery::builder()
            .city("Delhi")
            .near(28.6, 77.2)
            .tag_filter("cardio")
            .max_distance_km(5.0)
            .limit(3)
            .specialist_kind(SpecialistKind::Individual)
            .open_at(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .build();

        assert_eq!(query.city.as_deref(), Some("Delhi"));
        assert_eq!(query.coordinate, Some(Coordinate::new(28.6, 77.2)));
        assert_eq!(query.tag_filter.as_deref(), Some("cardio"));
        assert_eq!(query.max_distance_km, Some(5.0));
        assert_eq!(query.limit, Some(3));
        assert_eq!(query.specialist_kind, Some(SpecialistKind::Individual));
        assert!(query.open_at.is_some());
    }

    #[test]
    fn test_unlimited_clears_preset_limit() {
        let query = SearchQueryBuilder::nearby().unlimited().build();
        assert_eq!(query.limit, None);
        assert_eq!(query.max_distance_km, Some(10.0));
    }
}
