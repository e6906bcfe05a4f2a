use std::cmp::Ordering;

use serde::{Serialize, Serializer, ser::SerializeStruct};
use tracing::{debug, instrument, trace};

use super::{
    PreparedQuery, Result, SearchQuery, SpecialistKind,
    grouping::{TagGroup, group_by_tag},
};
use crate::{
    geo::{distance_km, format_distance},
    record::LocatableRecord,
    resolve::extract_city_from_record,
};

/// One record that survived the filters, with the values computed for it.
///
/// Borrows the input record; the caller's data is never copied or mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult<'r> {
    pub record: &'r LocatableRecord,
    /// City label from [`extract_city_from_record`].
    pub city: String,
    /// Kilometres from the reference coordinate, when both sides have one.
    pub distance_km: Option<f64>,
    /// Tags that matched the tag filter (empty when no filter was set).
    pub matched_tags: Vec<String>,
    /// Zero-based position in the final list (or group).
    pub rank: usize,
}

impl RankedResult<'_> {
    /// Distance as shown to users, e.g. `"2.5 km"`.
    #[must_use]
    pub fn distance_display(&self) -> Option<String> {
        self.distance_km.map(format_distance)
    }
}

impl Serialize for RankedResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let record = self.record;
        let mut state = serializer.serialize_struct("RankedResult", 13)?;
        state.serialize_field("id", &record.id)?;
        state.serialize_field("name", &record.name)?;
        state.serialize_field("city", &self.city)?;
        state.serialize_field("address", &record.address.as_ref().map(ToString::to_string))?;
        state.serialize_field("phone", &record.phone)?;
        state.serialize_field("specialities", &record.tags)?;
        state.serialize_field("rating", &record.rating.unwrap_or(0.0))?;
        state.serialize_field("isEmergency", &record.is_emergency)?;
        state.serialize_field("distance", &self.distance_km)?;
        state.serialize_field("distance_display", &self.distance_display())?;
        state.serialize_field("coordinates", &record.coordinate)?;
        state.serialize_field("matched_tags", &self.matched_tags)?;
        state.serialize_field("rank", &self.rank)?;
        state.end()
    }
}

/// Result of a search: a flat ranked list or tag groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome<'r> {
    Ranked(Vec<RankedResult<'r>>),
    Grouped(Vec<TagGroup<'r>>),
}

impl<'r> SearchOutcome<'r> {
    /// The flat list, or `None` for a grouped outcome.
    #[must_use]
    pub fn ranked(&self) -> Option<&[RankedResult<'r>]> {
        match self {
            Self::Ranked(results) => Some(results.as_slice()),
            Self::Grouped(_) => None,
        }
    }

    /// The groups, or `None` for a flat outcome.
    #[must_use]
    pub fn grouped(&self) -> Option<&[TagGroup<'r>]> {
        match self {
            Self::Grouped(groups) => Some(groups.as_slice()),
            Self::Ranked(_) => None,
        }
    }

    #[must_use]
    pub fn into_ranked(self) -> Vec<RankedResult<'r>> {
        match self {
            Self::Ranked(results) => results,
            Self::Grouped(groups) => groups.into_iter().flat_map(|g| g.results).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Ranked(results) => results.is_empty(),
            Self::Grouped(groups) => groups.is_empty(),
        }
    }
}

/// Filter, distance-annotate, sort, limit and optionally group `records`.
///
/// Fails fast on a malformed query, before any record is looked at. A record
/// carrying an out-of-range coordinate surfaces as an invalid coordinate error.
#[instrument(name = "Clinic Search", level = "debug", skip_all, fields(records = records.len()))]
pub fn search_inner<'r>(
    records: &'r [LocatableRecord],
    query: &SearchQuery,
) -> Result<SearchOutcome<'r>> {
    let prepared = query.prepare()?;
    debug!(
        city = ?prepared.city,
        reference = ?prepared.reference,
        tag_filter = ?prepared.tag_filter,
        max_distance_km = ?prepared.max_distance_km,
        limit = ?prepared.limit,
        group_by_tag = prepared.group_by_tag,
        "Prepared search query"
    );

    let mut results = Vec::with_capacity(records.len());
    for record in records {
        if let Some(result) = evaluate(record, &prepared)? {
            results.push(result);
        }
    }

    if prepared.reference.is_some() {
        // `sort_by` is stable: ties and undistanced records keep input order.
        results.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    }

    debug!(matched = results.len(), "Records passed filters");

    if prepared.group_by_tag {
        return Ok(SearchOutcome::Grouped(group_by_tag(results, prepared.limit)));
    }

    if let Some(limit) = prepared.limit {
        results.truncate(limit);
    }
    assign_ranks(&mut results);
    Ok(SearchOutcome::Ranked(results))
}

/// Apply every filter to one record, computing its distance if it survives.
fn evaluate<'r>(
    record: &'r LocatableRecord,
    query: &PreparedQuery,
) -> Result<Option<RankedResult<'r>>> {
    let city = extract_city_from_record(record);
    if let Some(wanted) = &query.city {
        if !city.to_lowercase().contains(wanted.as_str()) {
            trace!(id = %record.id, %city, "Dropped by city filter");
            return Ok(None);
        }
    }

    let matched_tags = match &query.tag_filter {
        Some(filter) => {
            let matched = record
                .tags
                .iter()
                .filter(|tag| tag.to_lowercase().contains(filter.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if matched.is_empty() {
                trace!(id = %record.id, "Dropped by tag filter");
                return Ok(None);
            }
            matched
        }
        None => Vec::new(),
    };

    if let Some(kind) = query.specialist_kind {
        if SpecialistKind::of(record) != Some(kind) {
            return Ok(None);
        }
    }

    if let (Some(time), Some(hours)) = (query.open_at, record.opening_hours) {
        if !hours.is_open_at(time) {
            return Ok(None);
        }
    }

    let distance = match (&query.reference, &record.coordinate) {
        (Some(reference), Some(coordinate)) => Some(distance_km(reference, coordinate)?),
        _ => None,
    };

    if let (Some(_), Some(max)) = (query.reference, query.max_distance_km) {
        match distance {
            Some(d) if d <= max => {}
            _ => {
                trace!(id = %record.id, ?distance, "Dropped by radius filter");
                return Ok(None);
            }
        }
    }

    Ok(Some(RankedResult {
        record,
        city,
        distance_km: distance,
        matched_tags,
        rank: 0,
    }))
}

/// Ascending distance with missing distances last.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(super) fn assign_ranks(results: &mut [RankedResult<'_>]) {
    for (rank, result) in results.iter_mut().enumerate() {
        result.rank = rank;
    }
}
