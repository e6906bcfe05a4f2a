use ahash::AHashMap as HashMap;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use super::{
    SpecialistKind,
    ranker::{RankedResult, assign_ranks},
};

/// Results sharing one tag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagGroup<'r> {
    /// The tag, exactly as it appears on the records.
    pub tag: String,
    /// Members before the limit was applied; groups are ordered by this.
    pub total: usize,
    /// Distinct city labels of all members, in first-seen order.
    pub cities: Vec<String>,
    /// Members that carry only this one tag.
    pub individual_count: usize,
    /// Members that carry several tags.
    pub multi_count: usize,
    /// Members in distance order, truncated to the query limit.
    pub results: Vec<RankedResult<'r>>,
}

impl<'r> TagGroup<'r> {
    fn new(tag: String, mut members: Vec<RankedResult<'r>>, limit: Option<usize>) -> Self {
        let total = members.len();
        let cities = members.iter().map(|m| m.city.clone()).unique().collect();
        let individual_count = members
            .iter()
            .filter(|m| SpecialistKind::of(m.record) == Some(SpecialistKind::Individual))
            .count();
        let multi_count = members
            .iter()
            .filter(|m| SpecialistKind::of(m.record) == Some(SpecialistKind::Multi))
            .count();

        if let Some(limit) = limit {
            members.truncate(limit);
        }
        assign_ranks(&mut members);

        Self {
            tag,
            total,
            cities,
            individual_count,
            multi_count,
            results: members,
        }
    }
}

/// Group already sorted results by tag.
///
/// A record with N distinct tags lands in N groups; records without tags land in
/// none. Each group keeps the incoming order and is truncated to `limit`. Groups
/// are ordered by descending member count, then tag name.
pub fn group_by_tag<'r>(
    results: Vec<RankedResult<'r>>,
    limit: Option<usize>,
) -> Vec<TagGroup<'r>> {
    let mut members: HashMap<&'r str, Vec<RankedResult<'r>>> = HashMap::new();
    for result in &results {
        for tag in result.record.tags.iter().unique() {
            members.entry(tag.as_str()).or_default().push(result.clone());
        }
    }

    let groups = members
        .into_iter()
        .map(|(tag, members)| TagGroup::new(tag.to_string(), members, limit))
        .sorted_by(|a, b| b.total.cmp(&a.total).then_with(|| a.tag.cmp(&b.tag)))
        .collect::<Vec<_>>();

    debug!(groups = groups.len(), "Grouped results by tag");
    groups
}
