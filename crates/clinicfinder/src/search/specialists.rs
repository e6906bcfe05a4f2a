use serde::{Deserialize, Serialize};

use super::ranker::RankedResult;
use crate::record::LocatableRecord;

/// Whether a clinic offers one speciality or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialistKind {
    Individual,
    Multi,
}

impl SpecialistKind {
    /// `None` for records without any tag.
    #[must_use]
    pub fn of(record: &LocatableRecord) -> Option<Self> {
        match record.tags.len() {
            0 => None,
            1 => Some(Self::Individual),
            _ => Some(Self::Multi),
        }
    }
}

/// Results split into single- and multi-speciality clinics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistSummary<'r> {
    pub individual: Vec<RankedResult<'r>>,
    pub multi: Vec<RankedResult<'r>>,
    pub total: usize,
    /// Share of the input, rounded to a whole percent.
    pub individual_percentage: u32,
    pub multi_percentage: u32,
}

/// Split `results` by [`SpecialistKind`], optionally keeping only one kind.
///
/// Percentages are relative to all of `results`, including records without
/// tags, so they need not add up to 100.
#[must_use]
pub fn categorize_specialists<'r>(
    results: &[RankedResult<'r>],
    only: Option<SpecialistKind>,
) -> SpecialistSummary<'r> {
    let (mut individual, mut multi): (Vec<_>, Vec<_>) = results
        .iter()
        .filter_map(|r| SpecialistKind::of(r.record).map(|kind| (kind, r.clone())))
        .partition(|(kind, _)| *kind == SpecialistKind::Individual);

    match only {
        Some(SpecialistKind::Individual) => multi.clear(),
        Some(SpecialistKind::Multi) => individual.clear(),
        None => {}
    }

    let individual = individual.into_iter().map(|(_, r)| r).collect::<Vec<_>>();
    let multi = multi.into_iter().map(|(_, r)| r).collect::<Vec<_>>();

    SpecialistSummary {
        total: individual.len() + multi.len(),
        individual_percentage: percentage(individual.len(), results.len()),
        multi_percentage: percentage(multi.len(), results.len()),
        individual,
        multi,
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
