use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{Result, SearchError};
use crate::{
    record::{Doctor, LocatableRecord},
    resolve::extract_city_from_record,
};

/// Doctors at a clinic whose specialization contains `specialization`,
/// case-insensitively, in roster order.
#[instrument(level = "debug", skip(record), fields(clinic = %record.id))]
pub fn find_doctors<'r>(record: &'r LocatableRecord, specialization: &str) -> Result<Vec<&'r Doctor>> {
    let wanted = specialization.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(SearchError::InvalidQuery(
            "specialization must not be empty".to_string(),
        ));
    }

    let doctors = record
        .doctors
        .iter()
        .filter(|doctor| doctor.specialization.to_lowercase().contains(&wanted))
        .collect::<Vec<_>>();
    debug!(found = doctors.len(), "Doctor search");
    Ok(doctors)
}

/// Clinic overview with its roster reduced to counts and specializations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicSummary {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub total_doctors: usize,
    /// Distinct specializations, first-seen order.
    pub specializations: Vec<String>,
}

impl ClinicSummary {
    #[must_use]
    pub fn from_record(record: &LocatableRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            city: extract_city_from_record(record),
            address: record.address.as_ref().map(ToString::to_string),
            contact: record.phone.clone(),
            total_doctors: record.doctors.len(),
            specializations: record
                .doctors
                .iter()
                .map(|d| d.specialization.clone())
                .unique()
                .collect(),
        }
    }
}
