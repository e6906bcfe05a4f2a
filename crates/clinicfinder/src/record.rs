//! The narrow, typed view of a clinic document that the search core works with.
//!
//! Clinic documents in the store are schema-less: `address` can be a string or an
//! object, coordinates live under `location.coordinates` in `[lon, lat]` order and
//! specialities have been spelled two ways over time. [`LocatableRecord::from_document`]
//! checks all of that once at the boundary so the rest of the crate only sees
//! explicit optional fields.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{instrument, trace};

use crate::geo::Coordinate;
pub use error::RecordError;
use error::Result;

/// A record address: either free text or the structured form some documents use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Text(String),
    Structured(StructuredAddress),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(parts) => {
                let joined = [
                    &parts.street,
                    &parts.area,
                    &parts.city,
                    &parts.state,
                    &parts.pincode,
                ]
                .into_iter()
                .flatten()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
                f.write_str(&joined)
            }
        }
    }
}

/// Daily opening window. A window whose close is before its open runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OpeningHours {
    /// Parses `"HH:MM"` open and close strings.
    pub fn parse(open: &str, close: &str) -> Result<Self> {
        let parse = |s: &str| {
            NaiveTime::parse_from_str(s.trim(), "%H:%M")
                .map_err(|_| RecordError::InvalidOpeningHours(s.to_string()))
        };
        Ok(Self {
            open: parse(open)?,
            close: parse(close)?,
        })
    }

    #[must_use]
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.open <= self.close {
            self.open <= time && time < self.close
        } else {
            time >= self.open || time < self.close
        }
    }
}

/// A doctor attached to a clinic document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub consultation_fee: Option<u32>,
    #[serde(default)]
    pub availability: Vec<String>,
}

/// Read-only view of a caller supplied entity: what the search core needs plus
/// the display fields callers echo back in responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocatableRecord {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub address: Option<Address>,
    pub coordinate: Option<Coordinate>,
    /// Ordered tags, e.g. medical specialities.
    pub tags: Vec<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub is_emergency: bool,
    pub opening_hours: Option<OpeningHours>,
    pub doctors: Vec<Doctor>,
}

impl LocatableRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    #[must_use]
    pub fn with_address_text(self, address: impl Into<String>) -> Self {
        self.with_address(Address::Text(address.into()))
    }

    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_opening_hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = Some(hours);
        self
    }

    #[must_use]
    pub fn with_doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.doctors = doctors;
        self
    }

    /// Convert a raw clinic document into a record.
    ///
    /// Accepts `_id` or `id` (string or `{"$oid": ..}`), `specialities` or
    /// `specialties`, `location.coordinates` as `[lon, lat]`, a string or object
    /// `address`, `opening_hours {open, close}` and a `doctors` array.
    #[instrument(level = "trace", skip_all)]
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = doc.as_object().ok_or(RecordError::NotAnObject)?;

        let id = obj
            .get("_id")
            .or_else(|| obj.get("id"))
            .map(id_to_string)
            .unwrap_or_default();

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RecordError::MissingField {
                id: id.clone(),
                field: "name",
            })?
            .to_string();

        let city = optional_string(obj.get("city"));
        let phone = optional_string(obj.get("phone")).or_else(|| optional_string(obj.get("contact")));

        let address = match obj.get("address") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(Address::Text(text.clone())),
            Some(other @ Value::Object(_)) => Some(Address::Structured(
                serde_json::from_value(other.clone())
                    .map_err(|source| RecordError::InvalidField {
                        id: id.clone(),
                        field: "address",
                        source,
                    })?,
            )),
            Some(_) => None,
        };

        let coordinate = obj
            .get("location")
            .and_then(|loc| loc.get("coordinates"))
            .filter(|v| !v.is_null())
            .map(|v| parse_coordinates(&id, v))
            .transpose()?;

        let tags = obj
            .get("specialities")
            .or_else(|| obj.get("specialties"))
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let opening_hours = match obj.get("opening_hours") {
            Some(hours) => match (
                hours.get("open").and_then(Value::as_str),
                hours.get("close").and_then(Value::as_str),
            ) {
                (Some(open), Some(close)) => Some(OpeningHours::parse(open, close)?),
                _ => None,
            },
            None => None,
        };

        let doctors = match obj.get("doctors") {
            Some(doctors @ Value::Array(_)) => serde_json::from_value(doctors.clone())
                .map_err(|source| RecordError::InvalidField {
                    id: id.clone(),
                    field: "doctors",
                    source,
                })?,
            _ => Vec::new(),
        };

        trace!(%id, %name, has_coordinate = coordinate.is_some(), "Converted clinic document");

        Ok(Self {
            id,
            name,
            city,
            address,
            coordinate,
            tags,
            phone,
            rating: obj.get("rating").and_then(Value::as_f64),
            is_emergency: obj
                .get("isEmergency")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            opening_hours,
            doctors,
        })
    }

    /// Convert a batch of documents, failing on the first malformed one.
    pub fn from_documents<'a, I>(docs: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        docs.into_iter().map(Self::from_document).collect()
    }
}

fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .unwrap_or_default(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn parse_coordinates(id: &str, value: &Value) -> Result<Coordinate> {
    let invalid = || RecordError::InvalidCoordinates {
        id: id.to_string(),
        value: value.to_string(),
    };
    let pair = value.as_array().filter(|a| a.len() == 2).ok_or_else(invalid)?;
    let (Some(longitude), Some(latitude)) = (pair[0].as_f64(), pair[1].as_f64()) else {
        return Err(invalid());
    };
    let coordinate = Coordinate::from_lon_lat(longitude, latitude);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(invalid())
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum RecordError {
        #[error("Document is not a JSON object")]
        NotAnObject,
        #[error("Document '{id}' is missing required field '{field}'")]
        MissingField { id: String, field: &'static str },
        #[error("Document '{id}' has an invalid '{field}' field: {source}")]
        InvalidField {
            id: String,
            field: &'static str,
            #[source]
            source: serde_json::Error,
        },
        #[error("Document '{id}' has invalid coordinates {value}, expected [lon, lat] in range")]
        InvalidCoordinates { id: String, value: String },
        #[error("Invalid opening time '{0}', expected HH:MM")]
        InvalidOpeningHours(String),
    }

    pub type Result<T> = std::result::Result<T, RecordError>;
}
