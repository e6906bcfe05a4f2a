use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicFinderError {
    #[error("Search error: {0}")]
    SearchError(#[from] crate::search::SearchError),
    #[error("Geo error: {0}")]
    GeoError(#[from] crate::geo::GeoError),
    #[error("Record error: {0}")]
    RecordError(#[from] crate::record::RecordError),
    #[error("Reference data error: {0}")]
    DataError(#[from] clinicfinder_data::DataError),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClinicFinderError>;
