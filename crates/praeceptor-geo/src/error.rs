use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Validation error: {0}")]
    Validation(#[from] crate::search::ValidationError),
    #[error("Geocoding error: {0}")]
    Geocoding(#[from] praeceptor_geocoding::GeocodeFailure),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
