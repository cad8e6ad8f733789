use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZoneError>;

#[derive(Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Duplicate zone name: {0}")]
    DuplicateZone(String),

    #[error("Unknown zone profile: {0}")]
    UnknownProfile(String),
}
