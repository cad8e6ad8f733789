use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuiaError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<guia_zones::ZoneError> for GuiaError {
    fn from(err: guia_zones::ZoneError) -> Self {
        GuiaError::Config(err.to_string())
    }
}
