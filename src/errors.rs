use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for domain/store/session layers.
#[derive(Error, Debug)]
pub enum GarageError {
    #[error("Missing mandatory field: {0}")]
    MissingField(&'static str),
    #[error("License plate `{plate}` is already used by another saved car")]
    PlateConflict { existing_id: Uuid, plate: String },
    #[error("Malformed data: {0}")]
    MalformedData(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, GarageError>;

impl GarageError {
    /// True when the caller may retry the operation with the force flag set.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GarageError::PlateConflict { .. })
    }
}

impl From<std::io::Error> for GarageError {
    fn from(err: std::io::Error) -> Self {
        GarageError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for GarageError {
    fn from(err: serde_json::Error) -> Self {
        GarageError::Storage(err.to_string())
    }
}
