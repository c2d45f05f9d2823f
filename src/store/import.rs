use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::CarRecord;
use crate::errors::{GarageError, Result};

pub const EXPORT_VERSION: u32 = 1;

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Envelope wrapping backup exports. Plain exports are a bare record array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub version: u32,
    pub export_date: DateTime<Utc>,
    pub cars: Vec<CarRecord>,
}

impl ExportEnvelope {
    pub fn new(cars: Vec<CarRecord>) -> Self {
        Self {
            version: EXPORT_VERSION,
            export_date: Utc::now(),
            cars,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Plain(Vec<CarRecord>),
    Envelope(ExportEnvelope),
}

/// Parses an import payload, accepting both a bare record array and the
/// backup envelope. Anything else is malformed; the caller commits the
/// returned records only after user confirmation.
pub fn parse_records(text: &str) -> Result<Vec<CarRecord>> {
    match serde_json::from_str::<ImportPayload>(text) {
        Ok(ImportPayload::Plain(records)) => Ok(records),
        Ok(ImportPayload::Envelope(envelope)) => Ok(envelope.cars),
        Err(err) => Err(GarageError::MalformedData(err.to_string())),
    }
}

/// Plain export: the bare record array, pretty-printed.
pub fn export_plain(records: &[CarRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Backup export: versioned envelope with the export timestamp.
pub fn export_backup(records: &[CarRecord]) -> Result<String> {
    let envelope = ExportEnvelope::new(records.to_vec());
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn default_export_file_name() -> &'static str {
    "garage_export.json"
}

/// Backups carry the export date in the filename.
pub fn backup_file_name() -> String {
    format!("garage_backup_{}.json", Utc::now().format(BACKUP_DATE_FORMAT))
}
