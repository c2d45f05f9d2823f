use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One feature's checked state plus the metadata denormalized at save time,
/// so historic records stay readable if the feature vocabulary changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    #[serde(default)]
    pub label: String,
}

/// One saved car configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarRecord {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub checklist: BTreeMap<String, ChecklistItem>,
}

impl CarRecord {
    /// Creates a fresh record with a new identifier and current timestamps.
    pub fn new(name: impl Into<String>, license_plate: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            license_plate: license_plate.into(),
            vin: None,
            price: None,
            notes: None,
            exterior_color: None,
            interior_color: None,
            created_at: now,
            last_modified: now,
            checklist: BTreeMap::new(),
        }
    }

    /// License plate in the canonical comparison form.
    pub fn normalized_plate(&self) -> String {
        normalize_plate(&self.license_plate)
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// `(checked, total)` over the record's own checklist snapshot.
    pub fn checked_counts(&self) -> (usize, usize) {
        let checked = self.checklist.values().filter(|item| item.checked).count();
        (checked, self.checklist.len())
    }

    pub fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.license_plate)
    }
}

/// Canonical form used for uniqueness checks: trimmed and case-folded.
pub fn normalize_plate(raw: &str) -> String {
    raw.trim().to_lowercase()
}
