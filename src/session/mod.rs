//! Bridges the transient on-screen form and the record store, owning at most
//! one active edit session at a time.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{color, schema, CarRecord, ChecklistItem, ColorSlot, PackageProgress};
use crate::errors::{GarageError, Result};
use crate::store::draft::{DraftStore, FormDraft};
use crate::store::{RecordStore, SaveOutcome};
use crate::sync::CloudSync;

/// Transient state of the entry form: raw field text plus the set of
/// currently checked feature ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub license_plate: String,
    pub vin: String,
    pub price: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_color: Option<String>,
    #[serde(default)]
    pub checked: BTreeSet<String>,
}

impl FormState {
    /// Both mandatory fields carry non-blank values.
    pub fn has_mandatory_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.license_plate.trim().is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self == &FormState::default()
    }
}

/// Which record, if any, the form is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSession {
    New,
    Editing(Uuid),
}

/// Form fields addressable through `set_field`.
const FIELD_NAMES: &[&str] = &[
    "name",
    "plate",
    "vin",
    "price",
    "notes",
    "exterior",
    "interior",
];

pub fn field_names() -> &'static [&'static str] {
    FIELD_NAMES
}

pub struct FormController {
    form: FormState,
    session: EditSession,
    loaded_created_at: Option<DateTime<Utc>>,
    sync: Option<Box<dyn CloudSync>>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            form: FormState::default(),
            session: EditSession::New,
            loaded_created_at: None,
            sync: None,
        }
    }

    pub fn with_sync(mut self, sync: Box<dyn CloudSync>) -> Self {
        self.sync = Some(sync);
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    /// Writes one form field from raw user text. Color fields validate the
    /// key against the static table; `none` or empty clears them.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        let text = value.trim();
        match field.to_ascii_lowercase().as_str() {
            "name" => self.form.name = text.to_string(),
            "plate" | "license-plate" => self.form.license_plate = text.to_string(),
            "vin" => self.form.vin = text.to_string(),
            "price" => self.form.price = text.to_string(),
            "notes" => self.form.notes = text.to_string(),
            "exterior" => self.form.exterior_color = Self::color_value(ColorSlot::Exterior, text)?,
            "interior" => self.form.interior_color = Self::color_value(ColorSlot::Interior, text)?,
            other => {
                return Err(GarageError::InvalidInput(format!(
                    "unknown field `{other}` (fields: {})",
                    FIELD_NAMES.join(", ")
                )))
            }
        }
        Ok(())
    }

    fn color_value(slot: ColorSlot, text: &str) -> Result<Option<String>> {
        if text.is_empty() || text.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        let option = color::find(slot, text).ok_or_else(|| {
            GarageError::InvalidInput(format!("unknown color key `{text}` (see `colors`)"))
        })?;
        Ok(Some(option.key.to_string()))
    }

    /// Checks or unchecks one feature; the id must exist in the schema.
    pub fn set_checked(&mut self, feature: &str, checked: bool) -> Result<()> {
        let def = schema::find_feature(feature).ok_or_else(|| {
            GarageError::InvalidInput(format!(
                "unknown feature `{feature}` (see `features` for the list)"
            ))
        })?;
        if checked {
            self.form.checked.insert(def.id.to_string());
        } else {
            self.form.checked.remove(def.id);
        }
        Ok(())
    }

    /// Reads the form into a candidate record. Mandatory-field absence fails
    /// with no state change; the checklist gets an entry for every schema
    /// feature with labels denormalized from the current vocabulary.
    pub fn capture(&self) -> Result<CarRecord> {
        let name = self.form.name.trim();
        if name.is_empty() {
            return Err(GarageError::MissingField("name"));
        }
        let plate = self.form.license_plate.trim();
        if plate.is_empty() {
            return Err(GarageError::MissingField("license plate"));
        }

        let mut record = CarRecord::new(name, plate);
        if let EditSession::Editing(id) = self.session {
            record.id = id;
            if let Some(created_at) = self.loaded_created_at {
                record.created_at = created_at;
            }
        }
        record.vin = optional(&self.form.vin);
        record.price = optional(&self.form.price);
        record.notes = optional(&self.form.notes);
        record.exterior_color = self.form.exterior_color.clone();
        record.interior_color = self.form.interior_color.clone();

        for package in schema::packages() {
            for feature in package.features {
                record.checklist.insert(
                    feature.id.to_string(),
                    ChecklistItem {
                        checked: self.form.checked.contains(feature.id),
                        package_key: Some(package.key.to_string()),
                        importance: Some(feature.importance.to_string()),
                        label: feature.label.to_string(),
                    },
                );
            }
        }
        record.touch();
        Ok(record)
    }

    /// Captures and commits the form. On success the active session resets,
    /// the draft is dropped, and a configured sync backend is pushed to.
    /// A `PlateConflict` propagates so the caller can confirm and retry with
    /// `force`.
    pub fn save(
        &mut self,
        store: &mut RecordStore,
        drafts: &DraftStore,
        force: bool,
    ) -> Result<(CarRecord, SaveOutcome)> {
        let record = self.capture()?;
        let outcome = store.upsert(record.clone(), force)?;
        self.session = EditSession::New;
        self.loaded_created_at = None;
        if let Err(err) = drafts.clear() {
            tracing::debug!(%err, "could not drop draft after save");
        }
        self.push_sync(store);
        Ok((record, outcome))
    }

    /// Populates the form from a stored record and marks it as the active
    /// session. Checklist entries unknown to the current schema keep their
    /// place in the record but have no checkbox to light up.
    pub fn load(&mut self, store: &RecordStore, id: Uuid) -> Result<()> {
        let record = store
            .get(id)
            .ok_or_else(|| GarageError::InvalidInput(format!("no saved car with id {id}")))?;

        self.form = FormState {
            name: record.name.clone(),
            license_plate: record.license_plate.clone(),
            vin: record.vin.clone().unwrap_or_default(),
            price: record.price.clone().unwrap_or_default(),
            notes: record.notes.clone().unwrap_or_default(),
            exterior_color: record.exterior_color.clone(),
            interior_color: record.interior_color.clone(),
            checked: record
                .checklist
                .iter()
                .filter(|(feature_id, item)| {
                    item.checked && schema::find_feature(feature_id).is_some()
                })
                .map(|(feature_id, _)| feature_id.clone())
                .collect(),
        };
        self.session = EditSession::Editing(record.id);
        self.loaded_created_at = Some(record.created_at);
        Ok(())
    }

    /// Resets all fields and checks and abandons the active session. The
    /// caller confirms beforehand; unsaved edits are gone for good.
    pub fn clear(&mut self, drafts: &DraftStore) {
        self.form = FormState::default();
        self.session = EditSession::New;
        self.loaded_created_at = None;
        if let Err(err) = drafts.clear() {
            tracing::debug!(%err, "could not drop draft after clear");
        }
    }

    /// Deletes a record; deleting the active session also clears the form.
    pub fn delete(&mut self, store: &mut RecordStore, drafts: &DraftStore, id: Uuid) -> Result<bool> {
        let removed = store.delete(id)?;
        if removed {
            if self.session == EditSession::Editing(id) {
                self.clear(drafts);
            }
            self.push_sync(store);
        }
        Ok(removed)
    }

    /// Best-effort draft write: runs only when the mandatory fields are
    /// filled, silently overwrites the previous draft, never reports failure.
    pub fn autosave(&self, drafts: &DraftStore) {
        if !self.form.has_mandatory_fields() {
            return;
        }
        let active_id = match self.session {
            EditSession::Editing(id) => Some(id),
            EditSession::New => None,
        };
        let draft = FormDraft::new(self.form.clone(), active_id);
        if let Err(err) = drafts.save(&draft) {
            tracing::debug!(%err, "autosave skipped");
        }
    }

    /// Restores the persisted draft into the form, if one exists.
    pub fn restore_draft(&mut self, drafts: &DraftStore) -> Result<bool> {
        let Some(draft) = drafts.load()? else {
            return Ok(false);
        };
        self.form = draft.form;
        self.session = match draft.active_id {
            Some(id) => EditSession::Editing(id),
            None => EditSession::New,
        };
        Ok(true)
    }

    /// Per-package progress over the current checklist state, in schema
    /// order.
    pub fn summarize(&self) -> Vec<PackageProgress> {
        let checked: HashSet<&str> = self.form.checked.iter().map(String::as_str).collect();
        schema::progress(&checked)
    }

    fn push_sync(&self, store: &RecordStore) {
        if let Some(sync) = &self.sync {
            if let Err(err) = sync.push(store.list()) {
                tracing::warn!(backend = sync.label(), %err, "cloud sync push failed");
            }
        }
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::medium::MemoryMedium;

    fn fixtures() -> (FormController, RecordStore, DraftStore) {
        (
            FormController::new(),
            RecordStore::open(Box::new(MemoryMedium::new())).unwrap(),
            DraftStore::new(Box::new(MemoryMedium::new())),
        )
    }

    #[test]
    fn capture_requires_mandatory_fields() {
        let (mut controller, ..) = fixtures();
        assert!(matches!(
            controller.capture(),
            Err(GarageError::MissingField("name"))
        ));
        controller.set_field("name", "Daily").unwrap();
        assert!(matches!(
            controller.capture(),
            Err(GarageError::MissingField("license plate"))
        ));
        controller.set_field("plate", "AB12 CDE").unwrap();
        let record = controller.capture().unwrap();
        assert_eq!(record.checklist.len(), schema::feature_count());
        assert!(record.checklist.values().all(|item| !item.checked));
    }

    #[test]
    fn capture_denormalizes_labels_and_packages() {
        let (mut controller, ..) = fixtures();
        controller.set_field("name", "Daily").unwrap();
        controller.set_field("plate", "AB12 CDE").unwrap();
        controller.set_checked("sunroof", true).unwrap();
        let record = controller.capture().unwrap();
        let item = &record.checklist["sunroof"];
        assert!(item.checked);
        assert_eq!(item.label, "Panoramic Sunroof");
        assert_eq!(item.package_key.as_deref(), Some("exterior"));
    }

    #[test]
    fn save_resets_session_so_next_save_creates() {
        let (mut controller, mut store, drafts) = fixtures();
        controller.set_field("name", "Daily").unwrap();
        controller.set_field("plate", "AB12 CDE").unwrap();
        let (first, outcome) = controller.save(&mut store, &drafts, false).unwrap();
        assert_eq!(outcome, SaveOutcome::Created);
        assert_eq!(controller.session(), EditSession::New);

        // Same form again: plate collides with the record just saved.
        let err = controller.save(&mut store, &drafts, false).unwrap_err();
        assert!(err.is_conflict());

        controller.set_field("plate", "ZZ99 ZZZ").unwrap();
        let (second, outcome) = controller.save(&mut store, &drafts, false).unwrap();
        assert_eq!(outcome, SaveOutcome::Created);
        assert_ne!(first.id, second.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_then_save_updates_in_place() {
        let (mut controller, mut store, drafts) = fixtures();
        controller.set_field("name", "Daily").unwrap();
        controller.set_field("plate", "AB12 CDE").unwrap();
        let (saved, _) = controller.save(&mut store, &drafts, false).unwrap();

        controller.load(&store, saved.id).unwrap();
        assert_eq!(controller.session(), EditSession::Editing(saved.id));
        controller.set_field("name", "Daily Driver").unwrap();
        let (updated, outcome) = controller.save(&mut store, &drafts, false).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, saved.created_at);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "Daily Driver");
    }

    #[test]
    fn clear_resets_session_and_next_save_creates_new_record() {
        let (mut controller, mut store, drafts) = fixtures();
        controller.set_field("name", "Daily").unwrap();
        controller.set_field("plate", "AB12 CDE").unwrap();
        let (saved, _) = controller.save(&mut store, &drafts, false).unwrap();

        controller.load(&store, saved.id).unwrap();
        controller.clear(&drafts);
        assert_eq!(controller.session(), EditSession::New);
        assert!(controller.form().is_blank());

        controller.set_field("name", "Other").unwrap();
        controller.set_field("plate", "CD34 EFG").unwrap();
        let (other, _) = controller.save(&mut store, &drafts, false).unwrap();
        assert_ne!(other.id, saved.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn deleting_active_session_clears_the_form() {
        let (mut controller, mut store, drafts) = fixtures();
        controller.set_field("name", "Daily").unwrap();
        controller.set_field("plate", "AB12 CDE").unwrap();
        let (saved, _) = controller.save(&mut store, &drafts, false).unwrap();

        controller.load(&store, saved.id).unwrap();
        assert!(controller.delete(&mut store, &drafts, saved.id).unwrap());
        assert_eq!(controller.session(), EditSession::New);
        assert!(controller.form().is_blank());
        assert!(store.is_empty());
        // second delete is a quiet no-op
        assert!(!controller.delete(&mut store, &drafts, saved.id).unwrap());
    }

    #[test]
    fn autosave_skips_incomplete_form_and_round_trips() {
        let (mut controller, _store, drafts) = fixtures();
        controller.autosave(&drafts);
        assert!(drafts.load().unwrap().is_none());

        controller.set_field("name", "Daily").unwrap();
        controller.set_field("plate", "AB12 CDE").unwrap();
        controller.set_checked("heated-seats", true).unwrap();
        controller.autosave(&drafts);

        let mut revived = FormController::new();
        assert!(revived.restore_draft(&drafts).unwrap());
        assert_eq!(revived.form(), controller.form());
        assert_eq!(revived.session(), EditSession::New);
    }

    #[test]
    fn summarize_tracks_package_progress() {
        let (mut controller, ..) = fixtures();
        controller.set_checked("active-cruise", true).unwrap();
        controller.set_checked("lane-keep", true).unwrap();
        let summary = controller.summarize();
        let driving = summary.iter().find(|p| p.key == "driving").unwrap();
        assert_eq!((driving.checked, driving.total), (2, 3));
        assert_eq!(driving.percent(), 67);
    }

    #[test]
    fn set_field_validates_color_keys() {
        let (mut controller, ..) = fixtures();
        controller.set_field("exterior", "Portimao-Blue").unwrap();
        assert_eq!(
            controller.form().exterior_color.as_deref(),
            Some("portimao-blue")
        );
        controller.set_field("exterior", "none").unwrap();
        assert_eq!(controller.form().exterior_color, None);
        assert!(controller.set_field("interior", "hot-pink").is_err());
        assert!(controller.set_field("bogus", "x").is_err());
    }
}
