pub mod draft;
pub mod import;
pub mod medium;

use uuid::Uuid;

use crate::domain::{normalize_plate, CarRecord};
use crate::errors::{GarageError, Result};
use medium::{StorageMedium, RECORDS_KEY};

/// How an upsert landed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// A forced save replaced the record that held the colliding plate.
    Overwrote { replaced: Uuid },
}

/// Durable, authoritative list of saved car records in stable insertion
/// order. Every successful mutation writes the full list back to the medium
/// before returning, so memory and persisted state never diverge.
pub struct RecordStore {
    records: Vec<CarRecord>,
    medium: Box<dyn StorageMedium>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Opens the store, loading whatever the medium currently holds.
    /// A missing value starts the store empty; a malformed one is an error
    /// rather than a silent reset, so the next save cannot clobber it.
    pub fn open(medium: Box<dyn StorageMedium>) -> Result<Self> {
        let records = match medium.read(RECORDS_KEY)? {
            Some(text) => import::parse_records(&text)?,
            None => Vec::new(),
        };
        Ok(Self { records, medium })
    }

    pub fn list(&self) -> &[CarRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&CarRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Finds a record by plate in canonical form.
    pub fn find_by_plate(&self, plate: &str) -> Option<&CarRecord> {
        let needle = normalize_plate(plate);
        self.records
            .iter()
            .find(|record| record.normalized_plate() == needle)
    }

    /// Inserts or updates a record.
    ///
    /// A different record holding an equal plate (trimmed, case-folded)
    /// blocks the save with `PlateConflict` until the caller retries with
    /// `force`; the forced save replaces the colliding entry in place,
    /// keeping its list position. Without a collision, a matching id is
    /// replaced in place and an unknown id is appended.
    pub fn upsert(&mut self, record: CarRecord, force: bool) -> Result<SaveOutcome> {
        let plate = record.normalized_plate();
        let collision = self
            .records
            .iter()
            .position(|existing| existing.id != record.id && existing.normalized_plate() == plate);

        let outcome = if let Some(pos) = collision {
            if !force {
                return Err(GarageError::PlateConflict {
                    existing_id: self.records[pos].id,
                    plate: record.license_plate.clone(),
                });
            }
            let replaced = self.records[pos].id;
            let id = record.id;
            self.records[pos] = record;
            // An edited record forced onto another plate's slot must not
            // leave its old entry behind: one record per id.
            if let Some(stale) = self
                .records
                .iter()
                .enumerate()
                .position(|(index, existing)| index != pos && existing.id == id)
            {
                self.records.remove(stale);
            }
            SaveOutcome::Overwrote { replaced }
        } else if let Some(pos) = self
            .records
            .iter()
            .position(|existing| existing.id == record.id)
        {
            self.records[pos] = record;
            SaveOutcome::Updated
        } else {
            self.records.push(record);
            SaveOutcome::Created
        };

        self.persist()?;
        Ok(outcome)
    }

    /// Removes the record with the given id. Idempotent: a missing id is not
    /// an error, just `false`.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Discards current contents and installs the given records verbatim.
    /// Shape validation happens when the payload is parsed; confirming the
    /// replacement with the user is the caller's job.
    pub fn replace_all(&mut self, records: Vec<CarRecord>) -> Result<()> {
        self.records = records;
        self.persist()
    }

    /// Complete re-importable snapshot of the store.
    pub fn serialize(&self) -> Result<String> {
        import::export_plain(&self.records)
    }

    /// Parses a snapshot and replaces the contents. Malformed text fails
    /// before anything is mutated.
    pub fn load(&mut self, text: &str) -> Result<()> {
        let records = import::parse_records(text)?;
        self.replace_all(records)
    }

    fn persist(&self) -> Result<()> {
        let snapshot = self.serialize()?;
        self.medium.write(RECORDS_KEY, &snapshot)
    }
}
