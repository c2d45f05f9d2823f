use std::sync::{Arc, Mutex};

use garage_core::domain::CarRecord;
use garage_core::errors::{GarageError, Result};
use garage_core::session::{EditSession, FormController};
use garage_core::store::draft::DraftStore;
use garage_core::store::medium::MemoryMedium;
use garage_core::store::RecordStore;
use garage_core::sync::CloudSync;

fn fixtures() -> (FormController, RecordStore, DraftStore) {
    (
        FormController::new(),
        RecordStore::open(Box::new(MemoryMedium::new())).unwrap(),
        DraftStore::new(Box::new(MemoryMedium::new())),
    )
}

fn fill_mandatory(controller: &mut FormController, name: &str, plate: &str) {
    controller.set_field("name", name).unwrap();
    controller.set_field("plate", plate).unwrap();
}

#[test]
fn first_save_creates_record_with_full_checklist() {
    let (mut controller, mut store, drafts) = fixtures();
    fill_mandatory(&mut controller, "Daily", "AB12 CDE");
    controller.set_checked("active-cruise", true).unwrap();

    let (record, _) = controller.save(&mut store, &drafts, false).unwrap();
    assert_eq!(store.len(), 1);
    assert!(record.checklist["active-cruise"].checked);
    // Unchecked schema features are present too, not absent.
    assert!(record.checklist.contains_key("sunroof"));
    assert!(!record.checklist["sunroof"].checked);

    let summary = controller.summarize();
    let driving = summary.iter().find(|p| p.key == "driving").unwrap();
    assert_eq!((driving.checked, driving.total), (1, 3));
}

#[test]
fn conflict_save_retried_with_force_overwrites() {
    let (mut controller, mut store, drafts) = fixtures();
    fill_mandatory(&mut controller, "First", "AB12 CDE");
    controller.save(&mut store, &drafts, false).unwrap();

    fill_mandatory(&mut controller, "Second", "ab12 cde");
    let err = controller.save(&mut store, &drafts, false).unwrap_err();
    assert!(matches!(err, GarageError::PlateConflict { .. }));
    assert_eq!(store.list()[0].name, "First");

    controller.save(&mut store, &drafts, true).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].name, "Second");
}

#[test]
fn load_clear_save_creates_a_fresh_record() {
    let (mut controller, mut store, drafts) = fixtures();
    fill_mandatory(&mut controller, "Daily", "AB12 CDE");
    let (saved, _) = controller.save(&mut store, &drafts, false).unwrap();

    controller.load(&store, saved.id).unwrap();
    assert_eq!(controller.session(), EditSession::Editing(saved.id));

    controller.clear(&drafts);
    assert_eq!(controller.session(), EditSession::New);

    fill_mandatory(&mut controller, "Track Car", "TR4 CKD");
    let (fresh, _) = controller.save(&mut store, &drafts, false).unwrap();
    assert_ne!(fresh.id, saved.id);
    assert_eq!(store.len(), 2);
    // The originally loaded record is untouched.
    assert_eq!(store.get(saved.id).unwrap().name, "Daily");
}

#[test]
fn load_restores_fields_and_checklist_state() {
    let (mut controller, mut store, drafts) = fixtures();
    fill_mandatory(&mut controller, "Daily", "AB12 CDE");
    controller.set_field("vin", "WBA5R7C50LFH12345").unwrap();
    controller.set_field("price", "41,500").unwrap();
    controller.set_field("exterior", "portimao-blue").unwrap();
    controller.set_checked("heated-seats", true).unwrap();
    let (saved, _) = controller.save(&mut store, &drafts, false).unwrap();

    let mut other = FormController::new();
    other.load(&store, saved.id).unwrap();
    assert_eq!(other.form().vin, "WBA5R7C50LFH12345");
    assert_eq!(other.form().price, "41,500");
    assert_eq!(other.form().exterior_color.as_deref(), Some("portimao-blue"));
    assert!(other.form().checked.contains("heated-seats"));
    assert!(!other.form().checked.contains("sunroof"));
}

#[test]
fn autosave_draft_survives_a_controller_restart() {
    let (mut controller, _store, drafts) = fixtures();
    fill_mandatory(&mut controller, "Daily", "AB12 CDE");
    controller.set_checked("wifi-hotspot", true).unwrap();
    controller.autosave(&drafts);

    let mut revived = FormController::new();
    assert!(revived.restore_draft(&drafts).unwrap());
    assert_eq!(revived.form().name, "Daily");
    assert!(revived.form().checked.contains("wifi-hotspot"));
}

#[test]
fn draft_is_dropped_after_a_successful_save() {
    let (mut controller, mut store, drafts) = fixtures();
    fill_mandatory(&mut controller, "Daily", "AB12 CDE");
    controller.autosave(&drafts);
    assert!(drafts.load().unwrap().is_some());

    controller.save(&mut store, &drafts, false).unwrap();
    assert!(drafts.load().unwrap().is_none());
}

#[test]
fn autosave_does_nothing_for_an_incomplete_form() {
    let (mut controller, _store, drafts) = fixtures();
    controller.set_field("name", "Only a name").unwrap();
    controller.autosave(&drafts);
    assert!(drafts.load().unwrap().is_none());
}

struct RecordingSync {
    pushes: Arc<Mutex<Vec<usize>>>,
}

impl CloudSync for RecordingSync {
    fn label(&self) -> &str {
        "recording"
    }

    fn push(&self, records: &[CarRecord]) -> Result<()> {
        self.pushes.lock().unwrap().push(records.len());
        Ok(())
    }
}

#[test]
fn configured_sync_backend_sees_saves_and_deletes() {
    let pushes = Arc::new(Mutex::new(Vec::new()));
    let mut controller = FormController::new().with_sync(Box::new(RecordingSync {
        pushes: pushes.clone(),
    }));
    let mut store = RecordStore::open(Box::new(MemoryMedium::new())).unwrap();
    let drafts = DraftStore::new(Box::new(MemoryMedium::new()));

    fill_mandatory(&mut controller, "Daily", "AB12 CDE");
    let (saved, _) = controller.save(&mut store, &drafts, false).unwrap();
    controller.delete(&mut store, &drafts, saved.id).unwrap();

    // One push with the saved record, one after the delete emptied the list.
    assert_eq!(*pushes.lock().unwrap(), vec![1, 0]);
}
