use garage_core::domain::CarRecord;
use garage_core::errors::GarageError;
use garage_core::store::medium::{JsonFileMedium, MemoryMedium, StorageMedium, RECORDS_KEY};
use garage_core::store::{RecordStore, SaveOutcome};
use tempfile::TempDir;

fn memory_store() -> RecordStore {
    RecordStore::open(Box::new(MemoryMedium::new())).expect("open store")
}

fn car(name: &str, plate: &str) -> CarRecord {
    CarRecord::new(name, plate)
}

#[test]
fn list_length_tracks_distinct_ids() {
    let mut store = memory_store();
    for i in 0..5 {
        store
            .upsert(car(&format!("Car {i}"), &format!("PL {i}")), false)
            .unwrap();
    }
    assert_eq!(store.len(), 5);
}

#[test]
fn upsert_existing_id_never_grows_the_list() {
    let mut store = memory_store();
    let mut record = car("Daily", "AB12 CDE");
    let id = record.id;
    store.upsert(record.clone(), false).unwrap();

    for name in ["One", "Two", "Three"] {
        record.name = name.into();
        let outcome = store.upsert(record.clone(), false).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().name, name);
    }
}

#[test]
fn case_insensitive_plate_collision_returns_conflict() {
    let mut store = memory_store();
    let original = car("Daily", "AB12 CDE");
    let original_id = original.id;
    store.upsert(original, false).unwrap();

    let impostor = car("Impostor", "ab12 cde");
    let err = store.upsert(impostor.clone(), false).unwrap_err();
    let GarageError::PlateConflict { existing_id, plate } = err else {
        panic!("expected a plate conflict");
    };
    assert_eq!(existing_id, original_id);
    assert_eq!(plate, "ab12 cde");

    // Store unchanged until force-overwrite is applied.
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].name, "Daily");

    store.upsert(impostor, true).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].name, "Impostor");
}

#[test]
fn trimmed_plates_also_collide() {
    let mut store = memory_store();
    store.upsert(car("Daily", "AB12 CDE"), false).unwrap();
    let err = store.upsert(car("Padded", "  AB12 CDE  "), false);
    assert!(err.is_err());
}

#[test]
fn delete_twice_returns_false_without_error() {
    let mut store = memory_store();
    let record = car("Daily", "AB12 CDE");
    let id = record.id;
    store.upsert(record, false).unwrap();

    assert!(store.delete(id).unwrap());
    assert!(!store.delete(id).unwrap());
    assert_eq!(store.len(), 0);
}

#[test]
fn empty_store_round_trips_through_serialize() {
    let mut store = memory_store();
    let snapshot = store.serialize().unwrap();
    store.load(&snapshot).unwrap();
    assert!(store.is_empty());
}

#[test]
fn populated_store_round_trips_through_serialize() {
    let mut store = memory_store();
    let mut fancy = car("Weekend", "ZX98 YWV");
    fancy.vin = Some("WBA5R7C50LFH12345".into());
    fancy.price = Some("41,500".into());
    fancy.exterior_color = Some("portimao-blue".into());
    store.upsert(car("Daily", "AB12 CDE"), false).unwrap();
    store.upsert(fancy, false).unwrap();

    let snapshot = store.serialize().unwrap();
    let mut other = memory_store();
    other.load(&snapshot).unwrap();
    assert_eq!(other.list(), store.list());
}

#[test]
fn malformed_load_keeps_previous_contents() {
    let mut store = memory_store();
    store.upsert(car("Daily", "AB12 CDE"), false).unwrap();
    let before = store.list().to_vec();

    for bad in ["", "null", "{\"version\":1}", "[{\"name\":3}]", "garbage"] {
        assert!(store.load(bad).is_err(), "payload {bad:?} should fail");
        assert_eq!(store.list(), before.as_slice());
    }
}

#[test]
fn every_mutation_is_persisted_synchronously() {
    let temp = TempDir::new().expect("temp dir");
    let medium = JsonFileMedium::new(temp.path()).expect("medium");
    let mut store = RecordStore::open(Box::new(medium.clone())).unwrap();

    let record = car("Daily", "AB12 CDE");
    let id = record.id;
    store.upsert(record, false).unwrap();
    let on_disk = medium.read(RECORDS_KEY).unwrap().expect("records file");
    assert!(on_disk.contains("AB12 CDE"));

    store.delete(id).unwrap();
    let on_disk = medium.read(RECORDS_KEY).unwrap().expect("records file");
    assert_eq!(on_disk.trim(), "[]");

    store.replace_all(vec![car("Other", "CD34 EFG")]).unwrap();
    let reopened = RecordStore::open(Box::new(medium)).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.list()[0].name, "Other");
}

#[test]
fn open_rejects_a_corrupt_records_file() {
    let temp = TempDir::new().expect("temp dir");
    let medium = JsonFileMedium::new(temp.path()).expect("medium");
    medium.write(RECORDS_KEY, "not json at all").unwrap();
    let err = RecordStore::open(Box::new(medium)).unwrap_err();
    assert!(matches!(err, GarageError::MalformedData(_)));
}
