//! Generic persisted entity store
//!
//! One `EntityStore` instance owns one collection: it loads the full
//! JSON-serialized array from the backend on open (seeding defaults for a
//! never-persisted kind), keeps it in insertion order in memory, and
//! rewrites the whole array after every mutation.
//!
//! Id assignment is monotonic for the lifetime of the store: the counter
//! starts at max existing id + 1 and never decreases, so deleting the
//! newest record does not hand its id to the next insert.

use crate::store::backend::KeyValueStore;
use crate::store::error::{StoreError, StoreResult};
use crate::store::records::{Appointment, Clinician, Record};
use std::cmp::Ordering;
use std::sync::Arc;

/// CRUD over one persisted collection, specialized by record kind.
pub struct EntityStore<T: Record> {
    backend: Arc<dyn KeyValueStore>,
    records: Vec<T>,
    next_id: u32,
}

impl<T: Record> EntityStore<T> {
    /// Load the collection from the backend, seeding defaults when the
    /// kind has never been persisted.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> StoreResult<Self> {
        let records: Vec<T> = match backend.get(T::KIND)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => {
                let seeded = T::seed();
                if !seeded.is_empty() {
                    tracing::info!(
                        kind = T::KIND,
                        count = seeded.len(),
                        "seeding fresh collection"
                    );
                    backend.set(T::KIND, &serde_json::to_string(&seeded)?)?;
                }
                seeded
            }
        };

        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        tracing::debug!(kind = T::KIND, count = records.len(), "collection loaded");

        Ok(Self {
            backend,
            records,
            next_id,
        })
    }

    /// The full collection in insertion order.
    pub fn list(&self) -> &[T] {
        &self.records
    }

    /// Records whose identifying field case-insensitively contains
    /// `filter`, in insertion order. A blank filter matches everything.
    pub fn search(&self, filter: &str) -> Vec<&T> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| {
                r.identity()
                    .map(|name| name.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Look up a record by id.
    pub fn get(&self, id: u32) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate, assign the next id, append, and persist.
    ///
    /// Validation and duplicate failures leave the collection (and the
    /// id counter) untouched.
    pub fn add(&mut self, mut record: T) -> StoreResult<T> {
        record.normalize();
        record.validate()?;

        if let Some(name) = record.identity() {
            if self.identity_collides(name, None) {
                return Err(self.duplicate_error());
            }
        }

        record.set_id(self.next_id);
        self.next_id += 1;

        let stored = record.clone();
        self.records.push(record);
        self.persist()?;

        tracing::debug!(kind = T::KIND, id = stored.id(), "record added");
        Ok(stored)
    }

    /// Apply a mutation to the record with the given id, re-validate, and
    /// persist. The record itself is excluded from the duplicate check, so
    /// an edit that only changes the case of its own name succeeds.
    pub fn edit<F>(&mut self, id: u32, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T),
    {
        let idx = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| self.not_found(id))?;

        let mut updated = self.records[idx].clone();
        apply(&mut updated);
        // The id is not editable
        updated.set_id(id);
        updated.normalize();
        updated.validate()?;

        if let Some(name) = updated.identity() {
            if self.identity_collides(name, Some(id)) {
                return Err(self.duplicate_error());
            }
        }

        self.records[idx] = updated.clone();
        self.persist()?;

        tracing::debug!(kind = T::KIND, id, "record edited");
        Ok(updated)
    }

    /// Remove the record with the given id and persist.
    ///
    /// Never cascades: dependent records in other collections keep their
    /// (now dangling) foreign keys.
    pub fn delete(&mut self, id: u32) -> StoreResult<()> {
        if self.get(id).is_none() {
            return Err(self.not_found(id));
        }

        self.records.retain(|r| r.id() != id);
        self.persist()?;

        tracing::debug!(kind = T::KIND, id, "record deleted");
        Ok(())
    }

    /// Resolve an id to the record's label for display.
    ///
    /// Returns the kind's unknown label for an absent id — a dangling
    /// foreign key renders as "unknown", it never fails.
    pub fn display_name(&self, id: u32) -> String {
        self.get(id)
            .map(|r| r.label().to_string())
            .unwrap_or_else(|| T::UNKNOWN_LABEL.to_string())
    }

    fn identity_collides(&self, name: &str, exclude_id: Option<u32>) -> bool {
        let needle = name.to_lowercase();
        self.records.iter().any(|r| {
            exclude_id != Some(r.id())
                && r.identity()
                    .map(|existing| existing.to_lowercase() == needle)
                    .unwrap_or(false)
        })
    }

    fn duplicate_error(&self) -> StoreError {
        StoreError::Duplicate(format!("a {} with this name already exists", T::NOUN))
    }

    fn not_found(&self, id: u32) -> StoreError {
        StoreError::NotFound(format!("{} {}", T::NOUN, id))
    }

    fn persist(&self) -> StoreResult<()> {
        self.backend
            .set(T::KIND, &serde_json::to_string(&self.records)?)
    }
}

impl EntityStore<Clinician> {
    /// Clinicians offering the given specialty, in insertion order.
    pub fn with_specialty(&self, specialty_id: u32) -> Vec<&Clinician> {
        self.records
            .iter()
            .filter(|c| c.specialty_id == specialty_id)
            .collect()
    }
}

impl EntityStore<Appointment> {
    /// All appointments, newest first by scheduled time.
    pub fn sorted_for_display(&self) -> Vec<&Appointment> {
        sort_newest_first(self.records.iter().collect())
    }

    /// One patient's appointments, newest first by scheduled time.
    pub fn for_patient(&self, patient_id: u32) -> Vec<&Appointment> {
        sort_newest_first(
            self.records
                .iter()
                .filter(|a| a.patient_id == patient_id)
                .collect(),
        )
    }
}

/// Descending by parsed datetime; unparseable timestamps sink to the end.
fn sort_newest_first(mut items: Vec<&Appointment>) -> Vec<&Appointment> {
    items.sort_by(|a, b| match (a.parsed_datetime(), b.parsed_datetime()) {
        (Some(at), Some(bt)) => bt.cmp(&at),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{FileStore, MemoryStore};
    use crate::store::records::{Patient, Place, Specialty};
    use tempfile::tempdir;

    fn memory_backend() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    fn patient_store() -> EntityStore<Patient> {
        EntityStore::open(memory_backend()).unwrap()
    }

    #[test]
    fn test_ids_strictly_increase_across_deletes() {
        let mut store = patient_store();

        let a = store.add(Patient::new("Ana")).unwrap();
        let b = store.add(Patient::new("Bruno")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id).unwrap();

        // The freed id is not reassigned
        let c = store.add(Patient::new("Carla")).unwrap();
        assert_eq!(c.id, 3);

        let ids: Vec<u32> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitively() {
        let mut store = patient_store();
        store.add(Patient::new("Ana Silva")).unwrap();

        let err = store.add(Patient::new("ana silva")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Collection unchanged
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "Ana Silva");
    }

    #[test]
    fn test_add_delete_list_scenario() {
        let mut store = patient_store();

        let added = store.add(Patient::new("Ana Silva")).unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(added.name, "Ana Silva");

        assert!(matches!(
            store.add(Patient::new("ana silva")),
            Err(StoreError::Duplicate(_))
        ));

        store.delete(1).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_edit_excludes_self_from_duplicate_check() {
        let mut store: EntityStore<Specialty> = EntityStore::open(memory_backend()).unwrap();
        let cardio = store.add(Specialty::new("Cardio")).unwrap();
        store.add(Specialty::new("Derm")).unwrap();

        // Case-only rename of itself succeeds
        let renamed = store
            .edit(cardio.id, |s| s.name = "CARDIO".to_string())
            .unwrap();
        assert_eq!(renamed.name, "CARDIO");

        // Renaming onto a different record fails
        let err = store
            .edit(cardio.id, |s| s.name = "derm".to_string())
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.get(cardio.id).unwrap().name, "CARDIO");
    }

    #[test]
    fn test_edit_and_delete_absent_id() {
        let mut store = patient_store();
        assert!(matches!(
            store.edit(99, |p| p.name = "X".to_string()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete(99), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_display_name_falls_back_to_unknown() {
        let backend = memory_backend();
        let mut specialties: EntityStore<Specialty> = EntityStore::open(backend.clone()).unwrap();
        let mut clinicians: EntityStore<Clinician> = EntityStore::open(backend).unwrap();

        // Seeded specialty 1 resolves; after deletion the dependent
        // clinician's foreign key resolves to the sentinel.
        clinicians.add(Clinician::new("Dr. Reis", 1)).unwrap();
        assert_eq!(specialties.display_name(1), "Cardiology");

        specialties.delete(1).unwrap();
        let dangling = clinicians.list()[0].specialty_id;
        assert_eq!(specialties.display_name(dangling), "Unknown specialty");
    }

    #[test]
    fn test_list_after_add_roundtrips_through_backend() {
        let backend = memory_backend();

        {
            let mut store: EntityStore<Patient> = EntityStore::open(backend.clone()).unwrap();
            store.add(Patient::new("Ana Silva")).unwrap();
            store.add(Patient::new("Bruno Costa")).unwrap();
        }

        // A fresh load reproduces the same collection and keeps counting
        // from the highest persisted id.
        let mut reloaded: EntityStore<Patient> = EntityStore::open(backend).unwrap();
        let names: Vec<&str> = reloaded.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Silva", "Bruno Costa"]);

        let next = reloaded.add(Patient::new("Carla Dias")).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_file_backed_persistence() {
        let dir = tempdir().unwrap();

        {
            let backend: Arc<dyn KeyValueStore> =
                Arc::new(FileStore::open(dir.path()).unwrap());
            let mut store: EntityStore<Place> = EntityStore::open(backend).unwrap();
            store.add(Place::new("Surgery Annex")).unwrap();
        }

        let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let store: EntityStore<Place> = EntityStore::open(backend).unwrap();
        // Three seeded places plus the added one
        assert_eq!(store.len(), 4);
        assert_eq!(store.list()[3].name, "Surgery Annex");
    }

    #[test]
    fn test_seeded_specialties_on_fresh_backend() {
        let mut store: EntityStore<Specialty> = EntityStore::open(memory_backend()).unwrap();
        let names: Vec<&str> = store.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Cardiology", "Dermatology", "Pediatrics"]);

        let added = store.add(Specialty::new("Neurology")).unwrap();
        assert_eq!(added.id, 4);
    }

    #[test]
    fn test_search_is_case_insensitive_contains() {
        let mut store = patient_store();
        store.add(Patient::new("Ana Silva")).unwrap();
        store.add(Patient::new("Bruno Costa")).unwrap();
        store.add(Patient::new("Silvana Dias")).unwrap();

        let hits = store.search("silva");
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Silva", "Silvana Dias"]);

        assert_eq!(store.search("  ").len(), 3);
        assert!(store.search("zzz").is_empty());
    }

    #[test]
    fn test_validation_failure_leaves_store_unchanged() {
        let mut store = patient_store();
        assert!(matches!(
            store.add(Patient::new("   ")),
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());

        // The counter did not advance
        let first = store.add(Patient::new("Ana")).unwrap();
        assert_eq!(first.id, 1);
    }

    #[test]
    fn test_appointment_store_validates_schedule() {
        let mut store: EntityStore<Appointment> = EntityStore::open(memory_backend()).unwrap();

        let err = store
            .add(Appointment::new(1, 1, 1, "2024-03-01T10:00", 10))
            .unwrap_err();
        assert!(err.to_string().contains("at least 15 minutes"));
        assert!(store.is_empty());

        let ok = store
            .add(Appointment::new(1, 1, 1, "2024-03-01T10:00", 15))
            .unwrap();
        assert_eq!(ok.id, 1);
    }

    #[test]
    fn test_appointments_sort_newest_first() {
        let mut store: EntityStore<Appointment> = EntityStore::open(memory_backend()).unwrap();
        store
            .add(Appointment::new(1, 1, 1, "2024-03-01T09:00", 30))
            .unwrap();
        store
            .add(Appointment::new(1, 1, 1, "garbled", 30))
            .unwrap();
        store
            .add(Appointment::new(2, 1, 1, "2024-03-02T09:00", 30))
            .unwrap();

        let sorted = store.sorted_for_display();
        let times: Vec<&str> = sorted.iter().map(|a| a.datetime.as_str()).collect();
        assert_eq!(times, vec!["2024-03-02T09:00", "2024-03-01T09:00", "garbled"]);

        let mine = store.for_patient(1);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].datetime, "2024-03-01T09:00");
    }

    #[test]
    fn test_clinicians_filtered_by_specialty() {
        let mut store: EntityStore<Clinician> = EntityStore::open(memory_backend()).unwrap();
        store.add(Clinician::new("Dr. Reis", 1)).unwrap();
        store.add(Clinician::new("Dr. Melo", 2)).unwrap();
        store.add(Clinician::new("Dr. Faria", 1)).unwrap();

        let cardiologists = store.with_specialty(1);
        let names: Vec<&str> = cardiologists.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Reis", "Dr. Faria"]);
        assert!(store.with_specialty(9).is_empty());
    }
}
