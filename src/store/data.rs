//! Shared clinic data context
//!
//! One store per entity kind, opened over a common key-value backend and
//! wrapped for shared access from the shell and every view. All access is
//! from the single UI-driving task; the locks serialize the read-modify-
//! write cycles of individual user actions.

use crate::store::backend::KeyValueStore;
use crate::store::collection::EntityStore;
use crate::store::error::StoreResult;
use crate::store::records::{Appointment, Clinician, Patient, Place, Specialty};
use std::sync::Arc;
use tokio::sync::RwLock;

/// All five entity stores plus the backend they persist through.
pub struct ClinicData {
    pub specialties: RwLock<EntityStore<Specialty>>,
    pub patients: RwLock<EntityStore<Patient>>,
    pub clinicians: RwLock<EntityStore<Clinician>>,
    pub places: RwLock<EntityStore<Place>>,
    pub appointments: RwLock<EntityStore<Appointment>>,
    backend: Arc<dyn KeyValueStore>,
}

impl ClinicData {
    /// Open every collection over the given backend, seeding the kinds
    /// that have never been persisted.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> StoreResult<Self> {
        Ok(Self {
            specialties: RwLock::new(EntityStore::open(backend.clone())?),
            patients: RwLock::new(EntityStore::open(backend.clone())?),
            clinicians: RwLock::new(EntityStore::open(backend.clone())?),
            places: RwLock::new(EntityStore::open(backend.clone())?),
            appointments: RwLock::new(EntityStore::open(backend.clone())?),
            backend,
        })
    }

    /// The backend shared by all collections, also used for the shell's
    /// convenience keys.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }
}
