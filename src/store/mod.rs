//! Clinic data layer
//!
//! Persisted-entity storage for the clinic's collections:
//!
//! - **records**: Record kinds (Specialty, Patient, Clinician, Place, Appointment)
//! - **collection**: Generic `EntityStore` with id assignment and uniqueness
//! - **backend**: Key-value persistence (file directory or in-memory)
//! - **data**: Shared context bundling one store per kind
//! - **error**: Error types
//!
//! # Persistence model
//!
//! ```text
//! Mutation:
//!   validate → assign id → mutate in memory → rewrite whole collection
//!
//! Load:
//!   read collection key → deserialize array → counter = max id + 1
//!   (absent key → seed defaults for the kind)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cliniboard::store::{EntityStore, FileStore, Patient};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(FileStore::open("./clinic_data")?);
//!     let mut patients: EntityStore<Patient> = EntityStore::open(backend)?;
//!
//!     let ana = patients.add(Patient::new("Ana Silva"))?;
//!     println!("added patient {} with id {}", ana.name, ana.id);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod collection;
pub mod data;
pub mod error;
pub mod records;

// Re-export commonly used types
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use collection::EntityStore;
pub use data::ClinicData;
pub use error::{StoreError, StoreResult};
pub use records::{
    Appointment, Clinician, Patient, Place, Record, Specialty, MIN_APPOINTMENT_MINUTES,
};
