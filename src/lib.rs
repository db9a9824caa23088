//! # Cliniboard
//!
//! Clinic administration core - a navigation shell plus a local
//! persisted-entity data layer for patients, clinicians, specialties,
//! places, and appointments.
//!
//! ## Features
//!
//! - **Fragment routing**: the address fragment is the single source of
//!   navigation truth; stale in-flight navigations are discarded by
//!   generation number
//! - **View lifecycle**: each screen mounts once and refreshes on every
//!   (re)navigation, through a registry enforced at registration time
//! - **Local persistence**: one JSON-serialized array per entity kind
//!   in a key-value store, with monotonic id assignment and
//!   case-insensitive name uniqueness
//! - **Recoverable failures**: every load or store failure ends in a
//!   visible message and a way forward, never a crash
//!
//! ## Modules
//!
//! - [`store`]: Persisted entity collections and their backends
//! - [`shell`]: Navigation state machine, routes, and view contracts
//! - [`views`]: Per-screen presentation modules
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cliniboard::store::{ClinicData, FileStore, Patient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open every collection over a shared backend
//!     let backend = Arc::new(FileStore::open("./clinic_data")?);
//!     let data = ClinicData::open(backend)?;
//!
//!     // Register a patient
//!     let ana = data.patients.write().await.add(Patient::new("Ana Silva"))?;
//!     println!("added patient {} with id {}", ana.name, ana.id);
//!
//!     // Listing resolves foreign keys through display_name, which
//!     // falls back to an unknown label instead of failing
//!     let specialties = data.specialties.read().await;
//!     println!("{}", specialties.display_name(1));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod shell;
pub mod store;
pub mod views;

// Re-export top-level types for convenience
pub use store::{
    Appointment, ClinicData, Clinician, EntityStore, FileStore, KeyValueStore, MemoryStore,
    Patient, Place, Record, Specialty, StoreError, StoreResult,
};

pub use shell::{
    ChromeSurface, ConfirmSurface, DirMarkupSource, FlashSurface, MarkupSource, NavState, Route,
    Shell, ShellError, ShellResult, View, ViewContext, ViewId, ViewRegistry,
};

pub use views::{
    AppointmentsView, CliniciansView, PatientDetailView, PatientsView, PlacesView,
    SpecialtiesView, Views,
};

pub use config::{generate_default_config, Config, ConfigError};
