//! Entity record types for the clinic data layer
//!
//! This module defines the persisted record kinds and the `Record` contract
//! the generic store operates through:
//!
//! - `Specialty`, `Patient`, `Clinician`, `Place`, `Appointment`
//! - `Record`: identity, normalization, validation, and seeding per kind
//!
//! Relationships are plain integer foreign keys, unenforced at write time.
//! Display code resolves a dangling key to the kind's unknown label instead
//! of failing.

use crate::store::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Minimum appointment length in minutes
pub const MIN_APPOINTMENT_MINUTES: u32 = 15;

/// Contract every persisted record kind implements.
///
/// The generic store relies on this for id assignment, case-insensitive
/// uniqueness of the identifying field, and per-kind validation.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Collection key in the persistence backend (e.g. `"patients"`)
    const KIND: &'static str;

    /// Singular noun used in user-facing messages (e.g. `"patient"`)
    const NOUN: &'static str;

    /// Label returned when a foreign key fails to resolve
    const UNKNOWN_LABEL: &'static str;

    fn id(&self) -> u32;

    fn set_id(&mut self, id: u32);

    /// Identifying field for search and duplicate checks.
    ///
    /// `None` for kinds without one (appointments).
    fn identity(&self) -> Option<&str>;

    /// Trim user-entered text before validation.
    fn normalize(&mut self);

    /// Check required fields and value ranges.
    fn validate(&self) -> StoreResult<()>;

    /// Human-readable label for foreign-name resolution.
    fn label(&self) -> &str;

    /// Records a fresh (never-persisted) collection starts with.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

/// A medical specialty (e.g. cardiology)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specialty {
    /// Unique identifier, assigned by the store
    pub id: u32,
    /// Specialty name, unique case-insensitively
    pub name: String,
}

impl Specialty {
    /// Create a new specialty; the store assigns the id on add.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Record for Specialty {
    const KIND: &'static str = "specialties";
    const NOUN: &'static str = "specialty";
    const UNKNOWN_LABEL: &'static str = "Unknown specialty";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn identity(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn validate(&self) -> StoreResult<()> {
        if self.name.is_empty() {
            return Err(StoreError::required("specialty name"));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        vec![
            Specialty {
                id: 1,
                name: "Cardiology".to_string(),
            },
            Specialty {
                id: 2,
                name: "Dermatology".to_string(),
            },
            Specialty {
                id: 3,
                name: "Pediatrics".to_string(),
            },
        ]
    }
}

/// A clinic patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: u32,
    /// Patient name, unique case-insensitively
    pub name: String,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Record for Patient {
    const KIND: &'static str = "patients";
    const NOUN: &'static str = "patient";
    const UNKNOWN_LABEL: &'static str = "Unknown patient";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn identity(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn validate(&self) -> StoreResult<()> {
        if self.name.is_empty() {
            return Err(StoreError::required("patient name"));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// A clinician, tied to a specialty by foreign key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clinician {
    pub id: u32,
    /// Clinician name, unique case-insensitively
    pub name: String,
    /// Foreign key into the specialties collection (unenforced)
    pub specialty_id: u32,
}

impl Clinician {
    pub fn new(name: impl Into<String>, specialty_id: u32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            specialty_id,
        }
    }
}

impl Record for Clinician {
    const KIND: &'static str = "clinicians";
    const NOUN: &'static str = "clinician";
    const UNKNOWN_LABEL: &'static str = "Unknown clinician";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn identity(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn validate(&self) -> StoreResult<()> {
        if self.name.is_empty() {
            return Err(StoreError::required("clinician name"));
        }
        if self.specialty_id == 0 {
            return Err(StoreError::required("specialty"));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// A physical place in the clinic (consultation room, waiting room)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: u32,
    /// Place name, unique case-insensitively
    pub name: String,
    /// Creation timestamp, RFC 3339
    pub created_at: String,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

impl Record for Place {
    const KIND: &'static str = "places";
    const NOUN: &'static str = "place";
    const UNKNOWN_LABEL: &'static str = "Unknown place";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn identity(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn validate(&self) -> StoreResult<()> {
        if self.name.is_empty() {
            return Err(StoreError::required("place name"));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        let now = Utc::now().to_rfc3339();
        vec![
            Place {
                id: 1,
                name: "Room 1".to_string(),
                created_at: now.clone(),
            },
            Place {
                id: 2,
                name: "Room 2".to_string(),
                created_at: now.clone(),
            },
            Place {
                id: 3,
                name: "Waiting Room".to_string(),
                created_at: now,
            },
        ]
    }
}

/// A scheduled appointment linking a patient, specialty, and clinician
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u32,
    /// Foreign key into the patients collection (unenforced)
    pub patient_id: u32,
    /// Foreign key into the specialties collection (unenforced)
    pub specialty_id: u32,
    /// Foreign key into the clinicians collection (unenforced)
    pub clinician_id: u32,
    /// Scheduled date and time, stored as an opaque string
    /// (`YYYY-MM-DDTHH:MM` as entered); parsed only for display ordering
    pub datetime: String,
    /// Length in minutes, at least [`MIN_APPOINTMENT_MINUTES`]
    pub duration: u32,
    /// Creation timestamp, RFC 3339
    pub created_at: String,
}

impl Appointment {
    pub fn new(
        patient_id: u32,
        specialty_id: u32,
        clinician_id: u32,
        datetime: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            id: 0,
            patient_id,
            specialty_id,
            clinician_id,
            datetime: datetime.into(),
            duration,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Parse the stored timestamp for display ordering.
    ///
    /// Accepts the datetime-local form with and without seconds, and
    /// RFC 3339. Unparseable strings return `None` and sort last.
    pub fn parsed_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.datetime)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }
}

impl Record for Appointment {
    const KIND: &'static str = "appointments";
    const NOUN: &'static str = "appointment";
    const UNKNOWN_LABEL: &'static str = "Unknown appointment";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    // Appointments have no identifying name; duplicates are allowed.
    fn identity(&self) -> Option<&str> {
        None
    }

    fn normalize(&mut self) {
        self.datetime = self.datetime.trim().to_string();
    }

    fn validate(&self) -> StoreResult<()> {
        if self.patient_id == 0 {
            return Err(StoreError::required("patient"));
        }
        if self.specialty_id == 0 {
            return Err(StoreError::required("specialty"));
        }
        if self.clinician_id == 0 {
            return Err(StoreError::required("clinician"));
        }
        if self.datetime.is_empty() {
            return Err(StoreError::required("date and time"));
        }
        if self.duration < MIN_APPOINTMENT_MINUTES {
            return Err(StoreError::Validation(format!(
                "duration must be at least {} minutes",
                MIN_APPOINTMENT_MINUTES
            )));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        &self.datetime
    }
}
