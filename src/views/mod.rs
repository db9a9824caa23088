//! Per-screen presentation modules
//!
//! Each view is a thin layer over one or more entity stores: `refresh`
//! pulls the data and renders it into the chrome's content region, and
//! the action methods validate through the stores, report outcomes over
//! the flash surface, and re-render. Destructive actions go through the
//! confirm surface first.

mod appointments;
mod clinicians;
mod patient_detail;
mod patients;
mod places;
mod specialties;

pub use appointments::AppointmentsView;
pub use clinicians::CliniciansView;
pub use patient_detail::PatientDetailView;
pub use patients::PatientsView;
pub use places::PlacesView;
pub use specialties::SpecialtiesView;

use crate::shell::{ViewContext, ViewRegistry};
use crate::store::Appointment;
use std::sync::Arc;

/// Shared handles to every standard screen.
///
/// The same instances back the shell's registry and any direct caller,
/// so per-view state (filters, the selected patient) stays consistent.
pub struct Views {
    pub specialties: Arc<SpecialtiesView>,
    pub patients: Arc<PatientsView>,
    pub clinicians: Arc<CliniciansView>,
    pub places: Arc<PlacesView>,
    pub appointments: Arc<AppointmentsView>,
    pub patient_detail: Arc<PatientDetailView>,
}

impl Views {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self {
            specialties: Arc::new(SpecialtiesView::new(ctx.clone())),
            patients: Arc::new(PatientsView::new(ctx.clone())),
            clinicians: Arc::new(CliniciansView::new(ctx.clone())),
            places: Arc::new(PlacesView::new(ctx.clone())),
            appointments: Arc::new(AppointmentsView::new(ctx.clone())),
            patient_detail: Arc::new(PatientDetailView::new(ctx)),
        }
    }

    /// Registry with every standard screen registered.
    pub fn registry(&self) -> ViewRegistry {
        let mut registry = ViewRegistry::new();
        registry.register(Box::new(self.specialties.clone()));
        registry.register(Box::new(self.patients.clone()));
        registry.register(Box::new(self.clinicians.clone()));
        registry.register(Box::new(self.places.clone()));
        registry.register(Box::new(self.appointments.clone()));
        registry.register(Box::new(self.patient_detail.clone()));
        registry
    }
}

/// Display label for an appointment's scheduled time. Unparseable
/// timestamps render verbatim.
pub(crate) fn schedule_label(appointment: &Appointment) -> String {
    match appointment.parsed_datetime() {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => appointment.datetime.clone(),
    }
}
