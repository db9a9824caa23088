//! Patient detail view
//!
//! Keyed by the route's second fragment segment: shows one patient and
//! their appointments, newest first, and creates appointments for that
//! patient. A param that resolves to no patient renders a not-found
//! body instead of failing.

use crate::shell::{View, ViewContext, ViewId};
use crate::store::Appointment;
use crate::views::schedule_label;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct PatientDetailView {
    ctx: Arc<ViewContext>,
    /// Patient shown by the last refresh, the target for `schedule`.
    current: RwLock<Option<u32>>,
}

impl PatientDetailView {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self {
            ctx,
            current: RwLock::new(None),
        }
    }

    /// Create an appointment for the patient currently shown.
    pub async fn schedule(
        &self,
        specialty_id: u32,
        clinician_id: u32,
        datetime: &str,
        duration: u32,
    ) {
        let patient_id = match *self.current.read().await {
            Some(id) => id,
            None => {
                self.ctx.flash.flash("No patient selected");
                return;
            }
        };

        let appointment =
            Appointment::new(patient_id, specialty_id, clinician_id, datetime, duration);
        let result = self.ctx.data.appointments.write().await.add(appointment);
        match result {
            Ok(_) => {
                self.ctx.flash.flash("Appointment created");
                self.render(Some(patient_id)).await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    async fn render(&self, param: Option<u32>) {
        let patient = match param {
            Some(id) => self.ctx.data.patients.read().await.get(id).cloned(),
            None => None,
        };

        let patient = match patient {
            Some(patient) => patient,
            None => {
                *self.current.write().await = None;
                self.ctx.chrome.fill("patient-detail", "Patient not found.");
                return;
            }
        };
        *self.current.write().await = Some(patient.id);

        let appointments = self.ctx.data.appointments.read().await;
        let specialties = self.ctx.data.specialties.read().await;
        let clinicians = self.ctx.data.clinicians.read().await;

        let mine = appointments.for_patient(patient.id);
        let schedule = if mine.is_empty() {
            "No appointments for this patient yet.".to_string()
        } else {
            mine.iter()
                .map(|a| {
                    format!(
                        "{}  {} with {} ({} min)",
                        schedule_label(a),
                        specialties.display_name(a.specialty_id),
                        clinicians.display_name(a.clinician_id),
                        a.duration
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(clinicians);
        drop(specialties);
        drop(appointments);

        let body = format!("#{}  {}\n\nAppointments:\n{}", patient.id, patient.name, schedule);
        self.ctx.chrome.fill("patient-detail", &body);
    }
}

#[async_trait]
impl View for PatientDetailView {
    fn id(&self) -> ViewId {
        ViewId::PatientDetail
    }

    async fn refresh(&self, param: Option<u32>) {
        self.render(param).await;
    }
}
