//! Appointments view
//!
//! Read-only listing of every appointment, newest first, with the
//! patient, specialty, and clinician resolved by name. Dangling foreign
//! keys render as unknown rather than failing the listing.

use crate::shell::{View, ViewContext, ViewId};
use crate::views::schedule_label;
use async_trait::async_trait;
use std::sync::Arc;

pub struct AppointmentsView {
    ctx: Arc<ViewContext>,
}

impl AppointmentsView {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self { ctx }
    }

    async fn render(&self) {
        let appointments = self.ctx.data.appointments.read().await;
        let patients = self.ctx.data.patients.read().await;
        let specialties = self.ctx.data.specialties.read().await;
        let clinicians = self.ctx.data.clinicians.read().await;

        let sorted = appointments.sorted_for_display();
        let body = if sorted.is_empty() {
            "No appointments scheduled.".to_string()
        } else {
            sorted
                .iter()
                .map(|a| {
                    format!(
                        "{}  {} with {} ({}, {} min)",
                        schedule_label(a),
                        patients.display_name(a.patient_id),
                        clinicians.display_name(a.clinician_id),
                        specialties.display_name(a.specialty_id),
                        a.duration
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(clinicians);
        drop(specialties);
        drop(patients);
        drop(appointments);

        self.ctx.chrome.fill("appointments-list", &body);
    }
}

#[async_trait]
impl View for AppointmentsView {
    fn id(&self) -> ViewId {
        ViewId::Appointments
    }

    async fn refresh(&self, _param: Option<u32>) {
        self.render().await;
    }
}
