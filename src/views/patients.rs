//! Patients view
//!
//! Patient management: list, add, rename through a prompt, confirmed
//! delete, and appointment creation for a patient. When scheduling, the
//! specialty choice narrows the clinician choice to that specialty.

use crate::shell::{View, ViewContext, ViewId};
use crate::store::{Appointment, Clinician, Patient};
use async_trait::async_trait;
use std::sync::Arc;

pub struct PatientsView {
    ctx: Arc<ViewContext>,
}

impl PatientsView {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self { ctx }
    }

    pub async fn add(&self, name: &str) {
        let result = self.ctx.data.patients.write().await.add(Patient::new(name));
        match result {
            Ok(patient) => {
                self.ctx
                    .flash
                    .flash(&format!("Patient \"{}\" added", patient.name));
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    /// Rename through the prompt surface. Cancelling the prompt leaves
    /// the record untouched; the duplicate check excludes the patient
    /// itself, so a case-only rename goes through.
    pub async fn rename(&self, id: u32) {
        let current = match self.ctx.data.patients.read().await.get(id) {
            Some(patient) => patient.name.clone(),
            None => {
                self.ctx.flash.flash(&format!("Not found: patient {}", id));
                return;
            }
        };

        let answer = match self
            .ctx
            .confirm
            .prompt(&format!("New name for \"{}\":", current))
        {
            Some(answer) => answer,
            None => return,
        };

        let result = self
            .ctx
            .data
            .patients
            .write()
            .await
            .edit(id, |p| p.name = answer);
        match result {
            Ok(patient) => {
                self.ctx
                    .flash
                    .flash(&format!("Patient renamed to \"{}\"", patient.name));
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    pub async fn remove(&self, id: u32) {
        let name = self.ctx.data.patients.read().await.display_name(id);
        let question = format!("Delete patient \"{}\"?", name);
        if !self.ctx.confirm.confirm(&question) {
            return;
        }

        let result = self.ctx.data.patients.write().await.delete(id);
        match result {
            Ok(()) => {
                self.ctx.flash.flash("Patient deleted");
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    /// Clinicians offering the chosen specialty, for the scheduling
    /// form's clinician choice.
    pub async fn clinician_choices(&self, specialty_id: u32) -> Vec<Clinician> {
        self.ctx
            .data
            .clinicians
            .read()
            .await
            .with_specialty(specialty_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Create an appointment for a patient. The stores validate the
    /// foreign keys, timestamp, and minimum duration.
    pub async fn schedule(
        &self,
        patient_id: u32,
        specialty_id: u32,
        clinician_id: u32,
        datetime: &str,
        duration: u32,
    ) {
        let appointment =
            Appointment::new(patient_id, specialty_id, clinician_id, datetime, duration);
        let result = self.ctx.data.appointments.write().await.add(appointment);
        match result {
            Ok(_) => self.ctx.flash.flash("Appointment created"),
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    async fn render(&self) {
        let store = self.ctx.data.patients.read().await;
        let body = if store.is_empty() {
            "No patients registered. Add the first patient.".to_string()
        } else {
            store
                .list()
                .iter()
                .map(|p| format!("#{}  {}", p.id, p.name))
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(store);

        self.ctx.chrome.fill("patients-list", &body);
    }
}

#[async_trait]
impl View for PatientsView {
    fn id(&self) -> ViewId {
        ViewId::Patients
    }

    async fn refresh(&self, _param: Option<u32>) {
        self.render().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::surface::fakes::{FakeChrome, FakeConfirm, FakeFlash};
    use crate::store::{ClinicData, MemoryStore};

    struct Fixture {
        view: PatientsView,
        ctx: Arc<ViewContext>,
        chrome: Arc<FakeChrome>,
        flash: Arc<FakeFlash>,
        confirm: Arc<FakeConfirm>,
    }

    fn fixture() -> Fixture {
        let chrome = Arc::new(FakeChrome::new());
        let flash = Arc::new(FakeFlash::new());
        let confirm = Arc::new(FakeConfirm::new());
        let ctx = Arc::new(ViewContext {
            data: Arc::new(ClinicData::open(Arc::new(MemoryStore::new())).unwrap()),
            chrome: chrome.clone(),
            flash: flash.clone(),
            confirm: confirm.clone(),
        });
        Fixture {
            view: PatientsView::new(ctx.clone()),
            ctx,
            chrome,
            flash,
            confirm,
        }
    }

    #[tokio::test]
    async fn test_empty_list_invites_the_first_patient() {
        let f = fixture();
        f.view.refresh(None).await;
        assert_eq!(
            f.chrome.last_slot("patients-list").unwrap(),
            "No patients registered. Add the first patient."
        );
    }

    #[tokio::test]
    async fn test_add_then_duplicate() {
        let f = fixture();
        f.view.add("Ana Silva").await;
        assert_eq!(f.flash.last().as_deref(), Some("Patient \"Ana Silva\" added"));

        f.view.add("ana silva").await;
        assert!(f.flash.last().unwrap().contains("already exists"));
        assert_eq!(f.chrome.last_slot("patients-list").unwrap(), "#1  Ana Silva");
    }

    #[tokio::test]
    async fn test_rename_through_prompt() {
        let f = fixture();
        f.view.add("Ana Silva").await;

        f.confirm.push_prompt(Some("Ana SILVA"));
        f.view.rename(1).await;

        assert_eq!(
            f.confirm.questions().last().unwrap(),
            "New name for \"Ana Silva\":"
        );
        assert_eq!(
            f.flash.last().as_deref(),
            Some("Patient renamed to \"Ana SILVA\"")
        );
    }

    #[tokio::test]
    async fn test_rename_onto_another_patient_is_rejected() {
        let f = fixture();
        f.view.add("Ana Silva").await;
        f.view.add("Bruno Costa").await;

        f.confirm.push_prompt(Some("ANA SILVA"));
        f.view.rename(2).await;

        assert!(f.flash.last().unwrap().contains("already exists"));
        let body = f.chrome.last_slot("patients-list").unwrap();
        assert!(body.contains("Bruno Costa"));
    }

    #[tokio::test]
    async fn test_cancelled_prompt_changes_nothing() {
        let f = fixture();
        f.view.add("Ana Silva").await;

        f.confirm.push_prompt(None);
        f.view.rename(1).await;

        assert_eq!(f.flash.last().as_deref(), Some("Patient \"Ana Silva\" added"));
    }

    #[tokio::test]
    async fn test_remove_names_the_patient_in_the_question() {
        let f = fixture();
        f.view.add("Ana Silva").await;
        f.view.remove(1).await;

        assert_eq!(
            f.confirm.questions().last().unwrap(),
            "Delete patient \"Ana Silva\"?"
        );
        assert_eq!(
            f.chrome.last_slot("patients-list").unwrap(),
            "No patients registered. Add the first patient."
        );
    }

    #[tokio::test]
    async fn test_clinician_choices_narrow_by_specialty() {
        let f = fixture();
        {
            let mut clinicians = f.ctx.data.clinicians.write().await;
            clinicians.add(Clinician::new("Dr. Reis", 1)).unwrap();
            clinicians.add(Clinician::new("Dr. Melo", 2)).unwrap();
        }

        let choices = f.view.clinician_choices(1).await;
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].name, "Dr. Reis");
        assert!(f.view.clinician_choices(3).await.is_empty());
    }

    #[tokio::test]
    async fn test_schedule_enforces_minimum_duration() {
        let f = fixture();
        f.view.add("Ana Silva").await;
        {
            let mut clinicians = f.ctx.data.clinicians.write().await;
            clinicians.add(Clinician::new("Dr. Reis", 1)).unwrap();
        }

        f.view.schedule(1, 1, 1, "2024-03-01T10:00", 10).await;
        assert!(f.flash.last().unwrap().contains("at least 15 minutes"));

        f.view.schedule(1, 1, 1, "2024-03-01T10:00", 15).await;
        assert_eq!(f.flash.last().as_deref(), Some("Appointment created"));
        assert_eq!(f.ctx.data.appointments.read().await.len(), 1);
    }
}
