//! Clinicians view
//!
//! Lists clinicians with their specialty resolved by name. A clinician
//! whose specialty was deleted keeps the dangling foreign key and shows
//! the unknown label instead.

use crate::shell::{View, ViewContext, ViewId};
use crate::store::Clinician;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CliniciansView {
    ctx: Arc<ViewContext>,
}

impl CliniciansView {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self { ctx }
    }

    /// Add a clinician tied to an existing specialty choice.
    pub async fn add(&self, name: &str, specialty_id: u32) {
        let result = self
            .ctx
            .data
            .clinicians
            .write()
            .await
            .add(Clinician::new(name, specialty_id));
        match result {
            Ok(clinician) => {
                self.ctx
                    .flash
                    .flash(&format!("Clinician \"{}\" added", clinician.name));
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    async fn render(&self) {
        let clinicians = self.ctx.data.clinicians.read().await;
        let specialties = self.ctx.data.specialties.read().await;

        let body = if clinicians.is_empty() {
            "No clinicians registered. Add the first clinician.".to_string()
        } else {
            clinicians
                .list()
                .iter()
                .map(|c| {
                    format!(
                        "#{}  {} ({})",
                        c.id,
                        c.name,
                        specialties.display_name(c.specialty_id)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(specialties);
        drop(clinicians);

        self.ctx.chrome.fill("clinicians-list", &body);
    }
}

#[async_trait]
impl View for CliniciansView {
    fn id(&self) -> ViewId {
        ViewId::Clinicians
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
        view: CliniciansView,
        ctx: Arc<ViewContext>,
        chrome: Arc<FakeChrome>,
        flash: Arc<FakeFlash>,
    }

    fn fixture() -> Fixture {
        let chrome = Arc::new(FakeChrome::new());
        let flash = Arc::new(FakeFlash::new());
        let ctx = Arc::new(ViewContext {
            data: Arc::new(ClinicData::open(Arc::new(MemoryStore::new())).unwrap()),
            chrome: chrome.clone(),
            flash: flash.clone(),
            confirm: Arc::new(FakeConfirm::new()),
        });
        Fixture {
            view: CliniciansView::new(ctx.clone()),
            ctx,
            chrome,
            flash,
        }
    }

    #[tokio::test]
    async fn test_refresh_resolves_specialty_names() {
        let f = fixture();
        f.view.add("Dr. Reis", 1).await;
        f.view.refresh(None).await;

        assert_eq!(
            f.chrome.last_slot("clinicians-list").unwrap(),
            "#1  Dr. Reis (Cardiology)"
        );
    }

    #[tokio::test]
    async fn test_deleted_specialty_renders_unknown() {
        let f = fixture();
        f.view.add("Dr. Reis", 1).await;
        f.ctx.data.specialties.write().await.delete(1).unwrap();
        f.view.refresh(None).await;

        assert_eq!(
            f.chrome.last_slot("clinicians-list").unwrap(),
            "#1  Dr. Reis (Unknown specialty)"
        );
    }

    #[tokio::test]
    async fn test_add_requires_a_specialty_choice() {
        let f = fixture();
        f.view.add("Dr. Reis", 0).await;
        assert!(f.flash.last().unwrap().contains("specialty is required"));
        assert!(f.ctx.data.clinicians.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_requires_a_name() {
        let f = fixture();
        f.view.add("   ", 1).await;
        assert!(f.flash.last().unwrap().contains("clinician name is required"));
    }
}
