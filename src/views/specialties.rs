//! Specialties view
//!
//! List/search cards over the specialties collection, with validated
//! add and confirmed delete. Deleting a specialty never cascades;
//! clinicians and appointments that reference it keep their foreign key
//! and render it as unknown.

use crate::shell::{View, ViewContext, ViewId};
use crate::store::Specialty;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct SpecialtiesView {
    ctx: Arc<ViewContext>,
    filter: RwLock<String>,
}

impl SpecialtiesView {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self {
            ctx,
            filter: RwLock::new(String::new()),
        }
    }

    /// Narrow the list to names containing `text` and re-render.
    pub async fn set_filter(&self, text: &str) {
        *self.filter.write().await = text.to_string();
        self.render().await;
    }

    pub async fn add(&self, name: &str) {
        let result = self.ctx.data.specialties.write().await.add(Specialty::new(name));
        match result {
            Ok(specialty) => {
                self.ctx
                    .flash
                    .flash(&format!("Specialty \"{}\" added", specialty.name));
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    pub async fn remove(&self, id: u32) {
        let name = self.ctx.data.specialties.read().await.display_name(id);
        let question = format!("Delete specialty \"{}\"?", name);
        if !self.ctx.confirm.confirm(&question) {
            return;
        }

        let result = self.ctx.data.specialties.write().await.delete(id);
        match result {
            Ok(()) => {
                self.ctx.flash.flash("Specialty deleted");
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    async fn render(&self) {
        let filter = self.filter.read().await.clone();
        let store = self.ctx.data.specialties.read().await;
        let hits = store.search(&filter);

        let body = if hits.is_empty() {
            "No specialties registered. Add the first specialty.".to_string()
        } else {
            hits.iter()
                .map(|s| format!("#{}  {}", s.id, s.name))
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(store);

        self.ctx.chrome.fill("specialties-list", &body);
    }
}

#[async_trait]
impl View for SpecialtiesView {
    fn id(&self) -> ViewId {
        ViewId::Specialties
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
        view: SpecialtiesView,
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
            view: SpecialtiesView::new(ctx),
            chrome,
            flash,
            confirm,
        }
    }

    #[tokio::test]
    async fn test_refresh_renders_seeded_specialties() {
        let f = fixture();
        f.view.refresh(None).await;

        let body = f.chrome.last_slot("specialties-list").unwrap();
        assert_eq!(body, "#1  Cardiology\n#2  Dermatology\n#3  Pediatrics");
    }

    #[tokio::test]
    async fn test_filter_narrows_the_list() {
        let f = fixture();
        f.view.set_filter("derm").await;
        assert_eq!(
            f.chrome.last_slot("specialties-list").unwrap(),
            "#2  Dermatology"
        );

        f.view.set_filter("").await;
        assert!(f
            .chrome
            .last_slot("specialties-list")
            .unwrap()
            .contains("Cardiology"));
    }

    #[tokio::test]
    async fn test_add_duplicate_flashes_error() {
        let f = fixture();
        f.view.add("cardiology").await;

        assert!(f.flash.last().unwrap().contains("already exists"));
        // Collection unchanged
        f.view.refresh(None).await;
        assert!(!f
            .chrome
            .last_slot("specialties-list")
            .unwrap()
            .contains("#4"));
    }

    #[tokio::test]
    async fn test_remove_asks_before_deleting() {
        let f = fixture();
        f.view.remove(2).await;

        assert_eq!(
            f.confirm.questions().last().unwrap(),
            "Delete specialty \"Dermatology\"?"
        );
        assert_eq!(f.flash.last().as_deref(), Some("Specialty deleted"));
        assert!(!f
            .chrome
            .last_slot("specialties-list")
            .unwrap()
            .contains("Dermatology"));
    }

    #[tokio::test]
    async fn test_declined_confirmation_keeps_the_record() {
        let f = fixture();
        f.confirm.push_confirm(false);
        f.view.remove(2).await;

        assert!(f.flash.messages().is_empty());
        f.view.refresh(None).await;
        assert!(f
            .chrome
            .last_slot("specialties-list")
            .unwrap()
            .contains("Dermatology"));
    }
}
