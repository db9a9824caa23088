//! Places view
//!
//! List/search over the clinic's rooms and waiting areas, with add and
//! confirmed delete. Each place shows the date it was registered.

use crate::shell::{View, ViewContext, ViewId};
use crate::store::Place;
use async_trait::async_trait;
use chrono::DateTime;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct PlacesView {
    ctx: Arc<ViewContext>,
    filter: RwLock<String>,
}

impl PlacesView {
    pub fn new(ctx: Arc<ViewContext>) -> Self {
        Self {
            ctx,
            filter: RwLock::new(String::new()),
        }
    }

    pub async fn set_filter(&self, text: &str) {
        *self.filter.write().await = text.to_string();
        self.render().await;
    }

    pub async fn add(&self, name: &str) {
        let result = self.ctx.data.places.write().await.add(Place::new(name));
        match result {
            Ok(place) => {
                self.ctx.flash.flash(&format!("Place \"{}\" added", place.name));
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    pub async fn remove(&self, id: u32) {
        let name = self.ctx.data.places.read().await.display_name(id);
        let question = format!("Delete place \"{}\"?", name);
        if !self.ctx.confirm.confirm(&question) {
            return;
        }

        let result = self.ctx.data.places.write().await.delete(id);
        match result {
            Ok(()) => {
                self.ctx.flash.flash("Place deleted");
                self.render().await;
            }
            Err(err) => self.ctx.flash.flash(&err.to_string()),
        }
    }

    async fn render(&self) {
        let filter = self.filter.read().await.clone();
        let store = self.ctx.data.places.read().await;
        let hits = store.search(&filter);

        let body = if hits.is_empty() {
            "No places registered. Add the first place.".to_string()
        } else {
            hits.iter()
                .map(|p| format!("#{}  {} (created {})", p.id, p.name, created_label(p)))
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(store);

        self.ctx.chrome.fill("places-list", &body);
    }
}

/// Date part of the creation timestamp; unparseable stamps render raw.
fn created_label(place: &Place) -> String {
    DateTime::parse_from_rfc3339(&place.created_at)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| place.created_at.clone())
}

#[async_trait]
impl View for PlacesView {
    fn id(&self) -> ViewId {
        ViewId::Places
    }

    async fn refresh(&self, _param: Option<u32>) {
        self.render().await;
    }
}
