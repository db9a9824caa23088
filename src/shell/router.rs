//! Navigation shell
//!
//! The shell keeps exactly one view active at a time. The address
//! fragment is the single source of navigation truth: every fragment
//! change starts a navigation attempt, and programmatic navigation just
//! writes the fragment and lets the change notification drive the
//! loader once.
//!
//! Per attempt, strictly ordered: markup fetch → one-time mount →
//! refresh. Attempts are not serialized against each other; instead
//! every attempt takes a monotonically increasing generation number and
//! any stage completing after a newer attempt has started discards its
//! result. In-flight work is never aborted, only ignored on completion,
//! so a slow stale load can no longer overwrite a newer view.

use crate::shell::error::ShellError;
use crate::shell::route::{Route, ViewId};
use crate::shell::surface::{ChromeSurface, FlashSurface, MarkupSource};
use crate::shell::view::ViewRegistry;
use crate::store::KeyValueStore;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Persisted key holding the last selected fragment.
const CURRENT_PAGE_KEY: &str = "currentPage";
/// Persisted key holding the shutdown timestamp.
const LAST_VISIT_KEY: &str = "lastVisit";

/// Flash shown whenever a page fails to load.
const LOAD_FAILED_MESSAGE: &str = "The page could not be loaded. Please try again.";

/// Where the shell currently stands.
///
/// `Failed` keeps the fragment so the retry affordance can re-run the
/// same navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Loading(Route),
    Active(Route),
    Failed { fragment: String },
}

/// Orchestrates navigation over a registry of view modules.
pub struct Shell {
    registry: ViewRegistry,
    markup: Arc<dyn MarkupSource>,
    chrome: Arc<dyn ChromeSurface>,
    flash: Arc<dyn FlashSurface>,
    settings: Arc<dyn KeyValueStore>,
    default_view: ViewId,
    state: RwLock<NavState>,
    mounted: Mutex<HashSet<ViewId>>,
    generation: AtomicU64,
}

impl Shell {
    pub fn new(
        registry: ViewRegistry,
        markup: Arc<dyn MarkupSource>,
        chrome: Arc<dyn ChromeSurface>,
        flash: Arc<dyn FlashSurface>,
        settings: Arc<dyn KeyValueStore>,
        default_view: ViewId,
    ) -> Self {
        Self {
            registry,
            markup,
            chrome,
            flash,
            settings,
            default_view,
            state: RwLock::new(NavState::Idle),
            mounted: Mutex::new(HashSet::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Restore the last selected view, falling back to the default.
    pub async fn start(&self) {
        let fragment = match self.settings.get(CURRENT_PAGE_KEY) {
            Ok(Some(saved)) => saved,
            Ok(None) => self.default_view.as_str().to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved page, using default");
                self.default_view.as_str().to_string()
            }
        };
        tracing::info!(fragment = %fragment, "starting shell");
        self.on_fragment_changed(&fragment).await;
    }

    /// Programmatic navigation: writes the fragment and relies on the
    /// resulting change notification, so the loader runs exactly once.
    pub async fn navigate_to(&self, route: Route) {
        self.on_fragment_changed(&route.fragment()).await;
    }

    /// Fragment-change handler, the single entry into the loader.
    ///
    /// An empty fragment falls back to the configured default view.
    pub async fn on_fragment_changed(&self, fragment: &str) {
        let fragment = fragment.trim_start_matches('#').trim();
        let route = if fragment.is_empty() {
            Route::new(self.default_view)
        } else {
            match Route::parse(fragment) {
                Some(route) => route,
                None => {
                    let err = ShellError::ContentLoad(format!("unknown view \"{}\"", fragment));
                    self.fail(fragment, &err).await;
                    return;
                }
            }
        };

        let attempt = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().await = NavState::Loading(route);
        tracing::info!(route = %route, attempt, "navigation started");

        self.attempt(route, attempt).await;
    }

    /// Re-run the navigation a `Failed` state is bound to. No-op in any
    /// other state.
    pub async fn retry(&self) {
        let fragment = match &*self.state.read().await {
            NavState::Failed { fragment } => fragment.clone(),
            _ => return,
        };
        tracing::info!(fragment = %fragment, "retrying failed navigation");
        self.on_fragment_changed(&fragment).await;
    }

    pub async fn state(&self) -> NavState {
        self.state.read().await.clone()
    }

    /// Record the visit timestamp before the application exits.
    pub async fn shutdown(&self) {
        if let Err(err) = self.settings.set(LAST_VISIT_KEY, &Utc::now().to_rfc3339()) {
            tracing::warn!(error = %err, "could not record last visit");
        }
        tracing::info!("shell shut down");
    }

    /// One navigation attempt: markup, chrome, mount, refresh. Checks
    /// the generation after every await point and discards a superseded
    /// attempt instead of rendering it.
    async fn attempt(&self, route: Route, attempt: u64) {
        let markup = match self.markup.fetch(&route.view.markup_path()).await {
            Ok(markup) => markup,
            Err(err) => {
                if self.is_stale(attempt) {
                    tracing::debug!(route = %route, attempt, "stale attempt discarded");
                    return;
                }
                self.fail(&route.fragment(), &err).await;
                return;
            }
        };
        if self.is_stale(attempt) {
            tracing::debug!(route = %route, attempt, "stale attempt discarded");
            return;
        }

        self.chrome.set_content(&markup);
        self.chrome.set_active_nav(route.view);
        self.chrome.set_title(route.view.title());
        if let Err(err) = self.settings.set(CURRENT_PAGE_KEY, &route.fragment()) {
            tracing::warn!(error = %err, "could not persist current page");
        }

        match self.registry.get(route.view) {
            None => {
                // Markup stays rendered as a degraded, non-interactive view.
                let err =
                    ShellError::ScriptLoad(format!("no view module registered for \"{}\"", route.view));
                tracing::warn!(route = %route, error = %err, "rendering degraded view");
            }
            Some(view) => {
                if self.mounted.lock().await.insert(route.view) {
                    tracing::debug!(view = %route.view, "mounting view");
                    view.mount().await;
                }
                if self.is_stale(attempt) {
                    tracing::debug!(route = %route, attempt, "stale attempt discarded");
                    return;
                }
                view.refresh(route.param).await;
            }
        }

        if self.is_stale(attempt) {
            tracing::debug!(route = %route, attempt, "stale attempt discarded");
            return;
        }
        *self.state.write().await = NavState::Active(route);
        tracing::info!(route = %route, "navigation complete");
    }

    async fn fail(&self, fragment: &str, err: &ShellError) {
        tracing::error!(fragment = %fragment, error = %err, "navigation failed");
        self.chrome.render_error(fragment, &err.to_string());
        self.flash.flash(LOAD_FAILED_MESSAGE);
        *self.state.write().await = NavState::Failed {
            fragment: fragment.to_string(),
        };
    }

    fn is_stale(&self, attempt: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != attempt
    }
}
