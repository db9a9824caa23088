//! View modules and the view registry
//!
//! Every navigable screen is a `View`: a presentation module the shell
//! mounts once per application lifetime and refreshes on every
//! (re)navigation. Views live in an explicit registry owned by the
//! shell, keyed by [`ViewId`], so the refresh contract is enforced at
//! registration time rather than discovered at call time.

use crate::shell::route::ViewId;
use crate::shell::surface::{ChromeSurface, ConfirmSurface, FlashSurface};
use crate::store::ClinicData;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handles every view renders and mutates through.
pub struct ViewContext {
    /// The five entity stores plus their backend.
    pub data: Arc<ClinicData>,
    /// Content region, navigation indicator, and title.
    pub chrome: Arc<dyn ChromeSurface>,
    /// Status messages.
    pub flash: Arc<dyn FlashSurface>,
    /// Blocking yes/no and text-input queries.
    pub confirm: Arc<dyn ConfirmSurface>,
}

/// A navigable screen's behavior module.
#[async_trait]
pub trait View: Send + Sync {
    /// The route segment this view answers to.
    fn id(&self) -> ViewId;

    /// One-time initialization, run on the first successful navigation
    /// to this view and never again.
    async fn mount(&self) {}

    /// Re-render into the chrome content region. Runs after every
    /// successful (re)navigation; `param` carries the optional second
    /// fragment segment.
    async fn refresh(&self, param: Option<u32>);
}

// Shared view instances register as clones; the registry and the rest
// of the application see the same module state.
#[async_trait]
impl<T> View for Arc<T>
where
    T: View + ?Sized,
{
    fn id(&self) -> ViewId {
        (**self).id()
    }

    async fn mount(&self) {
        (**self).mount().await;
    }

    async fn refresh(&self, param: Option<u32>) {
        (**self).refresh(param).await;
    }
}

/// Map from [`ViewId`] to its view module, constructed up front and
/// owned by the shell.
#[derive(Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, Box<dyn View>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Register a view under its own id, replacing any previous module
    /// for that id.
    pub fn register(&mut self, view: Box<dyn View>) {
        self.views.insert(view.id(), view);
    }

    pub fn get(&self, id: ViewId) -> Option<&dyn View> {
        self.views.get(&id).map(|v| v.as_ref())
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
