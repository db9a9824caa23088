//! Collaborator surfaces
//!
//! The shell and the views do not own any presentation machinery; they
//! drive it through these traits. The application supplies real
//! implementations (terminal, files on disk), tests supply recording
//! fakes.

use crate::shell::error::{ShellError, ShellResult};
use crate::shell::route::ViewId;
use async_trait::async_trait;
use std::path::PathBuf;

/// Source of per-view markup fragments.
///
/// Each view's static fragment lives at a well-known relative path
/// ([`ViewId::markup_path`]); fetching it is the first stage of every
/// navigation attempt.
#[async_trait]
pub trait MarkupSource: Send + Sync {
    /// Fetch the fragment at `path`. Absence or a transport failure is a
    /// [`ShellError::ContentLoad`].
    async fn fetch(&self, path: &str) -> ShellResult<String>;
}

/// The chrome around the active view: content region, navigation
/// indicator, and display title.
pub trait ChromeSurface: Send + Sync {
    /// Swap the content region for a view's static markup.
    fn set_content(&self, markup: &str);

    /// Fill a named insertion point inside the current markup with
    /// rendered data.
    fn fill(&self, slot: &str, body: &str);

    /// Move the active-navigation indicator.
    fn set_active_nav(&self, view: ViewId);

    /// Update the display title.
    fn set_title(&self, title: &str);

    /// Replace the content region with the generic error surface. The
    /// retry affordance stays bound to `fragment`.
    fn render_error(&self, fragment: &str, message: &str);
}

/// Flash-message presentation surface for human-readable status strings.
pub trait FlashSurface: Send + Sync {
    fn flash(&self, message: &str);
}

/// Blocking confirmation and prompt surface.
///
/// The caller issues a question and waits for the answer before
/// continuing; there is no way to leave a query pending.
pub trait ConfirmSurface: Send + Sync {
    /// Yes/no question. `false` also covers a dismissed dialog.
    fn confirm(&self, question: &str) -> bool;

    /// Text-input question. `None` when the user cancels.
    fn prompt(&self, question: &str) -> Option<String>;
}

/// Markup source reading fragments from a directory on disk.
pub struct DirMarkupSource {
    root: PathBuf,
}

impl DirMarkupSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MarkupSource for DirMarkupSource {
    async fn fetch(&self, path: &str) -> ShellResult<String> {
        let full = self.root.join(path);
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|err| ShellError::ContentLoad(format!("{}: {}", path, err)))
    }
}
