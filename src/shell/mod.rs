//! Navigation shell
//!
//! Owns navigation state and the view lifecycle:
//!
//! - **route**: Fragment grammar and the static per-view lookup tables
//! - **view**: The `View` contract, shared context, and the registry
//! - **surface**: Collaborator traits the shell and views render through
//! - **router**: The `Shell` state machine itself
//! - **error**: Load-failure taxonomy
//!
//! # Navigation lifecycle
//!
//! ```text
//! fragment change
//!   → parse route (empty fragment → default view)
//!   → Loading: fetch markup          (failure → error surface + retry)
//!   → swap content, nav indicator, title; persist currentPage
//!   → mount view (first visit only)  (no module → degraded view)
//!   → refresh view
//!   → Active
//! ```
//!
//! Attempts carry a generation number; a stage that completes after a
//! newer attempt has started is discarded rather than rendered.

pub mod error;
pub mod route;
pub mod router;
pub mod surface;
pub mod view;

// Re-export commonly used types
pub use error::{ShellError, ShellResult};
pub use route::{Route, ViewId};
pub use router::{NavState, Shell};
pub use surface::{ChromeSurface, ConfirmSurface, DirMarkupSource, FlashSurface, MarkupSource};
pub use view::{View, ViewContext, ViewRegistry};
