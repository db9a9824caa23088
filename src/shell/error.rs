//! Shell error types
//!
//! Navigation failures are recoverable by design: the shell converts them
//! into a visible error surface with a retry affordance and never lets
//! them escape the navigation boundary.

use thiserror::Error;

/// Errors that can occur while loading a view
#[derive(Error, Debug)]
pub enum ShellError {
    /// The view's markup fragment could not be fetched
    #[error("Content load failed: {0}")]
    ContentLoad(String),

    /// The view's code module is not available; markup renders degraded
    #[error("Script load failed: {0}")]
    ScriptLoad(String),
}

/// Result type alias for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShellError::ContentLoad("patients/patients.html: not found".to_string());
        assert_eq!(
            err.to_string(),
            "Content load failed: patients/patients.html: not found"
        );
    }
}
