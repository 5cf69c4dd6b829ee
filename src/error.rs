use thiserror::Error;

/// Top-level error type for the shell.
///
/// Window or surface creation failure is fatal: there is no degraded mode
/// without a window, so `Init` aborts startup. Everything else is surfaced
/// to the caller and logged.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("window initialization failed: {0}")]
    Init(String),

    #[error("platform backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
