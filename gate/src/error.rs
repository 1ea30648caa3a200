use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("config error: {0}")]
    Config(String),

    #[error("portal client error: {0}")]
    Portal(#[from] atk_portal::PortalError),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("background task failed: {0}")]
    Task(String),

    #[error("shutdown timeout")]
    ShutdownTimeout,
}
