use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("service unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The service answered with a GraphQL `errors` array.
    #[error("{0}")]
    GraphQl(String),
}

impl From<reqwest::Error> for PortalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PortalError::Unreachable(format!("request timed out: {e}"))
        } else if e.is_connect() {
            PortalError::Unreachable(format!("connection failed: {e}"))
        } else {
            PortalError::RequestFailed(e.to_string())
        }
    }
}
