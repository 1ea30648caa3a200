//! Minimal GraphQL-over-HTTP transport.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Header carrying the application access token.
pub const AUTH_HEADER: &str = "x-auth-token";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Clone)]
pub struct GraphQlTransport {
    /// HTTP client (reusable connection pool).
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl GraphQlTransport {
    pub fn new(
        endpoint: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PortalError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| PortalError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            access_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one GraphQL operation and decode its `data`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, PortalError> {
        let mut request = self.http.post(&self.endpoint).json(&GraphQlRequest {
            query,
            variables: &variables,
        });
        if let Some(token) = &self.access_token {
            request = request.header(AUTH_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // GraphQL servers often report errors with a 4xx/5xx status and a
        // regular error body; prefer the error messages when present.
        match parse_response(&body) {
            Err(PortalError::InvalidResponse(_)) if !status.is_success() => Err(
                PortalError::RequestFailed(format!("HTTP status {status}")),
            ),
            other => other,
        }
    }
}

/// Decode a GraphQL response body.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, PortalError> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| PortalError::InvalidResponse(format!("failed to parse response: {e}")))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(PortalError::GraphQl(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| PortalError::InvalidResponse("response has no data".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Data {
        value: u32,
    }

    #[test]
    fn transport_creation() {
        let transport =
            GraphQlTransport::new("http://localhost:7701/graphql", None, Duration::from_secs(5))
                .unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:7701/graphql");
    }

    #[test]
    fn data_is_decoded() {
        let data: Data = parse_response(r#"{"data": {"value": 7}}"#).unwrap();
        assert_eq!(data.value, 7);
    }

    #[test]
    fn errors_are_joined() {
        let err = parse_response::<Data>(
            r#"{"data": null, "errors": [{"message": "Invalid pincode"}, {"message": "try again"}]}"#,
        )
        .unwrap_err();
        match err {
            PortalError::GraphQl(msg) => assert_eq!(msg, "Invalid pincode; try again"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_invalid() {
        let err = parse_response::<Data>(r#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, PortalError::InvalidResponse(_)));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            parse_response::<Data>("<html>bad gateway</html>"),
            Err(PortalError::InvalidResponse(_))
        ));
    }
}
