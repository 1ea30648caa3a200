//! Portal client: challenges, transactions and interface probes.

use std::time::Duration;

use async_trait::async_trait;
use atk_capabilities::InterfaceProbe;
use atk_dispatch::{Mutation, TransactionService};
use atk_types::{ChallengeResponse, EvmAddress, InterfaceId, ServiceError, TxHash};
use atk_verification::{ChallengeParams, ChallengeService};
use serde::Deserialize;
use serde_json::json;

use crate::documents;
use crate::error::PortalError;
use crate::transport::GraphQlTransport;

/// Default timeout for Portal requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct Aliased<T> {
    result: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionOutput {
    transaction_hash: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SupportsInterfaceOutput {
    supports_interface: bool,
}

#[derive(Clone)]
pub struct PortalClient {
    transport: GraphQlTransport,
}

impl PortalClient {
    pub fn new(
        endpoint: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PortalError> {
        Ok(Self {
            transport: GraphQlTransport::new(endpoint, access_token, timeout)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub async fn create_challenge_response(
        &self,
        params: ChallengeParams<'_>,
    ) -> Result<ChallengeResponse, PortalError> {
        let data: Aliased<ChallengeResponse> = self
            .transport
            .request(
                documents::CREATE_CHALLENGE_RESPONSE,
                json!({
                    "userWalletAddress": params.wallet,
                    "verificationId": params.verification_id,
                    "code": params.code,
                    "verificationType": params.verification_type,
                }),
            )
            .await?;
        Ok(data.result)
    }

    /// Send one contract write authorized by `challenge`.
    pub async fn submit(
        &self,
        from: &EvmAddress,
        mutation: &Mutation,
        challenge: ChallengeResponse,
    ) -> Result<TxHash, PortalError> {
        let (operation, input) = documents::operation(mutation);
        let document = documents::write_document(operation, input.is_some());
        let variables = documents::write_variables(from, mutation, challenge);

        tracing::debug!(operation, target = %mutation.target(), "sending portal write");
        let data: Aliased<TransactionOutput> =
            self.transport.request(&document, variables).await?;

        TxHash::parse(&data.result.transaction_hash).map_err(|e| {
            PortalError::InvalidResponse(format!("{operation} returned a bad hash: {e}"))
        })
    }

    pub async fn supports_interface(
        &self,
        address: &EvmAddress,
        interface_id: InterfaceId,
    ) -> Result<bool, PortalError> {
        let data: Aliased<SupportsInterfaceOutput> = self
            .transport
            .request(
                documents::SUPPORTS_INTERFACE,
                json!({ "address": address, "interfaceId": interface_id }),
            )
            .await?;
        Ok(data.result.supports_interface)
    }
}

#[async_trait]
impl ChallengeService for PortalClient {
    async fn create_challenge_response(
        &self,
        params: ChallengeParams<'_>,
    ) -> Result<ChallengeResponse, ServiceError> {
        Ok(PortalClient::create_challenge_response(self, params).await?)
    }
}

#[async_trait]
impl TransactionService for PortalClient {
    async fn submit(
        &self,
        from: &EvmAddress,
        mutation: &Mutation,
        challenge: ChallengeResponse,
    ) -> Result<TxHash, ServiceError> {
        Ok(PortalClient::submit(self, from, mutation, challenge).await?)
    }
}

#[async_trait]
impl InterfaceProbe for PortalClient {
    async fn supports_interface(
        &self,
        address: &EvmAddress,
        interface_id: InterfaceId,
    ) -> Result<bool, ServiceError> {
        Ok(PortalClient::supports_interface(self, address, interface_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::parse_response;

    #[test]
    fn portal_client_creation() {
        let client = PortalClient::new("http://localhost:7701/graphql", None, DEFAULT_TIMEOUT);
        assert!(client.is_ok());
    }

    #[test]
    fn challenge_response_deserialization() {
        let body = r#"{"data": {"result": {"challengeId": "c-1", "challengeResponse": "r-1"}}}"#;
        let data: Aliased<ChallengeResponse> = parse_response(body).unwrap();
        let (id, response) = data.result.into_parts();
        assert_eq!((id.as_str(), response.as_str()), ("c-1", "r-1"));
    }

    #[test]
    fn transaction_output_deserialization() {
        let body = r#"{"data": {"result": {"transactionHash": "0x1111111111111111111111111111111111111111111111111111111111111111"}}}"#;
        let data: Aliased<TransactionOutput> = parse_response(body).unwrap();
        let hash = TxHash::parse(&data.result.transaction_hash).unwrap();
        assert_eq!(hash, TxHash::new([0x11; 32]));
    }

    #[test]
    fn supports_interface_deserialization() {
        let body = r#"{"data": {"result": {"supportsInterface": false}}}"#;
        let data: Aliased<SupportsInterfaceOutput> = parse_response(body).unwrap();
        assert!(!data.result.supports_interface);
    }

    #[tokio::test]
    async fn unreachable_portal_surfaces_error() {
        let client = PortalClient::new(
            "http://127.0.0.1:9/graphql",
            None,
            Duration::from_millis(500),
        )
        .unwrap();
        let err = client
            .supports_interface(&EvmAddress::new([1; 20]), InterfaceId::ERC20)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PortalError::Unreachable(_) | PortalError::RequestFailed(_)
        ));
    }
}
