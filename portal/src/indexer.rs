//! Subgraph indexer client used for batch pre-checks.

use std::time::Duration;

use async_trait::async_trait;
use atk_dispatch::{BatchPrecheck, Mutation, PrecheckDecision};
use atk_types::{EvmAddress, ServiceError};
use serde::Deserialize;
use serde_json::json;

use crate::error::PortalError;
use crate::transport::GraphQlTransport;

/// Skip reason for a module the system already has.
pub const ALREADY_EXISTS: &str = "already exists";

const REGISTERED_COMPLIANCE_MODULES: &str = r#"
query RegisteredComplianceModules($system: ID!) {
  system(id: $system) {
    complianceModuleRegistry {
      complianceModules {
        id
      }
    }
  }
}
"#;

#[derive(Deserialize)]
struct SystemData {
    system: Option<SystemNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SystemNode {
    compliance_module_registry: Option<RegistryNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryNode {
    #[serde(default)]
    compliance_modules: Vec<ModuleNode>,
}

#[derive(Deserialize)]
struct ModuleNode {
    id: EvmAddress,
}

impl SystemData {
    fn modules(self) -> Vec<EvmAddress> {
        self.system
            .and_then(|s| s.compliance_module_registry)
            .map(|r| r.compliance_modules.into_iter().map(|m| m.id).collect())
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct IndexerClient {
    transport: GraphQlTransport,
}

impl IndexerClient {
    pub fn new(
        endpoint: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PortalError> {
        Ok(Self {
            transport: GraphQlTransport::new(endpoint, access_token, timeout)?,
        })
    }

    /// Compliance modules already registered in `system`. An unknown system
    /// has none.
    pub async fn registered_compliance_modules(
        &self,
        system: &EvmAddress,
    ) -> Result<Vec<EvmAddress>, PortalError> {
        let data: SystemData = self
            .transport
            .request(REGISTERED_COMPLIANCE_MODULES, json!({ "system": system }))
            .await?;
        Ok(data.modules())
    }
}

#[async_trait]
impl BatchPrecheck for IndexerClient {
    async fn check(&self, mutation: &Mutation) -> Result<PrecheckDecision, ServiceError> {
        match mutation {
            Mutation::RegisterComplianceModule(m) => {
                let registered = self.registered_compliance_modules(&m.system).await?;
                if registered.contains(&m.module) {
                    Ok(PrecheckDecision::Skip(ALREADY_EXISTS.to_string()))
                } else {
                    Ok(PrecheckDecision::Proceed)
                }
            }
            _ => Ok(PrecheckDecision::Proceed),
        }
    }
}
