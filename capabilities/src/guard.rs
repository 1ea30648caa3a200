//! Cache-backed capability checks.

use std::sync::Arc;

use async_trait::async_trait;
use atk_types::{EvmAddress, InterfaceId, ServiceError};

use crate::cache::InterfaceCache;
use crate::error::CapabilityError;
use crate::registry::InterfaceRegistry;

/// Asks a deployed contract whether it implements an ERC-165 interface.
#[async_trait]
pub trait InterfaceProbe: Send + Sync {
    async fn supports_interface(
        &self,
        address: &EvmAddress,
        interface_id: InterfaceId,
    ) -> Result<bool, ServiceError>;
}

#[derive(Clone)]
pub struct CapabilityGuard {
    cache: Arc<InterfaceCache>,
    probe: Arc<dyn InterfaceProbe>,
    registry: InterfaceRegistry,
}

impl CapabilityGuard {
    pub fn new(
        cache: Arc<InterfaceCache>,
        probe: Arc<dyn InterfaceProbe>,
        registry: InterfaceRegistry,
    ) -> Self {
        Self {
            cache,
            probe,
            registry,
        }
    }

    pub fn cache(&self) -> &Arc<InterfaceCache> {
        &self.cache
    }

    /// Whether `address` implements `interface_id`, from cache when fresh.
    ///
    /// Probe failures are returned and not cached.
    pub async fn supports(
        &self,
        address: &EvmAddress,
        interface_id: InterfaceId,
    ) -> Result<bool, ServiceError> {
        if let Some(supported) = self.cache.get(address, interface_id) {
            return Ok(supported);
        }
        let supported = self.probe.supports_interface(address, interface_id).await?;
        self.cache.set(address, interface_id, supported);
        Ok(supported)
    }

    /// Fail with [`CapabilityError::NotSupported`] unless `address`
    /// implements the interface registered as `interface`.
    ///
    /// Interfaces with no configured id are not checked.
    pub async fn ensure(
        &self,
        address: &EvmAddress,
        action: &str,
        interface: &str,
    ) -> Result<(), CapabilityError> {
        let Some(interface_id) = self.registry.get(interface) else {
            tracing::debug!(%address, action, interface, "no interface id configured, skipping capability check");
            return Ok(());
        };

        let supported = self
            .supports(address, interface_id)
            .await
            .map_err(|e| CapabilityError::ProbeFailed {
                address: address.clone(),
                interface: interface.to_string(),
                message: e.to_string(),
            })?;

        if supported {
            Ok(())
        } else {
            tracing::warn!(%address, action, interface, "contract lacks required interface");
            Err(CapabilityError::NotSupported {
                address: address.clone(),
                action: action.to_string(),
                interface: interface.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atk_types::SystemClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProbe {
        answer: Result<bool, String>,
        calls: AtomicUsize,
    }

    impl CountingProbe {
        fn new(answer: Result<bool, String>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl InterfaceProbe for CountingProbe {
        async fn supports_interface(
            &self,
            _address: &EvmAddress,
            _interface_id: InterfaceId,
        ) -> Result<bool, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone().map_err(Into::into)
        }
    }

    const PAUSABLE: InterfaceId = InterfaceId::new([0xde, 0xad, 0xbe, 0xef]);

    fn guard(probe: Arc<CountingProbe>) -> CapabilityGuard {
        let cache = Arc::new(InterfaceCache::new(
            crate::DEFAULT_TTL,
            Arc::new(SystemClock),
        ));
        let registry = InterfaceRegistry::default().with("ISMARTPausable", PAUSABLE);
        CapabilityGuard::new(cache, probe, registry)
    }

    #[tokio::test]
    async fn second_check_is_served_from_cache() {
        let probe = CountingProbe::new(Ok(true));
        let guard = guard(probe.clone());
        let token = EvmAddress::new([7; 20]);

        guard.ensure(&token, "pause", "ISMARTPausable").await.unwrap();
        guard.ensure(&token, "pause", "ISMARTPausable").await.unwrap();

        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsupported_carries_context() {
        let guard = guard(CountingProbe::new(Ok(false)));
        let token = EvmAddress::new([7; 20]);

        let err = guard.ensure(&token, "pause", "ISMARTPausable").await.unwrap_err();
        assert_eq!(
            err,
            CapabilityError::NotSupported {
                address: token,
                action: "pause".into(),
                interface: "ISMARTPausable".into(),
            }
        );
    }

    #[tokio::test]
    async fn probe_failure_is_not_cached() {
        let probe = CountingProbe::new(Err("rpc down".into()));
        let guard = guard(probe.clone());
        let token = EvmAddress::new([7; 20]);

        let err = guard.ensure(&token, "pause", "ISMARTPausable").await.unwrap_err();
        assert!(matches!(err, CapabilityError::ProbeFailed { .. }));
        assert!(guard.cache().is_empty());
    }

    #[tokio::test]
    async fn unknown_interface_is_skipped() {
        let probe = CountingProbe::new(Ok(false));
        let guard = guard(probe.clone());

        guard
            .ensure(&EvmAddress::new([7; 20]), "burn", "ISMARTBurnable")
            .await
            .unwrap();
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }
}
