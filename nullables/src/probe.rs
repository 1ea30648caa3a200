//! Nullable capability probe: answers from a table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use atk_capabilities::InterfaceProbe;
use atk_types::{EvmAddress, InterfaceId, ServiceError};

use crate::lock;

/// Unknown `(address, interface)` pairs answer with the default.
pub struct NullInterfaceProbe {
    answers: Mutex<HashMap<(EvmAddress, InterfaceId), bool>>,
    default_answer: bool,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl NullInterfaceProbe {
    /// A probe for which every contract supports everything.
    pub fn supporting_all() -> Self {
        Self::with_default(true)
    }

    pub fn with_default(default_answer: bool) -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            default_answer,
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, address: &EvmAddress, interface_id: InterfaceId, supported: bool) {
        lock(&self.answers).insert((address.clone(), interface_id), supported);
    }

    /// Fail every probe with `message`.
    pub fn fail_all(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullInterfaceProbe {
    fn default() -> Self {
        Self::supporting_all()
    }
}

#[async_trait]
impl InterfaceProbe for NullInterfaceProbe {
    async fn supports_interface(
        &self,
        address: &EvmAddress,
        interface_id: InterfaceId,
    ) -> Result<bool, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = lock(&self.failure).clone() {
            return Err(message.into());
        }
        Ok(lock(&self.answers)
            .get(&(address.clone(), interface_id))
            .copied()
            .unwrap_or(self.default_answer))
    }
}
