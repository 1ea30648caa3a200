//! Named interface ids.
//!
//! Mutations declare the interface they need by name (`"ISMARTPausable"`);
//! the ids themselves depend on the deployed contract artifacts and are
//! supplied by configuration.

use std::collections::BTreeMap;

use atk_types::InterfaceId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceRegistry(BTreeMap<String, InterfaceId>);

impl InterfaceRegistry {
    /// A registry with no entries; every capability check is skipped.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, id: InterfaceId) -> Option<InterfaceId> {
        self.0.insert(name.into(), id)
    }

    pub fn with(mut self, name: impl Into<String>, id: InterfaceId) -> Self {
        self.insert(name, id);
        self
    }

    pub fn get(&self, name: &str) -> Option<InterfaceId> {
        self.0.get(name).copied()
    }

    /// Add every entry from `other`, overriding on conflict.
    pub fn extend(&mut self, other: InterfaceRegistry) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for InterfaceRegistry {
    /// The standard ERC interfaces whose ids are fixed by their EIPs.
    fn default() -> Self {
        Self::empty()
            .with("IERC165", InterfaceId::ERC165)
            .with("IERC20", InterfaceId::ERC20)
            .with("IAccessControl", InterfaceId::ACCESS_CONTROL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_standard_interfaces() {
        let registry = InterfaceRegistry::default();
        assert_eq!(registry.get("IERC20"), Some(InterfaceId::ERC20));
        assert_eq!(registry.get("ISMARTPausable"), None);
    }

    #[test]
    fn extend_overrides_existing_names() {
        let mut registry = InterfaceRegistry::default();
        let custom = InterfaceId::new([1, 2, 3, 4]);
        registry.extend(InterfaceRegistry::empty().with("IERC20", custom));
        assert_eq!(registry.get("IERC20"), Some(custom));
        assert_eq!(registry.len(), 3);
    }
}
