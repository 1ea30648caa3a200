//! Contract capability checks.
//!
//! Before a mutation is sent to a contract, the gate may verify the contract
//! implements the ERC-165 interface the mutation depends on. Answers are
//! remembered in an [`InterfaceCache`] for a bounded time so repeated
//! operations on the same contract do not re-probe.
//!
//! The cache is an explicitly constructed component: whoever composes the
//! dispatcher owns it and hands it to the [`CapabilityGuard`]. An empty cache
//! is always correct; a miss only costs one extra probe.

pub mod cache;
pub mod error;
pub mod guard;
pub mod registry;
pub mod sweeper;

pub use cache::{CacheStats, InterfaceCache, DEFAULT_TTL};
pub use error::CapabilityError;
pub use guard::{CapabilityGuard, InterfaceProbe};
pub use registry::InterfaceRegistry;
pub use sweeper::spawn_sweeper;
