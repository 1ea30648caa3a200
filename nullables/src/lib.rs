//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the gate (clock, authentication service,
//! transaction execution service, capability probe, batch pre-check) has a
//! test-friendly implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Records every call for assertions
//! - Never touches the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod challenge;
pub mod clock;
pub mod precheck;
pub mod probe;
pub mod transactions;

pub use challenge::{NullChallengeService, RecordedChallenge};
pub use clock::NullClock;
pub use precheck::NullPrecheck;
pub use probe::NullInterfaceProbe;
pub use transactions::{NullTransactionService, RecordedSubmission};

use std::sync::{Mutex, MutexGuard};

/// Lock a test double's state, ignoring poisoning from a panicked test.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}
