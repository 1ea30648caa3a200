//! Credential verification for privileged mutations.
//!
//! Every state-changing call must be accompanied by a freshly re-validated
//! credential. This crate turns the user's submitted code into a one-time
//! challenge:
//! - [`resolve_verification_id`] finds the id the session holds for a kind
//! - [`portal_verification_type`] names the kind in the Portal's vocabulary
//! - [`ChallengeExchange`] trades code + id for a [`ChallengeResponse`]
//!
//! [`ChallengeResponse`]: atk_types::ChallengeResponse

pub mod challenge;
pub mod error;
pub mod kind;
pub mod resolver;

pub use challenge::{ChallengeExchange, ChallengeParams, ChallengeService};
pub use error::VerificationError;
pub use kind::portal_verification_type;
pub use resolver::resolve_verification_id;
