//! Fundamental types for the ATK verification gate.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! EVM addresses, transaction hashes, token amounts, timestamps, interface ids,
//! and the credential records that flow through the challenge-response gate.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod interface;
pub mod session;
pub mod time;
pub mod verification;

pub use address::EvmAddress;
pub use amount::TokenAmount;
pub use error::TypesError;
pub use hash::TxHash;
pub use interface::InterfaceId;
pub use session::UserSession;
pub use time::{Clock, SystemClock, Timestamp};
pub use verification::{ChallengeResponse, VerificationKind, VerificationRequest};

/// Decode a `0x`-prefixed hex string into a fixed-size byte array.
///
/// The prefix is optional and hex digits may be of either case.
pub(crate) fn decode_prefixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).ok()?;
    Some(out)
}

/// Error returned by an external service adapter. Adapters keep their own
/// error enums; callers only need the message.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;
