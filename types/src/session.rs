//! The authenticated user's credential record.

use serde::{Deserialize, Serialize};

use crate::address::EvmAddress;

/// Per-request view of a signed-in user.
///
/// Each verification id was issued when the user enrolled that credential
/// kind; `None` means the kind was never enrolled. Rotation happens in a
/// separate enrollment flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub wallet: EvmAddress,
    #[serde(default)]
    pub pincode_verification_id: Option<String>,
    #[serde(default)]
    pub secret_code_verification_id: Option<String>,
    #[serde(default)]
    pub two_factor_verification_id: Option<String>,
}

impl UserSession {
    /// A session with no enrolled credentials.
    pub fn new(wallet: EvmAddress) -> Self {
        Self {
            wallet,
            pincode_verification_id: None,
            secret_code_verification_id: None,
            two_factor_verification_id: None,
        }
    }

    pub fn with_pincode(mut self, id: impl Into<String>) -> Self {
        self.pincode_verification_id = Some(id.into());
        self
    }

    pub fn with_secret_code(mut self, id: impl Into<String>) -> Self {
        self.secret_code_verification_id = Some(id.into());
        self
    }

    pub fn with_two_factor(mut self, id: impl Into<String>) -> Self {
        self.two_factor_verification_id = Some(id.into());
        self
    }
}
