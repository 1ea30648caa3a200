//! Credential kinds and the values exchanged by the challenge-response gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The credential mechanism a user enrolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationKind {
    /// A numeric PIN code.
    Pincode,
    /// A pre-issued recovery secret.
    SecretCode,
    /// A time-based one-time code from an authenticator app.
    TwoFactor,
}

impl VerificationKind {
    pub const ALL: [VerificationKind; 3] = [Self::Pincode, Self::SecretCode, Self::TwoFactor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pincode => "pincode",
            Self::SecretCode => "secret-code",
            Self::TwoFactor => "two-factor",
        }
    }
}

impl fmt::Display for VerificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A credential submitted alongside one privileged operation.
///
/// Never persisted. The code is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationRequest {
    pub code: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: VerificationKind,
}

impl VerificationRequest {
    pub fn new(kind: VerificationKind, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind,
        }
    }

    pub fn pincode(code: impl Into<String>) -> Self {
        Self::new(VerificationKind::Pincode, code)
    }

    pub fn secret_code(code: impl Into<String>) -> Self {
        Self::new(VerificationKind::SecretCode, code)
    }

    pub fn two_factor(code: impl Into<String>) -> Self {
        Self::new(VerificationKind::TwoFactor, code)
    }
}

impl fmt::Debug for VerificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRequest")
            .field("code", &"<redacted>")
            .field("kind", &self.kind)
            .finish()
    }
}

/// A one-time challenge authorizing exactly one transaction.
///
/// Deliberately not `Clone`: attaching it to a transaction consumes it.
#[derive(PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    challenge_id: String,
    challenge_response: String,
}

impl ChallengeResponse {
    pub fn new(challenge_id: impl Into<String>, challenge_response: impl Into<String>) -> Self {
        Self {
            challenge_id: challenge_id.into(),
            challenge_response: challenge_response.into(),
        }
    }

    pub fn challenge_id(&self) -> &str {
        &self.challenge_id
    }

    /// Split into `(challenge_id, challenge_response)`.
    pub fn into_parts(self) -> (String, String) {
        (self.challenge_id, self.challenge_response)
    }
}

impl fmt::Debug for ChallengeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeResponse")
            .field("challenge_id", &self.challenge_id)
            .field("challenge_response", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&VerificationKind::SecretCode).unwrap(),
            "\"secret-code\""
        );
        let kind: VerificationKind = serde_json::from_str("\"two-factor\"").unwrap();
        assert_eq!(kind, VerificationKind::TwoFactor);
    }

    #[test]
    fn request_debug_hides_code() {
        let req = VerificationRequest::pincode("123456");
        let rendered = format!("{req:?}");
        assert!(!rendered.contains("123456"));
        assert!(rendered.contains("Pincode"));
    }

    #[test]
    fn request_deserializes_form_payload() {
        let req: VerificationRequest =
            serde_json::from_str(r#"{"code":"111111","type":"two-factor"}"#).unwrap();
        assert_eq!(req.kind, VerificationKind::TwoFactor);
        assert_eq!(req.code, "111111");
    }

    #[test]
    fn challenge_debug_hides_response() {
        let challenge = ChallengeResponse::new("ch-1", "s3cret");
        let rendered = format!("{challenge:?}");
        assert!(rendered.contains("ch-1"));
        assert!(!rendered.contains("s3cret"));
    }
}
