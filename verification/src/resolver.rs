//! Lookup of the verification id a session holds for a credential kind.

use atk_types::{UserSession, VerificationKind};

/// The verification id enrolled for `kind`, or `None` if the user never
/// enrolled it. An empty id counts as not enrolled.
pub fn resolve_verification_id(session: &UserSession, kind: VerificationKind) -> Option<&str> {
    let slot = match kind {
        VerificationKind::Pincode => &session.pincode_verification_id,
        VerificationKind::SecretCode => &session.secret_code_verification_id,
        VerificationKind::TwoFactor => &session.two_factor_verification_id,
    };
    slot.as_deref().filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atk_types::EvmAddress;

    fn wallet() -> EvmAddress {
        EvmAddress::new([0x11; 20])
    }

    #[test]
    fn each_kind_reads_its_own_slot() {
        let session = UserSession::new(wallet())
            .with_pincode("pin-id")
            .with_secret_code("secret-id")
            .with_two_factor("otp-id");
        assert_eq!(
            resolve_verification_id(&session, VerificationKind::Pincode),
            Some("pin-id")
        );
        assert_eq!(
            resolve_verification_id(&session, VerificationKind::SecretCode),
            Some("secret-id")
        );
        assert_eq!(
            resolve_verification_id(&session, VerificationKind::TwoFactor),
            Some("otp-id")
        );
    }

    #[test]
    fn unenrolled_kinds_resolve_to_none() {
        let session = UserSession::new(wallet()).with_pincode("pin-id");
        for kind in [VerificationKind::SecretCode, VerificationKind::TwoFactor] {
            assert_eq!(resolve_verification_id(&session, kind), None);
        }
    }

    #[test]
    fn empty_id_is_not_enrolled() {
        let session = UserSession::new(wallet()).with_two_factor("");
        assert_eq!(
            resolve_verification_id(&session, VerificationKind::TwoFactor),
            None
        );
    }
}
