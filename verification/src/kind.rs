//! Mapping from credential kinds to the Portal's verification types.

use atk_types::VerificationKind;

/// The Portal's name for a credential kind.
///
/// `TwoFactor` is the one irregular entry: the Portal calls it `otp`.
pub fn portal_verification_type(kind: VerificationKind) -> &'static str {
    match kind {
        VerificationKind::Pincode => "pincode",
        VerificationKind::SecretCode => "secret-code",
        VerificationKind::TwoFactor => "otp",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_fixed() {
        assert_eq!(portal_verification_type(VerificationKind::Pincode), "pincode");
        assert_eq!(
            portal_verification_type(VerificationKind::SecretCode),
            "secret-code"
        );
        assert_eq!(portal_verification_type(VerificationKind::TwoFactor), "otp");
    }

    #[test]
    fn mapping_is_injective() {
        let mut names: Vec<_> = VerificationKind::ALL
            .iter()
            .map(|k| portal_verification_type(*k))
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), VerificationKind::ALL.len());
    }
}
