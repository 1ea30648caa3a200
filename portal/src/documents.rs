//! GraphQL documents sent to the Portal.
//!
//! Every contract write has the same shape: the target `address`, the
//! signing wallet `from`, the one-time challenge, and an optional `input`
//! object with the function arguments. The result is aliased to `result`
//! so responses decode uniformly.

use atk_dispatch::Mutation;
use atk_types::{ChallengeResponse, EvmAddress};
use serde_json::{json, Value};

pub const CREATE_CHALLENGE_RESPONSE: &str = r#"
mutation CreateVerificationChallengeResponse(
  $userWalletAddress: String!
  $verificationId: String!
  $code: String!
  $verificationType: WalletVerificationType!
) {
  result: createWalletVerificationChallengeResponse(
    userWalletAddress: $userWalletAddress
    verificationId: $verificationId
    code: $code
    verificationType: $verificationType
  ) {
    challengeId
    challengeResponse
  }
}
"#;

pub const SUPPORTS_INTERFACE: &str = r#"
query SupportsInterface($address: String!, $interfaceId: String!) {
  result: IERC165(address: $address) {
    supportsInterface(interfaceId: $interfaceId)
  }
}
"#;

/// Portal operation name and `input` arguments for a mutation.
pub fn operation(mutation: &Mutation) -> (&'static str, Option<Value>) {
    match mutation {
        Mutation::Transfer(m) => (
            "ISMARTTransfer",
            Some(json!({ "to": m.to, "amount": m.amount })),
        ),
        Mutation::ForcedTransfer(m) => (
            "ISMARTCustodianForcedTransfer",
            Some(json!({ "from": m.from, "to": m.to, "amount": m.amount })),
        ),
        Mutation::Mint(m) => (
            "ISMARTMint",
            Some(json!({ "to": m.to, "amount": m.amount })),
        ),
        Mutation::Burn(m) => (
            "ISMARTBurnableBurn",
            Some(json!({ "userAddress": m.from, "amount": m.amount })),
        ),
        Mutation::SetAddressFrozen(m) => (
            "ISMARTCustodianSetAddressFrozen",
            Some(json!({ "userAddress": m.user, "freeze": m.frozen })),
        ),
        Mutation::Pause(_) => ("ISMARTPausablePause", None),
        Mutation::Unpause(_) => ("ISMARTPausableUnpause", None),
        Mutation::Approve(m) => (
            "IERC20Approve",
            Some(json!({ "spender": m.spender, "value": m.amount })),
        ),
        Mutation::GrantRole(m) => (
            "IAccessControlGrantRole",
            Some(json!({ "role": m.role, "account": m.account })),
        ),
        Mutation::CreateTokenFactory(m) => (
            "IATKSystemCreateTokenFactory",
            Some(json!({
                "name": m.name,
                "factoryImplementation": m.factory_implementation,
                "tokenImplementation": m.token_implementation,
            })),
        ),
        Mutation::RegisterComplianceModule(m) => (
            "IATKSystemRegisterComplianceModule",
            Some(json!({ "module": m.module })),
        ),
        Mutation::XvpApprove(_) => ("IATKXvPSettlementApprove", None),
        Mutation::XvpExecute(_) => ("IATKXvPSettlementExecute", None),
    }
}

/// Variables for a write: the target, the signer, the challenge and the
/// mutation's `input`, if it has one.
pub fn write_variables(
    from: &EvmAddress,
    mutation: &Mutation,
    challenge: ChallengeResponse,
) -> Value {
    let (_, input) = operation(mutation);
    let (challenge_id, challenge_response) = challenge.into_parts();
    let mut variables = json!({
        "address": mutation.target(),
        "from": from,
        "challengeId": challenge_id,
        "challengeResponse": challenge_response,
    });
    if let (Some(input), Some(vars)) = (input, variables.as_object_mut()) {
        vars.insert("input".to_string(), input);
    }
    variables
}

/// Build the write document for `operation`.
pub fn write_document(operation: &str, has_input: bool) -> String {
    let (input_var, input_arg) = if has_input {
        (
            format!("\n  $input: {operation}Input!"),
            "\n    input: $input",
        )
    } else {
        (String::new(), "")
    };
    format!(
        r#"
mutation {operation}(
  $address: String!
  $from: String!
  $challengeId: String
  $challengeResponse: String{input_var}
) {{
  result: {operation}(
    address: $address
    from: $from
    challengeId: $challengeId
    challengeResponse: $challengeResponse{input_arg}
  ) {{
    transactionHash
  }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use atk_dispatch::{Pause, Transfer};
    use atk_types::TokenAmount;

    #[test]
    fn write_document_includes_input_only_when_needed() {
        let with = write_document("ISMARTTransfer", true);
        assert!(with.contains("$input: ISMARTTransferInput!"));
        assert!(with.contains("input: $input"));
        assert!(with.contains("result: ISMARTTransfer("));

        let without = write_document("ISMARTPausablePause", false);
        assert!(!without.contains("$input"));
        assert!(without.contains("challengeResponse: $challengeResponse\n  )"));
    }

    #[test]
    fn transfer_input_uses_string_amount() {
        let m: Mutation = Transfer {
            token: EvmAddress::new([1; 20]),
            to: EvmAddress::new([2; 20]),
            amount: TokenAmount::new(42),
        }
        .into();
        let (name, input) = operation(&m);
        assert_eq!(name, "ISMARTTransfer");
        let input = input.unwrap();
        assert_eq!(input["amount"], "42");
        assert_eq!(input["to"], "0x0202020202020202020202020202020202020202");
    }

    #[test]
    fn pause_has_no_input() {
        let m: Mutation = Pause {
            token: EvmAddress::new([1; 20]),
        }
        .into();
        assert_eq!(operation(&m), ("ISMARTPausablePause", None));
    }

    #[test]
    fn transfer_variables_carry_challenge_and_input() {
        let m: Mutation = Transfer {
            token: EvmAddress::new([1; 20]),
            to: EvmAddress::new([2; 20]),
            amount: TokenAmount::new(1_000),
        }
        .into();
        let vars = write_variables(
            &EvmAddress::new([0xee; 20]),
            &m,
            ChallengeResponse::new("challenge-7", "response-7"),
        );
        assert_eq!(
            vars,
            json!({
                "address": "0x0101010101010101010101010101010101010101",
                "from": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
                "challengeId": "challenge-7",
                "challengeResponse": "response-7",
                "input": {
                    "to": "0x0202020202020202020202020202020202020202",
                    "amount": "1000",
                },
            })
        );
    }

    #[test]
    fn pause_variables_omit_input() {
        let m: Mutation = Pause {
            token: EvmAddress::new([1; 20]),
        }
        .into();
        let vars = write_variables(
            &EvmAddress::new([0xee; 20]),
            &m,
            ChallengeResponse::new("challenge-1", "response-1"),
        );
        assert_eq!(
            vars,
            json!({
                "address": "0x0101010101010101010101010101010101010101",
                "from": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
                "challengeId": "challenge-1",
                "challengeResponse": "response-1",
            })
        );
    }
}
