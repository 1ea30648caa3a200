//! The closed set of privileged actions the gate can dispatch.
//!
//! Each action carries only its domain fields. The challenge is attached at
//! submission time and is never part of a [`Mutation`].

use atk_types::{EvmAddress, TokenAmount};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub token: EvmAddress,
    pub to: EvmAddress,
    pub amount: TokenAmount,
}

/// Custodian transfer that bypasses the holder's signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForcedTransfer {
    pub token: EvmAddress,
    pub from: EvmAddress,
    pub to: EvmAddress,
    pub amount: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mint {
    pub token: EvmAddress,
    pub to: EvmAddress,
    pub amount: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Burn {
    pub token: EvmAddress,
    pub from: EvmAddress,
    pub amount: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAddressFrozen {
    pub token: EvmAddress,
    pub user: EvmAddress,
    pub frozen: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pause {
    pub token: EvmAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unpause {
    pub token: EvmAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approve {
    pub token: EvmAddress,
    pub spender: EvmAddress,
    pub amount: TokenAmount,
}

/// Grant an access-control role; `role` is the `0x` bytes32 role id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRole {
    pub target: EvmAddress,
    pub account: EvmAddress,
    pub role: String,
}

/// Deploy a token factory into a system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenFactory {
    pub system: EvmAddress,
    pub name: String,
    pub factory_implementation: EvmAddress,
    pub token_implementation: EvmAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterComplianceModule {
    pub system: EvmAddress,
    pub module: EvmAddress,
}

/// Approve the caller's leg of a cross-value-proposition settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XvpApprove {
    pub settlement: EvmAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XvpExecute {
    pub settlement: EvmAddress,
}

/// A privileged, state-changing action against one contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Mutation {
    Transfer(Transfer),
    ForcedTransfer(ForcedTransfer),
    Mint(Mint),
    Burn(Burn),
    SetAddressFrozen(SetAddressFrozen),
    Pause(Pause),
    Unpause(Unpause),
    Approve(Approve),
    GrantRole(GrantRole),
    CreateTokenFactory(CreateTokenFactory),
    RegisterComplianceModule(RegisterComplianceModule),
    XvpApprove(XvpApprove),
    XvpExecute(XvpExecute),
}

impl Mutation {
    /// Short action name used in logs and error context.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "transfer",
            Self::ForcedTransfer(_) => "forced-transfer",
            Self::Mint(_) => "mint",
            Self::Burn(_) => "burn",
            Self::SetAddressFrozen(m) if m.frozen => "freeze",
            Self::SetAddressFrozen(_) => "unfreeze",
            Self::Pause(_) => "pause",
            Self::Unpause(_) => "unpause",
            Self::Approve(_) => "approve",
            Self::GrantRole(_) => "grant-role",
            Self::CreateTokenFactory(_) => "create-token-factory",
            Self::RegisterComplianceModule(_) => "register-compliance-module",
            Self::XvpApprove(_) => "xvp-approve",
            Self::XvpExecute(_) => "xvp-execute",
        }
    }

    /// The contract the transaction is sent to.
    pub fn target(&self) -> &EvmAddress {
        match self {
            Self::Transfer(m) => &m.token,
            Self::ForcedTransfer(m) => &m.token,
            Self::Mint(m) => &m.token,
            Self::Burn(m) => &m.token,
            Self::SetAddressFrozen(m) => &m.token,
            Self::Pause(m) => &m.token,
            Self::Unpause(m) => &m.token,
            Self::Approve(m) => &m.token,
            Self::GrantRole(m) => &m.target,
            Self::CreateTokenFactory(m) => &m.system,
            Self::RegisterComplianceModule(m) => &m.system,
            Self::XvpApprove(m) => &m.settlement,
            Self::XvpExecute(m) => &m.settlement,
        }
    }

    /// Name of the interface the target must implement, looked up in the
    /// configured interface registry.
    pub fn required_interface(&self) -> Option<&'static str> {
        match self {
            Self::Transfer(_) | Self::Mint(_) => Some("ISMART"),
            Self::ForcedTransfer(_) | Self::SetAddressFrozen(_) => Some("ISMARTCustodian"),
            Self::Burn(_) => Some("ISMARTBurnable"),
            Self::Pause(_) | Self::Unpause(_) => Some("ISMARTPausable"),
            Self::Approve(_) => Some("IERC20"),
            Self::GrantRole(_) => Some("IAccessControl"),
            Self::CreateTokenFactory(_) | Self::RegisterComplianceModule(_) => Some("IATKSystem"),
            Self::XvpApprove(_) | Self::XvpExecute(_) => Some("IATKXvPSettlement"),
        }
    }
}

macro_rules! impl_into_mutation {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Mutation {
                fn from(m: $variant) -> Self {
                    Mutation::$variant(m)
                }
            }
        )*
    };
}

impl_into_mutation!(
    Transfer,
    ForcedTransfer,
    Mint,
    Burn,
    SetAddressFrozen,
    Pause,
    Unpause,
    Approve,
    GrantRole,
    CreateTokenFactory,
    RegisterComplianceModule,
    XvpApprove,
    XvpExecute,
);
