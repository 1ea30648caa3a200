//! ERC-165 interface identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A 4-byte ERC-165 interface id (XOR of the interface's function selectors).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterfaceId([u8; 4]);

impl InterfaceId {
    /// `IERC165` itself.
    pub const ERC165: Self = Self([0x01, 0xff, 0xc9, 0xa7]);
    /// `IERC20`.
    pub const ERC20: Self = Self([0x36, 0x37, 0x2b, 0x07]);
    /// OpenZeppelin `IAccessControl`.
    pub const ACCESS_CONTROL: Self = Self([0x79, 0x65, 0xdb, 0x0b]);

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn parse(s: &str) -> Result<Self, TypesError> {
        crate::decode_prefixed::<4>(s.trim())
            .map(Self)
            .ok_or_else(|| TypesError::InvalidInterfaceId(s.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceId({self})")
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for InterfaceId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InterfaceId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<InterfaceId> for String {
    fn from(id: InterfaceId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(InterfaceId::parse("0x01FFC9A7").unwrap(), InterfaceId::ERC165);
        assert_eq!(InterfaceId::parse("01ffc9a7").unwrap(), InterfaceId::ERC165);
        assert_eq!(InterfaceId::ERC20.to_string(), "0x36372b07");
    }

    #[test]
    fn rejects_wrong_width() {
        assert!(InterfaceId::parse("0x01ffc9").is_err());
    }
}
