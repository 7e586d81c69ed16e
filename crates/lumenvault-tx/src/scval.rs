//! Typed contract-call values
//!
//! Defines the argument and return-value encoding shared with the deployed
//! vault and share-token contracts. The variant tags and value encodings are
//! a wire contract: a mismatch makes simulation fail, so they must match the
//! deployed contract exactly.

use serde::{Deserialize, Serialize};

/// A typed value passed to or returned from a contract method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ScVal {
    /// Account or contract address (strkey)
    Address(String),
    /// Signed 128-bit integer, carried as a decimal string on the wire
    I128(#[serde(with = "i128_string")] i128),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Short method/enum symbol
    Symbol(String),
    Bool(bool),
    Void,
}

impl ScVal {
    pub fn address(addr: impl Into<String>) -> Self {
        Self::Address(addr.into())
    }

    pub fn i128(value: i128) -> Self {
        Self::I128(value)
    }

    pub fn symbol(sym: impl Into<String>) -> Self {
        Self::Symbol(sym.into())
    }

    /// Extract an i128, the return type of every vault method this client
    /// consumes.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::I128(v) => Some(*v),
            Self::U32(v) => Some(*v as i128),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }
}

/// i128 <-> decimal string on the wire. JSON numbers are not wide enough
/// for 128-bit amounts.
mod i128_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<i128>().map_err(serde::de::Error::custom)
    }
}
