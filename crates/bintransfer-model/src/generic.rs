//! Primitive wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A primitive wire type with a built-in reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenericType {
    Int,
    Uint,
    Long,
    Ulong,
    Short,
    Ushort,
    Float,
    Double,
    Bool,
    String,
    Bytes,
}

impl GenericType {
    pub const ALL: [GenericType; 11] = [
        GenericType::Int,
        GenericType::Uint,
        GenericType::Long,
        GenericType::Ulong,
        GenericType::Short,
        GenericType::Ushort,
        GenericType::Float,
        GenericType::Double,
        GenericType::Bool,
        GenericType::String,
        GenericType::Bytes,
    ];

    /// Schema-language spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenericType::Int => "int",
            GenericType::Uint => "uint",
            GenericType::Long => "long",
            GenericType::Ulong => "ulong",
            GenericType::Short => "short",
            GenericType::Ushort => "ushort",
            GenericType::Float => "float",
            GenericType::Double => "double",
            GenericType::Bool => "bool",
            GenericType::String => "string",
            GenericType::Bytes => "bytes",
        }
    }

    /// Only `string` and `bytes` may carry a `[N]` size.
    pub fn allows_strict_size(&self) -> bool {
        matches!(self, GenericType::String | GenericType::Bytes)
    }

    /// Look up a schema-language name, returning `None` for non-generic names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == name)
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name that is not one of the generic wire types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generic type \"{0}\"")]
pub struct UnknownGenericType(pub String);

impl FromStr for GenericType {
    type Err = UnknownGenericType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownGenericType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for g in GenericType::ALL {
            assert_eq!(g.as_str().parse::<GenericType>().unwrap(), g);
        }
        assert!("Vector".parse::<GenericType>().is_err());
        assert_eq!(GenericType::from_name("Int"), None);
    }

    #[test]
    fn test_strict_size_support() {
        let allowed: Vec<_> = GenericType::ALL
            .iter()
            .filter(|g| g.allows_strict_size())
            .collect();
        assert_eq!(allowed, vec![&GenericType::String, &GenericType::Bytes]);
    }
}
