//! Signing-key algorithm and account credential material.

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Signing algorithms the ledger accepts for account keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Secp256k1,
    Ed25519,
}

impl KeyType {
    /// Wire spelling, always lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::Ed25519 => "ed25519",
        }
    }
}

/// Secp256k1 is the ledger's default signing algorithm.
impl Default for KeyType {
    fn default() -> Self {
        Self::Secp256k1
    }
}

impl FromStr for KeyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(Self::Secp256k1),
            "ed25519" => Ok(Self::Ed25519),
            _ => Err(ValidationError::InvalidKeyType(s.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account credential handed to the node for signing.
///
/// This type intentionally does not implement `Clone` or `Serialize`, and its
/// `Debug` output is redacted. The material is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub enum Secret {
    /// Free-form passphrase the node derives a seed from.
    Passphrase(String),
    /// Raw seed as hex text.
    SeedHex(String),
}

impl Secret {
    /// The request key this credential travels under.
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::Passphrase(_) => "passphrase",
            Self::SeedHex(_) => "seed_hex",
        }
    }

    /// The credential material itself. Handle with care.
    pub fn reveal(&self) -> &str {
        match self {
            Self::Passphrase(s) | Self::SeedHex(s) => s,
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passphrase(_) => write!(f, "Secret::Passphrase(..)"),
            Self::SeedHex(_) => write!(f, "Secret::SeedHex(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_round_trip() {
        assert_eq!("secp256k1".parse::<KeyType>().unwrap(), KeyType::Secp256k1);
        assert_eq!("ED25519".parse::<KeyType>().unwrap(), KeyType::Ed25519);
        assert_eq!(KeyType::Ed25519.as_str(), "ed25519");
    }

    #[test]
    fn test_key_type_rejects_unknown() {
        assert!(matches!(
            "rsa".parse::<KeyType>(),
            Err(ValidationError::InvalidKeyType(_))
        ));
    }

    #[test]
    fn test_default_key_type() {
        assert_eq!(KeyType::default(), KeyType::Secp256k1);
    }

    #[test]
    fn test_secret_param_names() {
        assert_eq!(Secret::Passphrase("x".into()).param_name(), "passphrase");
        assert_eq!(Secret::SeedHex("ff".into()).param_name(), "seed_hex");
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::Passphrase("hunter2".into());
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }
}
