//! Caller identities
//!
//! The engine does not authenticate anyone itself; the surrounding runtime
//! resolves who is calling and hands the engine an opaque `AccountId`.
//! Authorization inside the engine is a plain identity comparison against
//! the stored market owner or listing parties.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity length in bytes (20 bytes = 160 bits)
pub const ACCOUNT_ID_LENGTH: usize = 20;

/// An opaque caller identity
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId {
    /// The 20-byte identity
    pub bytes: [u8; ACCOUNT_ID_LENGTH],
}

impl AccountId {
    /// Create from raw bytes
    pub fn new(bytes: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Derive deterministically from a seed
    ///
    /// Takes the trailing 20 bytes of SHA-256 over the seed, so any stable
    /// external identifier (public key, username, test label) maps to a
    /// stable identity.
    pub fn from_seed(seed: &[u8]) -> Self {
        let hash = Sha256::digest(seed);
        let mut bytes = [0u8; ACCOUNT_ID_LENGTH];
        bytes.copy_from_slice(&hash[12..32]);
        Self { bytes }
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let decoded = hex::decode(s)?;
        if decoded.len() != ACCOUNT_ID_LENGTH {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut bytes = [0u8; ACCOUNT_ID_LENGTH];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", &self.to_hex()[..8])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
