//! Raw signature values.
//!
//! A signature embedded in a document is opaque at this layer: its length and
//! internal structure depend on the key algorithm (64 bytes for Ed25519, the
//! modulus size for RSA, a DER `SEQUENCE` for ECDSA). Length checks happen in
//! [`PublicKey::verify`](crate::PublicKey::verify), where a malformed value is
//! a failed verification rather than a decoding error.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CryptoError, CryptoResult};

/// Opaque asymmetric signature bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBytes(Vec<u8>);

impl SignatureBytes {
    /// Wrap raw bytes.
    #[must_use]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the signature holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Encode as standard padded base64.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.0)
    }

    /// Decode from standard padded base64.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64Encoding`] carrying the decoder's
    /// message if the string is not valid base64.
    pub fn from_base64(s: &str) -> CryptoResult<Self> {
        base64::engine::general_purpose::STANDARD
            .decode(s)
            .map(Self)
            .map_err(|e| CryptoError::InvalidBase64Encoding(e.to_string()))
    }

    /// Return a copy with a single bit inverted.
    ///
    /// `bit` indexes bits from the start of the value (bit 0 is the least
    /// significant bit of byte 0). Out-of-range indices wrap.
    #[must_use]
    pub fn with_flipped_bit(&self, bit: usize) -> Self {
        const MASKS: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

        let mut bytes = self.0.clone();
        let total_bits = bytes.len().saturating_mul(8);
        if let Some(bit) = bit.checked_rem(total_bits) {
            bytes[bit / 8] ^= MASKS[bit % 8];
        }
        Self(bytes)
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        let shown = hex.get(..16).unwrap_or(&hex);
        write!(f, "SignatureBytes({} bytes, {shown}...)", self.0.len())
    }
}

impl fmt::Display for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_base64(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Vec<u8>> for SignatureBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<ed25519_dalek::Signature> for SignatureBytes {
    fn from(sig: ed25519_dalek::Signature) -> Self {
        Self(sig.to_bytes().to_vec())
    }
}

impl AsRef<[u8]> for SignatureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
