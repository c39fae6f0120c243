//! Sigblock Crypto - key material and signature checks for signed documents.
//!
//! This crate provides:
//! - PEM public key loading for RSA, ECDSA (P-256/P-384) and Ed25519 keys
//! - SHA-256 digests of normalized payloads
//! - Opaque signature bytes with base64 transport encoding
//! - Ed25519 key pairs for the signing side
//!
//! Every scheme signs the SHA-256 digest of the payload. RSA and ECDSA keys
//! use the digest as the hash step of PKCS#1 v1.5 / ECDSA; Ed25519 keys sign
//! the 32 digest bytes directly.
//!
//! # Example
//!
//! ```
//! use sigblock_crypto::{KeyPair, PayloadDigest};
//!
//! let keypair = KeyPair::generate();
//! let payload = b"hello\nworld\n";
//!
//! let signature = keypair.sign_payload(payload);
//! assert!(keypair.public_key().verify(payload, &signature).is_ok());
//!
//! println!("digest: {}", PayloadDigest::of(payload));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod digest;
mod error;
mod keypair;
mod public_key;
mod signature;

pub use digest::PayloadDigest;
pub use error::{CryptoError, CryptoResult};
pub use keypair::KeyPair;
pub use public_key::{KeyAlgorithm, PublicKey};
pub use signature::SignatureBytes;
