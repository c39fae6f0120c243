//! Prelude module - commonly used types for convenient import.
//!
//! Use `use sigblock_crypto::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use sigblock_crypto::prelude::*;
//!
//! let keypair = KeyPair::generate();
//! let signature = keypair.sign_payload(b"hello\n");
//! assert!(keypair.public_key().verify(b"hello\n", &signature).is_ok());
//! ```

// Errors
pub use crate::{CryptoError, CryptoResult};

// Key types
pub use crate::{KeyAlgorithm, KeyPair, PublicKey};

// Signature
pub use crate::SignatureBytes;

// Digest
pub use crate::PayloadDigest;
