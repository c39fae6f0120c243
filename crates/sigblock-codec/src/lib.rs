//! Sigblock Codec - documents that carry their own signature.
//!
//! A signed document is plain text with one marker-delimited block holding a
//! base64 signature:
//!
//! ```text
//! hello
//! world
//! -----BEGIN SIGN-----
//! MEUCIAyy9QAvyImJ9XYpLo1TKZ/yy36c/XikpFhJHKNFTPyIAiEArEAY4AWdATji
//! N2v9qFKqd8VNelxYpZYQugxVSnqPpoc=
//! -----END SIGN-----
//! ```
//!
//! This crate provides:
//! - Splitting a document into payload and signature lines
//! - Payload normalization shared by signer and verifier
//! - Base64 envelope decoding and wrapping
//! - The verification pipeline with progress callbacks
//! - Embedding fresh signatures, and serializable reports
//!
//! # Example
//!
//! ```
//! use sigblock_codec::{NormalizedPayload, document, embed, envelope, verify};
//! use sigblock_crypto::KeyPair;
//!
//! let keypair = KeyPair::generate();
//! let signed = embed::sign_text("hello\nworld\n\n", &keypair, 64).unwrap();
//!
//! let parts = document::split_text(&signed.text).unwrap();
//! let payload = sigblock_codec::normalize(&parts.payload);
//! let signature = envelope::decode_signature(&parts.signature).unwrap();
//!
//! assert_eq!(payload, NormalizedPayload::from_text("hello\nworld\n"));
//! assert!(verify::verify(&payload, &signature, &keypair.public_key()).is_ok());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod document;
pub mod embed;
pub mod envelope;
mod error;
pub mod inspect;
mod normalize;
mod report;
pub mod source;
pub mod verify;

pub use document::{BEGIN_MARKER, END_MARKER, SplitDocument};
pub use embed::SignedDocument;
pub use error::{CodecError, CodecResult, ExitOutcome};
pub use inspect::Inspection;
pub use normalize::{NormalizedPayload, normalize};
pub use report::VerificationReport;
pub use source::Limits;
pub use verify::{VerifiedDocument, VerifyObserver, verify_document};
