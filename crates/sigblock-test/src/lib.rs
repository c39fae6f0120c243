//! Sigblock Test - Shared test fixtures and helpers.
//!
//! This crate provides OpenSSL-generated key material, signed documents and
//! scratch-directory helpers used across the sigblock crates as a
//! dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! sigblock-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use sigblock_test::{Scratch, fixtures};
//!
//! let scratch = Scratch::new();
//! let doc = scratch.write("doc.txt", fixtures::HELLO_RSA_SIGNED);
//! let key = scratch.write("key.pub", fixtures::RSA_PUBLIC_KEY);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures;
pub mod scratch;

pub use scratch::{Scratch, init_test_logging};
