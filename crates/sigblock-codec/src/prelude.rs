//! Prelude module - commonly used types for convenient import.
//!
//! Use `use sigblock_codec::prelude::*;` to import all essential types.

// Errors
pub use crate::{CodecError, CodecResult, ExitOutcome};

// Pipeline
pub use crate::{Limits, NormalizedPayload, VerifiedDocument, VerifyObserver, verify_document};

// Output
pub use crate::{SignedDocument, VerificationReport};
