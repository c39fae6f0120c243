//! Keyless inspection of a signed document.

use std::path::Path;

use sigblock_crypto::{PayloadDigest, SignatureBytes};
use tracing::debug;

use crate::document;
use crate::envelope;
use crate::error::CodecResult;
use crate::normalize::{self, NormalizedPayload};
use crate::source::{self, Limits};

/// What a document carries, without checking the signature.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Normalized payload.
    pub payload: NormalizedPayload,
    /// SHA-256 digest of the payload.
    pub digest: PayloadDigest,
    /// Signature block text as it appeared in the document.
    pub signature_text: String,
    /// Decoded signature, `None` when the document has no block.
    pub signature: Option<SignatureBytes>,
}

/// Split, normalize and decode document text.
///
/// # Errors
///
/// Structural errors from [`document::split`] and decoding errors from
/// [`envelope::decode_signature`]. A missing block is not an error here.
pub fn inspect_text(text: &str) -> CodecResult<Inspection> {
    let parts = document::split_text(text)?;
    let payload = normalize::normalize(&parts.payload);
    let signature = if parts.found {
        Some(envelope::decode_signature(&parts.signature)?)
    } else {
        None
    };
    debug!(found = parts.found, "document inspected");

    Ok(Inspection {
        digest: payload.digest(),
        payload,
        signature_text: parts.signature_text(),
        signature,
    })
}

/// Read and inspect the document at `path`.
///
/// # Errors
///
/// Errors from [`source::read_document`] and [`inspect_text`].
pub fn inspect_document(path: &Path, limits: Limits) -> CodecResult<Inspection> {
    let text = source::read_document(path, limits)?;
    inspect_text(&text)
}
