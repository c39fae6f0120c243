//! The verification pipeline.
//!
//! ```text
//! files exist? ─▶ load key ─▶ read ─▶ split ─▶ normalize ─▶ (observer) ─▶ decode ─▶ verify
//! ```
//!
//! Each stage short-circuits with its own [`CodecError`]. The observer sees
//! the normalized payload and the raw signature text before the signature is
//! decoded, so callers can show what was extracted even when a later stage
//! fails.

use std::path::Path;

use sigblock_crypto::{KeyAlgorithm, PayloadDigest, PublicKey, SignatureBytes};
use tracing::{debug, info, info_span, warn};

use crate::document;
use crate::envelope;
use crate::error::{CodecError, CodecResult};
use crate::normalize::{self, NormalizedPayload};
use crate::source::{self, Limits};

/// Callbacks fired as the pipeline makes progress.
///
/// Every method has a no-op default, so implementors only override the
/// stages they care about.
pub trait VerifyObserver {
    /// The public key was loaded.
    fn key_loaded(&mut self, _algorithm: KeyAlgorithm) {}

    /// The document was split and normalized.
    ///
    /// Fired whenever the split succeeds, including when no signature block
    /// was found (`signature_text` is then empty).
    fn extracted(&mut self, _payload: &NormalizedPayload, _signature_text: &str) {}
}

impl VerifyObserver for () {}

/// Outcome of a successful document verification.
#[derive(Debug, Clone)]
pub struct VerifiedDocument {
    /// Scheme of the key that verified the signature.
    pub algorithm: KeyAlgorithm,
    /// The payload the signature covers.
    pub payload: NormalizedPayload,
    /// Signature block text as it appeared in the document.
    pub signature_text: String,
    /// SHA-256 digest of the payload.
    pub digest: PayloadDigest,
}

/// Verify a signature over a normalized payload.
///
/// # Errors
///
/// Returns [`CodecError::VerificationFailed`] carrying the cryptographic
/// library's diagnostic when the signature does not match.
pub fn verify(
    payload: &NormalizedPayload,
    signature: &SignatureBytes,
    key: &PublicKey,
) -> CodecResult<()> {
    key.verify(payload.as_bytes(), signature)
        .map_err(|e| CodecError::VerificationFailed(e.to_string()))
}

/// Load a PEM public key file.
///
/// # Errors
///
/// Returns [`CodecError::InvalidPublicKey`] if the file cannot be read or
/// does not hold a supported key.
pub fn load_public_key(path: &Path) -> CodecResult<PublicKey> {
    PublicKey::from_pem_file(path).map_err(CodecError::from_public_key_error)
}

/// Verify the signature block embedded in the document at `document_path`.
///
/// # Errors
///
/// Fails closed with the error of the first failing stage; see the module
/// docs for the order.
pub fn verify_document<O>(
    document_path: &Path,
    key_path: &Path,
    limits: Limits,
    observer: &mut O,
) -> CodecResult<VerifiedDocument>
where
    O: VerifyObserver + ?Sized,
{
    let span = info_span!(
        "verify_document",
        document = %document_path.display(),
        key = %key_path.display(),
    );
    let _guard = span.enter();

    source::require_file(document_path)?;
    source::require_file(key_path)?;

    let key = load_public_key(key_path)?;
    debug!(algorithm = %key.algorithm(), "public key loaded");
    observer.key_loaded(key.algorithm());

    let text = source::read_document(document_path, limits)?;
    let parts = document::split_text(&text)?;
    let payload = normalize::normalize(&parts.payload);
    let signature_text = parts.signature_text();
    debug!(
        payload_bytes = payload.as_bytes().len(),
        signature_lines = parts.signature.len(),
        found = parts.found,
        "document split"
    );
    observer.extracted(&payload, &signature_text);

    if !parts.found {
        warn!("no signature block");
        return Err(CodecError::MissingSignature);
    }

    let signature = envelope::decode_signature(&parts.signature)?;
    let digest = payload.digest();
    debug!(digest = %digest, "verifying");

    if let Err(e) = verify(&payload, &signature, &key) {
        warn!(error = %e, "signature rejected");
        return Err(e);
    }

    info!(algorithm = %key.algorithm(), "signature valid");
    Ok(VerifiedDocument {
        algorithm: key.algorithm(),
        payload,
        signature_text,
        digest,
    })
}
