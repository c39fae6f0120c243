//! Embedding signatures into documents.

use std::path::Path;

use sigblock_crypto::{KeyPair, PayloadDigest, SignatureBytes};
use tracing::{debug, info, info_span};

use crate::document::{self, BEGIN_MARKER, END_MARKER};
use crate::envelope;
use crate::error::{CodecError, CodecResult};
use crate::normalize::{self, NormalizedPayload};
use crate::source::{self, Limits};

/// Normalize text that is about to be signed.
///
/// # Errors
///
/// Returns [`CodecError::UnexpectedMarker`] if the text already contains a
/// marker line, which would make the signed document ambiguous.
pub fn prepare_payload(text: &str) -> CodecResult<NormalizedPayload> {
    for (number, line) in (1_usize..).zip(document::lines(text)) {
        let marker = match line {
            BEGIN_MARKER => BEGIN_MARKER,
            END_MARKER => END_MARKER,
            _ => continue,
        };
        return Err(CodecError::UnexpectedMarker {
            line: number,
            marker,
        });
    }
    Ok(normalize::normalize(document::lines(text)))
}

/// Render a signed document: payload, marker, wrapped base64, marker.
#[must_use]
pub fn embed(payload: &NormalizedPayload, signature: &SignatureBytes, wrap_width: usize) -> String {
    let mut out = String::with_capacity(
        payload
            .as_bytes()
            .len()
            .saturating_add(signature.len().saturating_mul(2))
            .saturating_add(64),
    );
    out.push_str(payload.as_str());
    out.push_str(BEGIN_MARKER);
    out.push('\n');
    for line in envelope::encode_signature(signature, wrap_width) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(END_MARKER);
    out.push('\n');
    out
}

/// A document signed in memory.
#[derive(Debug, Clone)]
pub struct SignedDocument {
    /// Full signed document text.
    pub text: String,
    /// The payload that was signed.
    pub payload: NormalizedPayload,
    /// SHA-256 digest of the payload.
    pub digest: PayloadDigest,
    /// Short id of the signing key.
    pub key_id: String,
}

/// Sign `text` with `keypair` and embed the signature.
///
/// # Errors
///
/// See [`prepare_payload`].
pub fn sign_text(text: &str, keypair: &KeyPair, wrap_width: usize) -> CodecResult<SignedDocument> {
    let payload = prepare_payload(text)?;
    let signature = keypair.sign_payload(payload.as_bytes());
    let digest = payload.digest();
    debug!(digest = %digest, key_id = %keypair.key_id_hex(), "payload signed");

    Ok(SignedDocument {
        text: embed(&payload, &signature, wrap_width),
        payload,
        digest,
        key_id: keypair.key_id_hex(),
    })
}

/// Load a PKCS#8 PEM private key file.
///
/// # Errors
///
/// Returns [`CodecError::InvalidPrivateKey`] if the file cannot be read or
/// is not an Ed25519 key.
pub fn load_private_key(path: &Path) -> CodecResult<KeyPair> {
    KeyPair::from_pem_file(path).map_err(CodecError::from_private_key_error)
}

/// Sign the document at `document_path` with the private key at `key_path`.
///
/// # Errors
///
/// - [`CodecError::FileNotFound`] if either path is not a regular file.
/// - [`CodecError::InvalidPrivateKey`] if the key cannot be loaded.
/// - Any error from [`source::read_document`] or [`prepare_payload`].
pub fn sign_document(
    document_path: &Path,
    key_path: &Path,
    limits: Limits,
    wrap_width: usize,
) -> CodecResult<SignedDocument> {
    let span = info_span!("sign_document", document = %document_path.display());
    let _guard = span.enter();

    source::require_file(document_path)?;
    source::require_file(key_path)?;

    let keypair = load_private_key(key_path)?;
    let text = source::read_document(document_path, limits)?;
    let signed = sign_text(&text, &keypair, wrap_width)?;

    info!(key_id = %signed.key_id, "document signed");
    Ok(signed)
}
