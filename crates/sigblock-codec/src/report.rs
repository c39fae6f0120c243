//! Serializable verification reports.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sigblock_crypto::KeyAlgorithm;

use crate::error::CodecResult;
use crate::normalize::NormalizedPayload;
use crate::verify::{VerifiedDocument, VerifyObserver};

/// Everything learned while verifying one document.
///
/// Fields stay `None` for stages the pipeline never reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Path of the verified document.
    pub document: PathBuf,
    /// Scheme of the public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<KeyAlgorithm>,
    /// Normalized payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Raw signature block text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// SHA-256 digest of the payload, hex encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Verdict.
    pub valid: bool,
    /// Error kind name when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    /// Error message when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationReport {
    /// Start an empty report for `document`.
    #[must_use]
    pub fn new(document: impl AsRef<Path>) -> Self {
        Self {
            document: document.as_ref().to_path_buf(),
            algorithm: None,
            payload: None,
            signature: None,
            digest: None,
            valid: false,
            error_kind: None,
            error: None,
        }
    }

    /// Record the pipeline result.
    pub fn finish(&mut self, result: &CodecResult<VerifiedDocument>) {
        match result {
            Ok(verified) => {
                self.valid = true;
                self.algorithm = Some(verified.algorithm);
                self.digest = Some(verified.digest.to_hex());
                self.error_kind = None;
                self.error = None;
            },
            Err(e) => {
                self.valid = false;
                self.error_kind = Some(e.kind());
                self.error = Some(e.to_string());
            },
        }
    }
}

impl VerifyObserver for VerificationReport {
    fn key_loaded(&mut self, algorithm: KeyAlgorithm) {
        self.algorithm = Some(algorithm);
    }

    fn extracted(&mut self, payload: &NormalizedPayload, signature_text: &str) {
        self.payload = Some(payload.as_str().to_owned());
        self.signature = Some(signature_text.to_owned());
        self.digest = Some(payload.digest().to_hex());
    }
}
