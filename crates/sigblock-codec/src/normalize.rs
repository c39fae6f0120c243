//! Payload normalization.
//!
//! Signer and verifier must hash byte-identical text, so this is the single
//! place the normalized form is produced. The rule:
//!
//! - drop trailing carriage returns from every line, then join the lines
//!   with `\n`;
//! - drop every trailing line that is empty or holds only POSIX whitespace
//!   (space, tab, CR, VT, FF);
//! - end with exactly one `\n` if any content is left, otherwise produce the
//!   empty string.
//!
//! Internal blank lines and trailing whitespace inside content lines are
//! kept as-is.

use std::fmt;

use serde::Serialize;
use sigblock_crypto::PayloadDigest;

use crate::document;

/// Normalized payload text: the exact bytes the signature covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedPayload(String);

impl NormalizedPayload {
    /// Normalize raw payload text (split into lines first).
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        normalize(document::lines(text))
    }

    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The normalized bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the payload has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SHA-256 digest of the normalized bytes.
    #[must_use]
    pub fn digest(&self) -> PayloadDigest {
        PayloadDigest::of(self.as_bytes())
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for NormalizedPayload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Whether a line is blank: empty or only POSIX `[:space:]` characters.
fn is_blank(line: &str) -> bool {
    line.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c'))
}

/// Normalize payload lines.
pub fn normalize<I, S>(lines: I) -> NormalizedPayload
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    let mut pending_blank = String::new();

    for line in lines {
        let line = document::line_content(line.as_ref());
        if is_blank(line) {
            // Held back until a content line proves it is not trailing.
            pending_blank.push_str(line);
            pending_blank.push('\n');
        } else {
            out.push_str(&pending_blank);
            pending_blank.clear();
            out.push_str(line);
            out.push('\n');
        }
    }

    NormalizedPayload(out)
}
