//! Splitting a signed document into payload and signature lines.
//!
//! The scan is a two-state automaton over whole lines:
//!
//! ```text
//!             BEGIN                 END
//!   Payload ────────▶ InSignature ───────▶ Closed
//! ```
//!
//! Marker lines must match exactly and belong to neither output. Nesting and
//! repeated blocks are rejected instead of silently picking one block.

use tracing::trace;

use crate::error::{CodecError, CodecResult};

/// Start marker line of a signature block.
pub const BEGIN_MARKER: &str = "-----BEGIN SIGN-----";

/// End marker line of a signature block.
pub const END_MARKER: &str = "-----END SIGN-----";

/// Split document text into lines.
///
/// Lines end at `\n`. Every carriage return before the terminator (or at the
/// end of an unterminated final line) is dropped, so `"a\r\r\n"` and `"a"`
/// are the same line. A trailing terminator does not produce an extra empty
/// line.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(line_content)
}

/// A line without its trailing carriage returns.
///
/// [`split`], payload normalization and the signer all compare and
/// emit lines in this form.
#[must_use]
pub fn line_content(line: &str) -> &str {
    line.trim_end_matches('\r')
}

/// Whether `line` is one of the two marker lines.
#[must_use]
pub fn is_marker(line: &str) -> bool {
    let line = line_content(line);
    line == BEGIN_MARKER || line == END_MARKER
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Payload,
    /// Inside a block opened at the given 1-based line.
    InSignature(usize),
    Closed,
}

/// A document split into its payload and signature parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitDocument<'a> {
    /// Lines outside the signature block, in document order.
    pub payload: Vec<&'a str>,
    /// Lines strictly between the markers.
    pub signature: Vec<&'a str>,
    /// Whether a start marker was seen.
    pub found: bool,
}

impl SplitDocument<'_> {
    /// The signature lines as they appear in the document, joined by `\n`.
    #[must_use]
    pub fn signature_text(&self) -> String {
        self.signature.join("\n")
    }
}

/// Split lines into payload and signature parts.
///
/// # Errors
///
/// - [`CodecError::MultipleSignatureBlocks`] for a start marker after a
///   closed block.
/// - [`CodecError::UnexpectedMarker`] for a start marker inside an open block
///   or an end marker outside one.
/// - [`CodecError::UnterminatedSignatureBlock`] if input ends inside a block.
pub fn split<'a, I>(lines: I) -> CodecResult<SplitDocument<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut doc = SplitDocument::default();
    let mut state = ScanState::Payload;

    for (number, line) in (1_usize..).zip(lines) {
        let line = line_content(line);
        state = match (state, line) {
            (ScanState::Payload, BEGIN_MARKER) => {
                trace!(line = number, "signature block opened");
                doc.found = true;
                ScanState::InSignature(number)
            },
            (ScanState::Closed, BEGIN_MARKER) => {
                return Err(CodecError::MultipleSignatureBlocks { line: number });
            },
            (ScanState::InSignature(_), BEGIN_MARKER) => {
                return Err(CodecError::UnexpectedMarker {
                    line: number,
                    marker: BEGIN_MARKER,
                });
            },
            (ScanState::InSignature(_), END_MARKER) => {
                trace!(line = number, "signature block closed");
                ScanState::Closed
            },
            (ScanState::Payload | ScanState::Closed, END_MARKER) => {
                return Err(CodecError::UnexpectedMarker {
                    line: number,
                    marker: END_MARKER,
                });
            },
            (ScanState::InSignature(opened), _) => {
                doc.signature.push(line);
                ScanState::InSignature(opened)
            },
            (other, _) => {
                doc.payload.push(line);
                other
            },
        };
    }

    if let ScanState::InSignature(opened) = state {
        return Err(CodecError::UnterminatedSignatureBlock { line: opened });
    }

    Ok(doc)
}

/// Split document text (see [`lines`] and [`split`]).
///
/// # Errors
///
/// See [`split`].
pub fn split_text(text: &str) -> CodecResult<SplitDocument<'_>> {
    split(lines(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let doc = split_text("hello\nworld\n-----BEGIN SIGN-----\nQUJD\n-----END SIGN-----\n")
            .unwrap();

        assert!(doc.found);
        assert_eq!(doc.payload, vec!["hello", "world"]);
        assert_eq!(doc.signature, vec!["QUJD"]);
    }

    #[test]
    fn test_split_without_block() {
        let doc = split_text("just\ntext\n").unwrap();

        assert!(!doc.found);
        assert_eq!(doc.payload, vec!["just", "text"]);
        assert!(doc.signature.is_empty());
    }

    #[test]
    fn test_payload_after_block_is_kept_in_order() {
        let text = "a\n-----BEGIN SIGN-----\nX\nY\n-----END SIGN-----\nb\nc";
        let doc = split_text(text).unwrap();

        assert_eq!(doc.payload, vec!["a", "b", "c"]);
        assert_eq!(doc.signature, vec!["X", "Y"]);
        assert_eq!(doc.signature_text(), "X\nY");
    }

    #[test]
    fn test_empty_block_is_found() {
        let doc = split_text("a\n-----BEGIN SIGN-----\n-----END SIGN-----\n").unwrap();

        assert!(doc.found);
        assert!(doc.signature.is_empty());
    }

    #[test]
    fn test_markers_must_match_exactly() {
        let text = "-----BEGIN SIGN----- \n  -----END SIGN-----\n-----BEGIN SIGN-----x\n";
        let doc = split_text(text).unwrap();

        assert!(!doc.found);
        assert_eq!(doc.payload.len(), 3);
    }

    #[test]
    fn test_crlf_markers() {
        let text = "hello\r\n-----BEGIN SIGN-----\r\nQUJD\r\n-----END SIGN-----\r\n";
        let doc = split_text(text).unwrap();

        assert!(doc.found);
        assert_eq!(doc.payload, vec!["hello"]);
        assert_eq!(doc.signature, vec!["QUJD"]);
    }

    #[test]
    fn test_bare_carriage_returns_are_not_content() {
        let text = "foo\r\r\n-----BEGIN SIGN-----\r\r\nQUJD\r\n-----END SIGN-----\rbar\r";
        let doc = split_text(text);
        // "-----END SIGN-----\rbar" is one line, so the block never closes.
        assert!(matches!(doc, Err(CodecError::UnterminatedSignatureBlock { line: 2 })));

        let doc = split_text("foo\r\r\n-----BEGIN SIGN-----\r\nQUJD\r\n-----END SIGN-----\r").unwrap();
        assert!(doc.found);
        assert_eq!(doc.payload, vec!["foo"]);
        assert_eq!(doc.signature, vec!["QUJD"]);

        let doc = split(["a\r", "-----BEGIN SIGN-----\r", "X", "-----END SIGN-----"]).unwrap();
        assert_eq!(doc.payload, vec!["a"]);
        assert!(is_marker("-----END SIGN-----\r\r"));
    }

    #[test]
    fn test_multiple_blocks_rejected() {
        let text = "a\n-----BEGIN SIGN-----\nX\n-----END SIGN-----\n-----BEGIN SIGN-----\nY\n-----END SIGN-----\n";
        let err = split_text(text).unwrap_err();
        assert!(matches!(err, CodecError::MultipleSignatureBlocks { line: 5 }));
    }

    #[test]
    fn test_nested_begin_rejected() {
        let text = "-----BEGIN SIGN-----\n-----BEGIN SIGN-----\n-----END SIGN-----\n";
        let err = split_text(text).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedMarker {
                line: 2,
                marker: BEGIN_MARKER
            }
        ));
    }

    #[test]
    fn test_stray_end_rejected() {
        let err = split_text("a\n-----END SIGN-----\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedMarker {
                line: 2,
                marker: END_MARKER
            }
        ));

        let text = "-----BEGIN SIGN-----\nX\n-----END SIGN-----\n-----END SIGN-----\n";
        let err = split_text(text).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedMarker { line: 4, .. }));
    }

    #[test]
    fn test_unterminated_block_rejected() {
        let err = split_text("a\nb\n-----BEGIN SIGN-----\nQUJD\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnterminatedSignatureBlock { line: 3 }
        ));
    }

    #[test]
    fn test_is_marker() {
        assert!(is_marker(BEGIN_MARKER));
        assert!(is_marker(END_MARKER));
        assert!(!is_marker("-----BEGIN PUBLIC KEY-----"));
    }
}
