//! Base64 signature envelope.

use sigblock_crypto::{CryptoError, SignatureBytes};
use tracing::debug;

use crate::error::{CodecError, CodecResult};

/// Default column width of wrapped base64 lines.
pub const DEFAULT_WRAP_WIDTH: usize = 64;

/// Join signature lines and strip embedded CR/LF characters.
#[must_use]
pub fn envelope_text<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .flat_map(|line| line.as_ref().chars())
        .filter(|c| !matches!(c, '\n' | '\r'))
        .collect()
}

/// Decode the signature lines of a block into raw signature bytes.
///
/// # Errors
///
/// - [`CodecError::EmptySignature`] if there is no non-whitespace text.
/// - [`CodecError::Base64Decode`] if the text is not standard padded base64.
pub fn decode_signature<S: AsRef<str>>(lines: &[S]) -> CodecResult<SignatureBytes> {
    let text = envelope_text(lines);
    if text.trim().is_empty() {
        return Err(CodecError::EmptySignature);
    }

    let signature = SignatureBytes::from_base64(&text).map_err(|e| match e {
        CryptoError::InvalidBase64Encoding(msg) => CodecError::Base64Decode(msg),
        other => CodecError::Base64Decode(other.to_string()),
    })?;
    debug!(bytes = signature.len(), "decoded signature envelope");
    Ok(signature)
}

/// Encode signature bytes as base64 lines of at most `width` columns.
///
/// A width of 0 keeps the whole signature on one line.
#[must_use]
pub fn encode_signature(signature: &SignatureBytes, width: usize) -> Vec<String> {
    let encoded = signature.to_base64();
    if width == 0 {
        return vec![encoded];
    }
    encoded
        .as_bytes()
        .chunks(width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigblock_test::fixtures;

    #[test]
    fn test_decode_single_line() {
        let sig = decode_signature(&["QUJD"]).unwrap();
        assert_eq!(sig.as_bytes(), b"ABC");
    }

    #[test]
    fn test_decode_wrapped_lines() {
        let lines = encode_signature(
            &SignatureBytes::from_base64(fixtures::HELLO_RSA_SIGNATURE_B64).unwrap(),
            64,
        );
        assert!(lines.len() > 1);

        let sig = decode_signature(&lines).unwrap();
        assert_eq!(sig.to_base64(), fixtures::HELLO_RSA_SIGNATURE_B64);
        assert_eq!(sig.len(), 256);
    }

    #[test]
    fn test_carriage_returns_stripped() {
        let sig = decode_signature(&["QU\r", "JD\r"]).unwrap();
        assert_eq!(sig.as_bytes(), b"ABC");
    }

    #[test]
    fn test_empty_signature() {
        assert!(matches!(
            decode_signature::<&str>(&[]),
            Err(CodecError::EmptySignature)
        ));
        assert!(matches!(
            decode_signature(&["", "   ", "\t"]),
            Err(CodecError::EmptySignature)
        ));
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_signature(&["not*base64!"]).unwrap_err();
        assert!(matches!(err, CodecError::Base64Decode(_)));
        assert_eq!(err.kind(), "Base64DecodeError");
    }

    #[test]
    fn test_unpadded_rejected() {
        assert!(matches!(
            decode_signature(&["QUI"]),
            Err(CodecError::Base64Decode(_))
        ));
    }

    #[test]
    fn test_encode_wrap_widths() {
        let sig = SignatureBytes::from_vec(vec![0xAB; 64]);

        let lines = encode_signature(&sig, 64);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 64);
        assert_eq!(lines[1].len(), 24);

        let lines = encode_signature(&sig, 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 88);
    }
}
