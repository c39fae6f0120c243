//! End-to-end verification scenarios against OpenSSL-generated fixtures.

use sigblock_codec::{
    CodecError, ExitOutcome, Limits, VerificationReport, embed, verify_document,
};
use sigblock_crypto::KeyAlgorithm;
use sigblock_test::{Scratch, fixtures, init_test_logging};

fn verify(doc: &str, key: &str) -> (VerificationReport, Result<(), CodecError>) {
    init_test_logging();
    let scratch = Scratch::new();
    let doc_path = scratch.write("document.txt", doc);
    let key_path = scratch.write("key.pub", key);

    let mut report = VerificationReport::new(&doc_path);
    let result = verify_document(&doc_path, &key_path, Limits::default(), &mut report);
    report.finish(&result);
    (report, result.map(|_| ()))
}

#[test]
fn valid_documents_for_every_key_type() {
    let cases = [
        (fixtures::HELLO_RSA_SIGNED, fixtures::RSA_PUBLIC_KEY, KeyAlgorithm::RsaPkcs1Sha256),
        (fixtures::HELLO_EC_SIGNED, fixtures::EC_P256_PUBLIC_KEY, KeyAlgorithm::EcdsaP256Sha256),
        (fixtures::HELLO_ED25519_SIGNED, fixtures::ED25519_PUBLIC_KEY, KeyAlgorithm::Ed25519Sha256),
    ];

    for (doc, key, algorithm) in cases {
        let (report, result) = verify(doc, key);
        assert!(result.is_ok(), "{algorithm}: {result:?}");
        assert!(report.valid);
        assert_eq!(report.algorithm, Some(algorithm));
        assert!(report.payload.as_deref().unwrap().contains("hello\nworld"));
    }
}

#[test]
fn trailing_blank_lines_and_crlf_still_verify() {
    let padded = fixtures::HELLO_RSA_SIGNED.replacen("world\n", "world\n\n  \n\t\n", 1);
    let (_, result) = verify(&padded, fixtures::RSA_PUBLIC_KEY);
    assert!(result.is_ok());

    let crlf = fixtures::HELLO_EC_SIGNED.replace('\n', "\r\n");
    let (_, result) = verify(&crlf, fixtures::EC_P256_PUBLIC_KEY);
    assert!(result.is_ok());
}

#[test]
fn payload_after_block_is_covered() {
    // Moving a payload line below the block keeps the same payload order.
    let moved = "hello\n-----BEGIN SIGN-----\n".to_owned()
        + fixtures::HELLO_ED25519_SIGNATURE_B64
        + "\n-----END SIGN-----\nworld\n";
    let (_, result) = verify(&moved, fixtures::ED25519_PUBLIC_KEY);
    assert!(result.is_ok());
}

#[test]
fn mismatched_key_fails() {
    let (report, result) = verify(fixtures::HELLO_RSA_SIGNED, fixtures::RSA_OTHER_PUBLIC_KEY);

    assert!(matches!(result, Err(CodecError::VerificationFailed(_))));
    assert_eq!(report.error_kind, Some("VerificationFailed"));
    assert_eq!(ExitOutcome::from(&result).code(), 1);
    // Diagnostics were captured before the failing stage.
    assert_eq!(report.payload.as_deref(), Some(fixtures::HELLO_PAYLOAD));
}

#[test]
fn wrong_algorithm_key_fails() {
    let (_, result) = verify(fixtures::HELLO_RSA_SIGNED, fixtures::EC_P256_PUBLIC_KEY);
    assert!(matches!(result, Err(CodecError::VerificationFailed(_))));
}

#[test]
fn tampered_payload_fails() {
    let tampered = fixtures::HELLO_ED25519_SIGNED.replacen("world", "World", 1);
    let (_, result) = verify(&tampered, fixtures::ED25519_PUBLIC_KEY);
    assert!(matches!(result, Err(CodecError::VerificationFailed(_))));
}

#[test]
fn missing_marker_is_missing_signature() {
    let (report, result) = verify("hello\nworld\n", fixtures::RSA_PUBLIC_KEY);

    assert!(matches!(result, Err(CodecError::MissingSignature)));
    assert_eq!(report.payload.as_deref(), Some("hello\nworld\n"));
    assert_eq!(report.signature.as_deref(), Some(""));
}

#[test]
fn empty_and_undecodable_blocks() {
    let (_, result) = verify(
        "hello\n-----BEGIN SIGN-----\n   \n-----END SIGN-----\n",
        fixtures::RSA_PUBLIC_KEY,
    );
    assert!(matches!(result, Err(CodecError::EmptySignature)));

    let (report, result) = verify(
        "hello\n-----BEGIN SIGN-----\n%%%\n-----END SIGN-----\n",
        fixtures::RSA_PUBLIC_KEY,
    );
    assert!(matches!(result, Err(CodecError::Base64Decode(_))));
    assert_eq!(report.error_kind, Some("Base64DecodeError"));
}

#[test]
fn structural_errors_fail_closed() {
    let doubled = format!("{}{}", fixtures::HELLO_RSA_SIGNED, fixtures::HELLO_RSA_SIGNED);
    let (_, result) = verify(&doubled, fixtures::RSA_PUBLIC_KEY);
    assert!(matches!(
        result,
        Err(CodecError::MultipleSignatureBlocks { line: 13 })
    ));

    let truncated = fixtures::HELLO_RSA_SIGNED.replace("-----END SIGN-----\n", "");
    let (_, result) = verify(&truncated, fixtures::RSA_PUBLIC_KEY);
    assert!(matches!(
        result,
        Err(CodecError::UnterminatedSignatureBlock { line: 3 })
    ));
}

#[test]
fn missing_key_is_file_not_found_before_parsing() {
    let scratch = Scratch::new();
    // Broken structure: would be UnexpectedMarker if it were parsed.
    let doc = scratch.write("doc.txt", "-----END SIGN-----\n");

    let err = verify_document(&doc, &scratch.join("absent.pub"), Limits::default(), &mut ())
        .unwrap_err();
    assert!(matches!(err, CodecError::FileNotFound { .. }));
}

#[test]
fn invalid_key_file() {
    let (_, result) = verify(fixtures::HELLO_RSA_SIGNED, "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n");
    assert!(matches!(result, Err(CodecError::InvalidPublicKey(_))));
}

#[test]
fn document_size_limit() {
    let scratch = Scratch::new();
    let doc = scratch.write("doc.txt", fixtures::HELLO_RSA_SIGNED);
    let key = scratch.write("key.pub", fixtures::RSA_PUBLIC_KEY);

    let err = verify_document(&doc, &key, Limits { max_document_bytes: 16 }, &mut ())
        .unwrap_err();
    assert!(matches!(err, CodecError::DocumentTooLarge { limit: 16, .. }));
}

#[test]
fn sign_document_then_verify() {
    let scratch = Scratch::new();
    let doc = scratch.write("notes.txt", "first\n\nsecond\n\n\n");
    let private = scratch.write("signer.key", fixtures::ED25519_PRIVATE_KEY);
    let public = scratch.write("signer.pub", fixtures::ED25519_PUBLIC_KEY);

    let signed = embed::sign_document(&doc, &private, Limits::default(), 64).unwrap();
    assert_eq!(signed.payload.as_str(), "first\n\nsecond\n");

    let out = scratch.write("notes.signed.txt", &signed.text);
    let verified = verify_document(&out, &public, Limits::default(), &mut ()).unwrap();
    assert_eq!(verified.digest, signed.digest);
}

#[test]
fn sign_document_rejects_public_key_as_private() {
    let scratch = Scratch::new();
    let doc = scratch.write("notes.txt", "text\n");
    let public = scratch.write("signer.pub", fixtures::ED25519_PUBLIC_KEY);

    let err = embed::sign_document(&doc, &public, Limits::default(), 64).unwrap_err();
    assert!(matches!(err, CodecError::InvalidPrivateKey(_)));
}
