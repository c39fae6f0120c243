//! Verify command - check the signature block embedded in a document.

use std::path::Path;

use sigblock_codec::{
    ExitOutcome, NormalizedPayload, VerificationReport, VerifyObserver, verify_document,
};
use sigblock_crypto::KeyAlgorithm;

use super::{OutputFormat, print_json};
use crate::config_bridge::Settings;
use crate::theme::Theme;

/// Fills the report and, in pretty mode, streams the extracted content to
/// stdout as soon as it is known so it is visible when a later stage fails.
struct Streaming {
    report: VerificationReport,
    echo: bool,
}

impl VerifyObserver for Streaming {
    fn key_loaded(&mut self, algorithm: KeyAlgorithm) {
        self.report.key_loaded(algorithm);
    }

    fn extracted(&mut self, payload: &NormalizedPayload, signature_text: &str) {
        self.report.extracted(payload, signature_text);
        if !self.echo {
            return;
        }

        println!("{}", Theme::header("Payload (normalized)"));
        print!("{payload}");
        println!("{}", Theme::separator());
        println!("{}", Theme::header("Signature block"));
        println!("{signature_text}");
        println!("{}", Theme::separator());
    }
}

/// Verify `document` against `public_key`.
///
/// Verification failures are reported on stdout and turned into
/// [`ExitOutcome::Failure`]; they are not command errors.
pub(crate) fn run(
    document: &Path,
    public_key: &Path,
    settings: &Settings,
    format: OutputFormat,
) -> anyhow::Result<ExitOutcome> {
    let mut streaming = Streaming {
        report: VerificationReport::new(document),
        echo: format == OutputFormat::Pretty,
    };
    let result = verify_document(document, public_key, settings.limits, &mut streaming);
    let mut report = streaming.report;
    report.finish(&result);

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Pretty => print_verdict(&report),
    }
    Ok(ExitOutcome::from(&result))
}

fn print_verdict(report: &VerificationReport) {
    if report.valid {
        let verdict = match report.algorithm {
            Some(algorithm) => format!("Signature valid ({algorithm})"),
            None => "Signature valid".to_owned(),
        };
        println!("{}", Theme::success(&verdict));
        if let Some(digest) = &report.digest {
            println!("{}", Theme::kv("SHA-256", digest));
        }
        return;
    }

    let verdict = if report.error_kind == Some("VerificationFailed") {
        "Signature invalid"
    } else {
        "Verification failed"
    };
    println!("{}", Theme::error(verdict));
    if let Some(error) = &report.error {
        println!("{}", Theme::kv("Error", error));
    }
    if let Some(kind) = report.error_kind {
        println!("{}", Theme::dimmed(&format!("  ({kind})")));
    }
}
