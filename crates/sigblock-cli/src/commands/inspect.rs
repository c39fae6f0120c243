//! Inspect command - show what a document carries without a key.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sigblock_codec::{ExitOutcome, inspect};

use super::{OutputFormat, print_json};
use crate::config_bridge::Settings;
use crate::theme::Theme;

#[derive(Serialize)]
struct InspectReport {
    document: PathBuf,
    payload: String,
    digest: String,
    signed: bool,
    signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature_bytes: Option<usize>,
}

/// Split, normalize and decode `document`, then print the parts.
pub(crate) fn run(
    document: &Path,
    settings: &Settings,
    format: OutputFormat,
) -> anyhow::Result<ExitOutcome> {
    let inspection = inspect::inspect_document(document, settings.limits)?;

    match format {
        OutputFormat::Json => {
            print_json(&InspectReport {
                document: document.to_path_buf(),
                payload: inspection.payload.as_str().to_owned(),
                digest: inspection.digest.to_hex(),
                signed: inspection.signature.is_some(),
                signature: inspection.signature_text.clone(),
                signature_bytes: inspection.signature.as_ref().map(|s| s.len()),
            })?;
        },
        OutputFormat::Pretty => {
            println!("{}", Theme::header("Payload (normalized)"));
            print!("{}", inspection.payload);
            println!("{}", Theme::separator());
            println!("{}", Theme::kv("SHA-256", &inspection.digest.to_hex()));
            match &inspection.signature {
                Some(signature) => {
                    println!("{}", Theme::kv("Signature", &format!("{} bytes", signature.len())));
                    println!("{}", Theme::kv("Hex", &signature.to_hex()));
                },
                None => println!("{}", Theme::warning("No signature block")),
            }
        },
    }

    Ok(ExitOutcome::Success)
}
