//! Sign command - embed a fresh Ed25519 signature into a document.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use sigblock_codec::{ExitOutcome, embed};

use super::{OutputFormat, print_json};
use crate::config_bridge::Settings;
use crate::theme::Theme;

#[derive(Serialize)]
struct SignReport<'a> {
    document: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Path>,
    key_id: &'a str,
    digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    signed: Option<&'a str>,
}

/// Sign `document` with `private_key` and write the result to `output`, or
/// to stdout when no output path is given.
pub(crate) fn run(
    document: &Path,
    private_key: &Path,
    output: Option<&PathBuf>,
    wrap_width: Option<usize>,
    settings: &Settings,
    format: OutputFormat,
) -> anyhow::Result<ExitOutcome> {
    let width = wrap_width.unwrap_or(settings.wrap_width);
    let signed = embed::sign_document(document, private_key, settings.limits, width)?;

    if let Some(path) = output {
        std::fs::write(path, &signed.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => print_json(&SignReport {
            document,
            output: output.map(PathBuf::as_path),
            key_id: &signed.key_id,
            digest: signed.digest.to_hex(),
            signed: output.is_none().then_some(signed.text.as_str()),
        })?,
        OutputFormat::Pretty => match output {
            Some(path) => {
                println!(
                    "{}",
                    Theme::success(&format!("Signed {} -> {}", document.display(), path.display()))
                );
                println!("{}", Theme::kv("Key ID", &signed.key_id));
                println!("{}", Theme::kv("Digest", &signed.digest.to_hex()));
            },
            None => print!("{}", signed.text),
        },
    }

    Ok(ExitOutcome::Success)
}
