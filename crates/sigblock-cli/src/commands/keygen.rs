//! Keygen command - create an Ed25519 signing key pair.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Serialize;
use sigblock_codec::ExitOutcome;
use sigblock_crypto::KeyPair;

use super::{OutputFormat, print_json};
use crate::theme::Theme;

#[derive(Serialize)]
struct KeygenReport {
    key_id: String,
    private_key: PathBuf,
    public_key: PathBuf,
}

/// Write `<dir>/<name>.key` and `<dir>/<name>.pub`.
///
/// An existing private key is only replaced with `force`.
pub(crate) fn run(dir: &Path, name: &str, force: bool, format: OutputFormat) -> anyhow::Result<ExitOutcome> {
    if name.is_empty() || name.contains(['/', '\\']) {
        bail!("invalid key name '{name}'");
    }

    let private_path = dir.join(format!("{name}.key"));
    let public_path = dir.join(format!("{name}.pub"));

    if private_path.exists() {
        if !force {
            bail!(
                "{} already exists (use --force to replace it)",
                private_path.display()
            );
        }
        if format == OutputFormat::Pretty {
            println!(
                "{}",
                Theme::warning("Replacing existing key. Documents signed with it can no longer be re-signed.")
            );
        }
        std::fs::remove_file(&private_path)
            .with_context(|| format!("failed to remove {}", private_path.display()))?;
    }

    let keypair = KeyPair::generate();
    keypair.write_pem_files(&private_path, &public_path)?;
    tracing::info!(key_id = %keypair.key_id_hex(), "generated signing key");

    match format {
        OutputFormat::Json => print_json(&KeygenReport {
            key_id: keypair.key_id_hex(),
            private_key: private_path,
            public_key: public_path,
        })?,
        OutputFormat::Pretty => {
            println!("{}", Theme::success("New signing key generated."));
            println!("{}", Theme::kv("Key ID", &keypair.key_id_hex()));
            println!("{}", Theme::kv("Private", &private_path.display().to_string()));
            println!("{}", Theme::kv("Public", &public_path.display().to_string()));
        },
    }

    Ok(ExitOutcome::Success)
}
