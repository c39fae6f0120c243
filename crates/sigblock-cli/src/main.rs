//! sigblock - embedded signature blocks for text documents
//!
//! Verifies documents that carry a base64 signature between
//! `-----BEGIN SIGN-----` and `-----END SIGN-----` marker lines, and signs
//! new ones. Every failure exits with status 1.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sigblock_codec::{CodecError, CodecResult, ExitOutcome};
use sigblock_config::{Config, LoadOptions};

mod commands;
mod config_bridge;
mod theme;

use commands::{OutputFormat, inspect, keygen, sign, verify};
use theme::Theme;

/// sigblock - embed and verify document signatures
#[derive(Parser)]
#[command(name = "sigblock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Path to a configuration file
    #[arg(long, global = true, env = "SIGBLOCK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the signature block embedded in a document
    Verify {
        /// Signed document
        document: PathBuf,
        /// PEM public key (SubjectPublicKeyInfo)
        public_key: PathBuf,
    },

    /// Sign a document and embed the signature block
    Sign {
        /// Document to sign
        document: PathBuf,
        /// PEM private key (PKCS#8 Ed25519)
        private_key: PathBuf,
        /// Write the signed document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Base64 line width (0 keeps the signature on one line)
        #[arg(long)]
        wrap: Option<usize>,
    },

    /// Generate an Ed25519 signing key pair
    Keygen {
        /// Directory for the key files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Base name of the key files (`<name>.key`, `<name>.pub`)
        #[arg(long, default_value = "signer")]
        name: String,
        /// Replace an existing key
        #[arg(long)]
        force: bool,
    },

    /// Show the payload, signature and digest of a document without a key
    Inspect {
        /// Document to inspect
        document: PathBuf,
    },
}

/// Map a failed parse to [`CodecError::Usage`], or `None` for `--help` and
/// `--version`.
fn usage_error(e: &clap::Error) -> Option<CodecError> {
    if !e.use_stderr() {
        return None;
    }
    let rendered = e.render().to_string();
    let summary = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_owned();
    Some(CodecError::Usage(summary))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not usage errors.
            let Some(err) = usage_error(&e) else {
                return ExitCode::SUCCESS;
            };
            eprintln!("{}", Theme::dimmed(&format!("  ({})", err.kind())));
            let result: CodecResult<()> = Err(err);
            return ExitCode::from(ExitOutcome::from(&result).code());
        },
    };

    let mut options = LoadOptions::default();
    if let Some(path) = &cli.config {
        options = options.with_explicit(path);
    }
    let config = match Config::load(&options) {
        Ok(resolved) => resolved.config,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("Invalid configuration: {e}")));
            return ExitCode::from(ExitOutcome::Failure.code());
        },
    };

    let mut log_config = config_bridge::to_log_config(&config.logging);
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = sigblock_telemetry::setup_logging(&log_config) {
        eprintln!("{}", Theme::warning(&format!("Failed to initialize logging: {e}")));
    }

    if cli.format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    let settings = config_bridge::to_settings(&config);

    let result = match &cli.command {
        Commands::Verify {
            document,
            public_key,
        } => verify::run(document, public_key, &settings, cli.format),
        Commands::Sign {
            document,
            private_key,
            output,
            wrap,
        } => sign::run(
            document,
            private_key,
            output.as_ref(),
            *wrap,
            &settings,
            cli.format,
        ),
        Commands::Keygen { dir, name, force } => keygen::run(dir, name, *force, cli.format),
        Commands::Inspect { document } => inspect::run(document, &settings, cli.format),
    };

    match result {
        Ok(outcome) => ExitCode::from(outcome.code()),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::from(ExitOutcome::Failure.code())
        },
    }
}
