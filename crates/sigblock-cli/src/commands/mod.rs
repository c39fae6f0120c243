//! Subcommand implementations.

pub(crate) mod inspect;
pub(crate) mod keygen;
pub(crate) mod sign;
pub(crate) mod verify;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text.
    Pretty,
    /// A single JSON document.
    Json,
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
