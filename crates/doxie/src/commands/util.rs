//! Shared helpers for command handlers.

use std::io::IsTerminal;

use doxie_api::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, `--yes` is required.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Render an envelope whose shape isn't known ahead of time.
///
/// JSON goes through the selected format, raw bodies are shown as text, and
/// a bare acknowledgement renders as nothing.
pub fn render_envelope(format: OutputFormat, envelope: &Envelope) -> String {
    match envelope {
        Envelope::Decoded(value) => output::render_single(
            format,
            value,
            |v| serde_json::to_string_pretty(v).unwrap_or_default(),
            ToString::to_string,
        ),
        Envelope::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Envelope::Ack(_) => String::new(),
    }
}

/// Print a status line to stderr unless `--quiet`.
pub fn notice(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ack_renders_empty() {
        assert_eq!(render_envelope(OutputFormat::Table, &Envelope::Ack(true)), "");
    }

    #[test]
    fn json_follows_format() {
        let env = Envelope::Decoded(json!({ "path": "/DOXIE/JPEG/IMG_0003.JPG" }));
        assert_eq!(
            render_envelope(OutputFormat::JsonCompact, &env),
            r#"{"path":"/DOXIE/JPEG/IMG_0003.JPG"}"#
        );
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("Delete everything?", true).unwrap());
    }
}
