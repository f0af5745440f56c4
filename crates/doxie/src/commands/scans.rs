//! Scan command handlers.

use std::path::Path;

use bytesize::ByteSize;
use tabled::Tabled;

use doxie_api::{DoxieClient, Envelope, ScanEntry};

use crate::cli::{GlobalOpts, OutputFormat, ScansArgs, ScansCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScanRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

impl From<&ScanEntry> for ScanRow {
    fn from(s: &ScanEntry) -> Self {
        Self {
            name: s.name.clone(),
            size: s.size.map(|b| ByteSize::b(b).to_string()).unwrap_or_default(),
            modified: s.modified.clone().unwrap_or_default(),
        }
    }
}

fn render_entries(format: OutputFormat, entries: &[ScanEntry]) -> String {
    output::render_list(format, entries, |s| ScanRow::from(s), |s| s.name.clone())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &DoxieClient,
    args: ScansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output.unwrap_or_default();
    match args.command {
        ScansCommand::List => {
            let entries = client.scan_entries().await?;
            if entries.is_empty() {
                util::notice(global.quiet, "No scans on the device");
                return Ok(());
            }
            output::print_output(&render_entries(format, &entries), global.quiet);
            Ok(())
        }

        ScansCommand::Recent => {
            let envelope = client.list_recent_scans().await?;
            let out = match envelope {
                // Anything other than a list of entries is shown as-is.
                Envelope::Decoded(ref value) if value.is_array() => {
                    match serde_json::from_value::<Vec<ScanEntry>>(value.clone()) {
                        Ok(entries) => render_entries(format, &entries),
                        Err(_) => util::render_envelope(format, &envelope),
                    }
                }
                Envelope::Ack(_) => {
                    util::notice(global.quiet, "No recent scans");
                    return Ok(());
                }
                _ => util::render_envelope(format, &envelope),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScansCommand::Get { id, dest } => {
            let envelope = client.get_scan(&id, dest.as_deref()).await?;
            finish_fetch(&id, dest.as_deref(), &envelope, global)
        }

        ScansCommand::Thumbnail { id, dest } => {
            let envelope = client.get_thumbnail(&id, dest.as_deref()).await?;
            finish_fetch(&id, dest.as_deref(), &envelope, global)
        }

        ScansCommand::Delete { id } => {
            if !util::confirm(&format!("Delete scan '{id}'?"), global.yes)? {
                return Ok(());
            }
            client.delete_scan(&id).await?;
            util::notice(global.quiet, &format!("Deleted {id}"));
            Ok(())
        }

        ScansCommand::DeleteMany { ids } => {
            if !util::confirm(&format!("Delete {} scans?", ids.len()), global.yes)? {
                return Ok(());
            }
            client.delete_scans(ids.as_slice()).await?;
            util::notice(global.quiet, &format!("Deleted {} scans", ids.len()));
            Ok(())
        }
    }
}

/// Report a saved file, or stream the fetched body to stdout.
fn finish_fetch(
    id: &str,
    dest: Option<&Path>,
    envelope: &Envelope,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output.unwrap_or_default();
    if let Some(dest) = dest {
        util::notice(global.quiet, &format!("Saved {id} to {}", dest.display()));
        return Ok(());
    }
    match envelope {
        Envelope::Raw(bytes) => output::write_binary(bytes)?,
        other => output::print_output(&util::render_envelope(format, other), global.quiet),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(name: &str, size: Option<u64>) -> ScanEntry {
        serde_json::from_value(json!({ "name": name, "size": size })).unwrap()
    }

    #[test]
    fn row_formats_size_and_blanks() {
        let row = ScanRow::from(&entry("/DOXIE/JPEG/IMG_0001.JPG", Some(241_518)));
        assert_eq!(row.name, "/DOXIE/JPEG/IMG_0001.JPG");
        assert!(!row.size.is_empty());
        assert!(row.modified.is_empty());

        let row = ScanRow::from(&entry("/DOXIE/PDF/SCAN.PDF", None));
        assert!(row.size.is_empty());
    }

    #[test]
    fn plain_output_lists_identifiers() {
        let entries = vec![
            entry("/DOXIE/JPEG/IMG_0001.JPG", Some(10)),
            entry("/DOXIE/JPEG/IMG_0002.JPG", Some(20)),
        ];
        assert_eq!(
            render_entries(OutputFormat::Plain, &entries),
            "/DOXIE/JPEG/IMG_0001.JPG\n/DOXIE/JPEG/IMG_0002.JPG"
        );
    }
}
