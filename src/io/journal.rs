use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Self-documenting header written at the top of a new journal.
const FILE_HEADER: &str = "\
# taskify write journal — append-only
# Each line records a storage write that failed, with the value that was
# lost, so nothing disappears silently. Safe to delete.
# Format: <timestamp>\\t<op>\\t<key>\\t<error>\\t<payload>
";

/// A single entry in the write journal.
#[derive(Debug)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    /// The storage operation that failed ("set" or "remove").
    pub op: String,
    pub key: String,
    pub error: String,
    /// The value that could not be written. Empty for removes.
    pub payload: String,
}

impl JournalEntry {
    pub fn failed_write(op: &str, key: &str, error: &io::Error, payload: Option<&str>) -> Self {
        JournalEntry {
            timestamp: Utc::now(),
            op: op.to_string(),
            key: key.to_string(),
            error: error.to_string(),
            payload: payload.unwrap_or_default().to_string(),
        }
    }

    /// One tab-separated line. Payloads are JSON or flag literals, so they
    /// never contain a raw tab or newline.
    fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.op,
            self.key,
            self.error,
            self.payload,
        )
    }
}

/// Return the path to the journal file.
pub fn journal_path(dir: &Path) -> PathBuf {
    dir.join("journal.log")
}

/// Append an entry to the journal. Errors are swallowed and printed to
/// stderr; a broken journal must not take the write path down with it.
pub fn log_failed_write(dir: &Path, entry: JournalEntry) {
    if let Err(e) = log_failed_write_inner(dir, entry) {
        eprintln!("warning: could not write to journal: {}", e);
    }
}

fn log_failed_write_inner(dir: &Path, entry: JournalEntry) -> io::Result<()> {
    let path = journal_path(dir);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_line().as_bytes())?;
    Ok(())
}
