//! Structured JSONL logging for suite runs.
//!
//! One JSON object per line: timestamp, level, event, and optional check
//! context. Report artifacts written to disk get a companion entry carrying
//! their SHA-256 digest so a log can be tied to the exact report it
//! describes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::report::CheckOutcome;

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Canonical structured log entry. Required fields: `timestamp`, `level`,
/// `event`; the rest are context.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CheckOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Path of a written artifact this entry describes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_sha256: Option<String>,
}

impl LogEntry {
    #[must_use]
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
                .to_string(),
            level,
            event: event.into(),
            check: None,
            outcome: None,
            detail: None,
            artifact: None,
            artifact_sha256: None,
        }
    }

    /// Entry describing one check verdict.
    #[must_use]
    pub fn check_verdict(check: &str, outcome: CheckOutcome, detail: Option<String>) -> Self {
        let level = match outcome {
            CheckOutcome::Pass | CheckOutcome::Skip => LogLevel::Info,
            CheckOutcome::Fail => LogLevel::Warn,
            CheckOutcome::Error => LogLevel::Error,
        };
        let mut entry = Self::new(level, "check_verdict");
        entry.check = Some(check.to_string());
        entry.outcome = Some(outcome);
        entry.detail = detail;
        entry
    }

    /// Entry linking a written artifact to its digest.
    #[must_use]
    pub fn artifact_written(path: &Path, body: &[u8]) -> Self {
        let mut entry = Self::new(LogLevel::Info, "artifact_written");
        entry.artifact = Some(path.display().to_string());
        entry.artifact_sha256 = Some(sha256_hex(body));
        entry
    }
}

/// Writes JSONL entries to a file or stderr.
pub struct LogEmitter {
    sink: Option<File>,
}

impl LogEmitter {
    /// Emit to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self { sink: None }
    }

    /// Append to a JSONL file, creating it if needed.
    pub fn to_file(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { sink: Some(file) })
    }

    /// Write one entry as a single JSON line.
    pub fn emit(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
        match &mut self.sink {
            Some(file) => writeln!(file, "{line}"),
            None => writeln!(std::io::stderr(), "{line}"),
        }
    }
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
