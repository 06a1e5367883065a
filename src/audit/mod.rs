//! Local history of `seal`, `open` and `activate` runs.
//!
//! One SQLite table in `<payload_dir>/audit.db`, owner-only on unix.
//! A row names the payload or secret id and an outcome. Passwords,
//! verifier hashes and secret bytes never reach this file.
//!
//! An unusable database never blocks a command; the run simply goes
//! unrecorded.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use crate::cli::Cli;
use crate::errors::{HeirVaultError, Result};

const DB_FILE: &str = "audit.db";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS events (
    seq        INTEGER PRIMARY KEY,
    at         TEXT NOT NULL,
    operation  TEXT NOT NULL,
    subject    TEXT,
    details    TEXT
)";

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub subject: Option<String>,
    pub details: Option<String>,
}

pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    pub fn db_path(payload_dir: &Path) -> PathBuf {
        payload_dir.join(DB_FILE)
    }

    /// `None` if the database cannot be opened or its table created.
    pub fn open(payload_dir: &Path) -> Option<Self> {
        let path = Self::db_path(payload_dir);
        let conn = Connection::open(&path).ok()?;
        restrict_permissions(&path);
        conn.execute(SCHEMA, []).ok()?;
        Some(Self { conn })
    }

    /// Append a row. Write failures are logged at debug level and dropped.
    pub fn log(&self, operation: &str, subject: Option<&str>, details: Option<&str>) {
        let written = self.conn.execute(
            "INSERT INTO events (at, operation, subject, details) VALUES (?1, ?2, ?3, ?4)",
            params![stamp(Utc::now()), operation, subject, details],
        );
        if let Err(e) = written {
            debug!(error = %e, operation, "audit entry not written");
        }
    }

    /// Newest first, at most `limit` rows, restricted to rows at or after
    /// `since` when given.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let since = since.map(stamp);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT at, operation, subject, details FROM events
                 WHERE ?1 IS NULL OR at >= ?1
                 ORDER BY seq DESC
                 LIMIT ?2",
            )
            .map_err(audit_error)?;

        let rows = stmt
            .query_map(
                params![since, limit],
                |row| -> rusqlite::Result<(String, String, Option<String>, Option<String>)> {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                },
            )
            .map_err(audit_error)?;

        let entries = rows
            .map(|row| {
                let (at, operation, subject, details) = row.map_err(audit_error)?;
                Ok(AuditEntry {
                    timestamp: parse_stamp(&at)?,
                    operation,
                    subject,
                    details,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(entries)
    }
}

/// Record a run for the CLI's payload directory, if that directory exists.
pub fn record(cli: &Cli, operation: &str, subject: Option<&str>, details: Option<&str>) {
    let Ok(dir) = crate::cli::payload_dir(cli) else {
        return;
    };
    if !dir.is_dir() {
        return;
    }
    if let Some(log) = AuditLog::open(&dir) {
        log.log(operation, subject, details);
    }
}

// Fixed-width UTC so text order is time order.
fn stamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_stamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HeirVaultError::AuditError(format!("bad timestamp '{text}': {e}")))
}

fn audit_error(e: rusqlite::Error) -> HeirVaultError {
    HeirVaultError::AuditError(e.to_string())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
