//! Durable per-session, per-hook-type event logs.
//!
//! Each (session id, hook kind) pair owns one JSON array file under the
//! sessions directory. Appending is a read-modify-write of the whole
//! array held under an exclusive advisory lock, so concurrent hook
//! processes for the same session serialize instead of clobbering each
//! other. A log that fails to parse is reset to empty and the append
//! proceeds; losing history is acceptable, blocking the host is not.

use crate::event::HookKind;
use fs2::FileExt;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: dir.into() }
    }

    /// Directory holding one session's logs. The id is sanitized for
    /// path use, so a malformed or hostile session id cannot escape the
    /// base directory.
    pub fn session_dir(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(sanitize_id(session_id))
    }

    pub fn log_path(&self, session_id: &str, kind: HookKind) -> PathBuf {
        self.session_dir(session_id)
            .join(format!("{}.json", kind.file_stem()))
    }

    /// Append one event record, preserving arrival order.
    pub fn append(&self, session_id: &str, kind: HookKind, record: &Value) -> io::Result<()> {
        let dir = self.session_dir(session_id);
        fs::create_dir_all(&dir)?;

        let mut file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.log_path(session_id, kind))?;
        file.lock_exclusive()?;
        let result = append_locked(&mut file, record);
        let _ = file.unlock();
        result
    }

    /// Stored record sequence; empty when the log is missing or unreadable.
    pub fn load(&self, session_id: &str, kind: HookKind) -> Vec<Value> {
        fs::read_to_string(self.log_path(session_id, kind))
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }
}

/// The read-modify-write cycle, called with the lock held.
fn append_locked(file: &mut fs::File, record: &Value) -> io::Result<()> {
    let mut text = String::new();
    file.read_to_string(&mut text)?;

    let mut records: Vec<Value> = if text.trim().is_empty() {
        Vec::new()
    } else {
        match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("session log unreadable, resetting: {e}");
                Vec::new()
            }
        }
    };
    records.push(record.clone());

    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    let rendered = serde_json::to_string_pretty(&records).map_err(io::Error::other)?;
    file.write_all(rendered.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()
}

/// Replace anything outside `[A-Za-z0-9._-]` with `_`. Ids that reduce
/// to nothing usable fall back to "unknown".
fn sanitize_id(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "unknown".to_string(),
        _ => cleaned,
    }
}
