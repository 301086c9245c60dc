//! Settings install: merge the distributed host settings into the
//! user's settings document, backing up the previous file first.
//!
//! The merge itself is pure (`settings::merge`); this module is the
//! caller-side step that reads the target, snapshots it, and persists
//! the result. An unreadable existing document is backed up and then
//! replaced by the merge result over nothing, so a broken settings
//! file heals instead of wedging the install.

use crate::config::Config;
use crate::logging;
use crate::settings::{self, SettingsDoc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Settings document distributed with this crate, embedded at build time.
const DEFAULT_SETTINGS: &str = include_str!("../settings.default.json");

#[derive(Debug)]
pub struct InstallReport {
    pub target: PathBuf,
    pub backup: Option<PathBuf>,
}

/// Run the install subcommand. `from` substitutes the embedded incoming
/// document; `target` overrides the configured settings path. Returns
/// an error only when the target cannot be written (or `from` cannot be
/// read), which the caller maps to a nonzero exit.
pub fn run(config: &Config, from: Option<&str>, target: Option<&str>) -> io::Result<()> {
    let incoming = match from {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_SETTINGS.to_string(),
    };
    let raw_target = target.unwrap_or(&config.settings.settings_path);
    let target = PathBuf::from(shellexpand::tilde(raw_target).into_owned());

    let report = install_into(&target, &incoming)?;
    println!("settings written to {}", report.target.display());
    if let Some(backup) = &report.backup {
        println!("previous settings backed up to {}", backup.display());
    }
    Ok(())
}

/// Backup-then-write merge of `incoming` into the document at `target`.
fn install_into(target: &Path, incoming: &str) -> io::Result<InstallReport> {
    let existing = match fs::read_to_string(target) {
        Ok(text) => match serde_json::from_str::<SettingsDoc>(&text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("existing settings unreadable, adopting distributed settings: {e}");
                None
            }
        },
        Err(_) => None,
    };

    // Snapshot whatever is there, parseable or not, before overwriting.
    let backup = if target.exists() {
        let path = backup_path(target);
        fs::copy(target, &path)?;
        Some(path)
    } else {
        None
    };

    let rendered = match serde_json::from_str::<SettingsDoc>(incoming) {
        Ok(doc) => {
            let merged = settings::merge(existing, doc);
            let mut text = serde_json::to_string_pretty(&merged).map_err(io::Error::other)?;
            text.push('\n');
            text
        }
        Err(e) => {
            // Adopt the incoming text verbatim rather than failing the install.
            log::warn!("incoming settings did not parse, writing verbatim: {e}");
            incoming.to_string()
        }
    };

    if let Some(dir) = target.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(target, rendered)?;

    Ok(InstallReport {
        target: target.to_path_buf(),
        backup,
    })
}

/// `settings.json` becomes `settings.json.bak.<compact UTC timestamp>`,
/// with a numeric suffix when two installs land in the same second.
/// Backups are never deleted by this crate.
fn backup_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "settings.json".to_string());
    let stamp = logging::timestamp_compact();
    let mut candidate = target.with_file_name(format!("{name}.bak.{stamp}"));
    let mut n = 1;
    while candidate.exists() {
        candidate = target.with_file_name(format!("{name}.bak.{stamp}.{n}"));
        n += 1;
    }
    candidate
}
