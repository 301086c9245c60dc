//! cc-hookkit: lifecycle hooks for Claude Code.
//!
//! One binary serves every hook the host dispatches. Each invocation
//! reads a JSON event from stdin, appends it to a per-session log, and
//! runs the handler registered for the hook kind: gating Bash commands
//! on PreToolUse with a [`gate::Verdict`], classifying and speaking
//! notifications, and emitting session context on SessionStart. An
//! `install` subcommand merges the distributed settings into the user's
//! host settings document behind a timestamped backup.
//!
//! # Architecture
//!
//! - **[`event`]** — Hook kinds and the typed view over the host's JSON event.
//! - **[`hooks`]** — Dispatch table: one handler per hook kind behind a shared trait.
//! - **[`gate`]** — Command safety gate: pure allow/block over normalized command text.
//! - **[`notify`]** — Ranked voice providers with an offline terminal fallback.
//! - **[`session_log`]** — Per-session, per-hook-type event logs under an advisory lock.
//! - **[`settings`]** — The host settings document and the pure merge over it.
//! - **[`install`]** — Backup-then-write persistence around the settings merge.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`identity`]** — `.env`-sourced identity and credentials, captured at startup.
//! - **[`logging`]** — Diagnostics to `~/.local/share/cc-hookkit/hookkit.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Hook kinds and the typed event view.
pub mod event;
/// Pre-execution command safety gate.
pub mod gate;
/// Hook dispatch table and per-kind handlers.
pub mod hooks;
/// Engineer identity and credential snapshot from `.env`.
pub mod identity;
/// Settings install: backup-then-write merge into the host document.
pub mod install;
/// File-based diagnostics and UTC timestamps.
pub mod logging;
/// Notification dispatch and voice providers.
pub mod notify;
/// Durable per-session event logs.
pub mod session_log;
/// Host settings document and merge.
pub mod settings;

use gate::GateMatch;

/// Build the gate from default config and evaluate a command string.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with user config, build the gate from `Config::load()`.
pub fn evaluate(command: &str) -> GateMatch {
    let config = config::Config::default_config();
    let gate = gate::Gate::from_config(&config.gate);
    gate.evaluate(command)
}
