//! SessionStart: optionally announce the new session and emit
//! development context for the host to inject into it.

use crate::config::ContextConfig;
use crate::event::{HookEvent, HookKind};
use crate::hooks::{HookContext, HookOutcome, HookSpec};
use crate::logging;
use serde_json::json;
use std::process::Command;

pub struct SessionStartSpec;

impl HookSpec for SessionStartSpec {
    fn run(&self, ctx: &HookContext, event: &HookEvent) -> HookOutcome {
        if ctx.flags.load_context {
            let context = development_context(&ctx.config.context, event.source.as_deref());
            return HookOutcome::with_stdout(json!({
                "hookSpecificOutput": {
                    "hookEventName": HookKind::SessionStart.event_name(),
                    "additionalContext": context,
                }
            }));
        }

        if ctx.flags.notify {
            let phrases = &ctx.config.phrases;
            let phrase = match event.source.as_deref() {
                Some("resume") => &phrases.session_resume,
                Some("clear") => &phrases.session_clear,
                _ => &phrases.session_startup,
            };
            ctx.dispatcher.speak(phrase);
        }

        HookOutcome::silent()
    }
}

/// Assemble the context block: timestamp, session source, git state,
/// and the head of each configured context file.
fn development_context(cfg: &ContextConfig, source: Option<&str>) -> String {
    let mut parts = vec![
        format!("Session started at: {}", logging::timestamp_now()),
        format!("Session source: {}", source.unwrap_or("unknown")),
    ];

    if cfg.git_status
        && let Some((branch, changes)) = git_status()
    {
        parts.push(format!("Git branch: {branch}"));
        if changes > 0 {
            parts.push(format!("Uncommitted changes: {changes} files"));
        }
    }

    for path in &cfg.files {
        let Ok(content) = std::fs::read_to_string(path) else {
            continue;
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        parts.push(format!("\n--- Content from {path} ---"));
        parts.push(content.chars().take(cfg.max_chars).collect());
    }

    parts.join("\n")
}

/// Current branch and uncommitted-change count. None outside a git
/// worktree or when git is unavailable; the context block simply omits
/// the section.
fn git_status() -> Option<(String, usize)> {
    let branch = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .ok()?;
    if !branch.status.success() {
        return None;
    }
    let branch = String::from_utf8_lossy(&branch.stdout).trim().to_string();

    let changes = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| {
            String::from_utf8_lossy(&out.stdout)
                .lines()
                .filter(|line| !line.trim().is_empty())
                .count()
        })
        .unwrap_or(0);

    Some((branch, changes))
}
