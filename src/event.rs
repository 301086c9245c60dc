//! Hook kinds and the typed view over the host's JSON event.

use serde_json::Value;
use std::fmt;

/// The lifecycle points the host dispatches to this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    SessionStart,
    PreToolUse,
    PostToolUse,
    Notification,
    Stop,
}

impl HookKind {
    pub const ALL: [HookKind; 5] = [
        HookKind::SessionStart,
        HookKind::PreToolUse,
        HookKind::PostToolUse,
        HookKind::Notification,
        HookKind::Stop,
    ];

    /// CLI tag (kebab-case), as passed by the host's hook binding.
    pub fn tag(self) -> &'static str {
        match self {
            HookKind::SessionStart => "session-start",
            HookKind::PreToolUse => "pre-tool-use",
            HookKind::PostToolUse => "post-tool-use",
            HookKind::Notification => "notification",
            HookKind::Stop => "stop",
        }
    }

    /// Event name as the host spells it in settings and output JSON.
    pub fn event_name(self) -> &'static str {
        match self {
            HookKind::SessionStart => "SessionStart",
            HookKind::PreToolUse => "PreToolUse",
            HookKind::PostToolUse => "PostToolUse",
            HookKind::Notification => "Notification",
            HookKind::Stop => "Stop",
        }
    }

    /// Session log file stem; one `<stem>.json` per session and kind.
    pub fn file_stem(self) -> &'static str {
        match self {
            HookKind::SessionStart => "session_start",
            HookKind::PreToolUse => "pre_tool_use",
            HookKind::PostToolUse => "post_tool_use",
            HookKind::Notification => "notification",
            HookKind::Stop => "stop",
        }
    }

    /// Parse a CLI tag or a host event name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| s == k.tag() || s == k.event_name())
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One host event: the raw JSON (logged verbatim) plus the fields the
/// handlers care about, extracted leniently.
#[derive(Debug, Clone)]
pub struct HookEvent {
    pub raw: Value,
    pub session_id: String,
    pub tool_name: Option<String>,
    /// `tool_input.command` for Bash tool calls.
    pub command: Option<String>,
    pub message: Option<String>,
    pub title: Option<String>,
    /// Session source: "startup", "resume", or "clear".
    pub source: Option<String>,
    pub tool_response: Option<Value>,
}

impl HookEvent {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        let raw: Value = serde_json::from_str(input)?;
        Ok(Self::from_value(raw))
    }

    pub fn from_value(raw: Value) -> Self {
        let top = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
        // Notification payloads have appeared both flat and nested.
        let flat_or_payload = |key: &str| {
            top(key).or_else(|| {
                raw.get("payload")
                    .and_then(|p| p.get(key))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
        };

        let session_id = top("session_id").unwrap_or_else(|| "unknown".into());
        let command = raw
            .get("tool_input")
            .and_then(|t| t.get("command"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            session_id,
            tool_name: top("tool_name"),
            command,
            message: flat_or_payload("message"),
            title: flat_or_payload("title"),
            source: top("source"),
            tool_response: raw.get("tool_response").cloned(),
            raw,
        }
    }
}
