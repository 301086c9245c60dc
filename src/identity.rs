//! Identity and credential values captured once at process start.

/// Snapshot of the personalization and diagnostic values. Components
/// receive this struct (or values derived from it at construction)
/// instead of consulting the environment themselves.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    /// Display name substituted for `{engineer}` in spoken phrases.
    pub engineer_name: Option<String>,
    /// When set, the dispatcher reports provider availability instead
    /// of performing a real invocation.
    pub debug_notifications: bool,
}

impl Identity {
    /// Load `.env` from the working directory (best-effort, missing
    /// file is fine), then snapshot the identity values.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            engineer_name: non_empty(std::env::var("ENGINEER_NAME").ok()),
            debug_notifications: std::env::var_os("DEBUG_NOTIFICATIONS").is_some(),
        }
    }

    /// Name spoken in personalized phrases; generic when unset.
    pub fn display_name(&self) -> &str {
        self.engineer_name.as_deref().unwrap_or("engineer")
    }
}

/// Resolve a provider credential by env key. Called once per provider
/// at dispatcher construction, after the `.env` load.
pub fn credential(key_env: &str) -> Option<String> {
    non_empty(std::env::var(key_env).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
