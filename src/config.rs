use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub phrases: Phrases,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub tts: TtsConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// off | error | warn | info | debug
    #[serde(default)]
    pub log_level: String,
    /// Base directory for per-session event logs.
    #[serde(default)]
    pub sessions_dir: String,
    /// Host settings document targeted by `install`.
    #[serde(default)]
    pub settings_path: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct GateConfig {
    #[serde(default)]
    pub delete_commands: Vec<String>,
    #[serde(default)]
    pub protected_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NotifyConfig {
    #[serde(default)]
    pub input_indicators: Vec<String>,
    #[serde(default)]
    pub problem_indicators: Vec<String>,
    #[serde(default)]
    pub completion_indicators: Vec<String>,
}

/// Spoken announcement templates. `{engineer}` expands to the display name.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Phrases {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub completion: String,
    #[serde(default)]
    pub fallback: String,
    #[serde(default)]
    pub session_startup: String,
    #[serde(default)]
    pub session_resume: String,
    #[serde(default)]
    pub session_clear: String,
    #[serde(default)]
    pub stop: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ContextConfig {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub max_chars: usize,
    #[serde(default)]
    pub git_status: bool,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct TtsConfig {
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

/// One voice backend. Rank is list position, fixed at load time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub name: String,
    /// Env var holding the credential; absent means no credential needed.
    #[serde(default)]
    pub key_env: Option<String>,
    /// Command argv; the spoken text is appended as the final argument.
    #[serde(default)]
    pub command: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    gate: GateOverlay,
    #[serde(default)]
    notify: NotifyOverlay,
    #[serde(default)]
    phrases: PhrasesOverlay,
    #[serde(default)]
    context: ContextOverlay,
    #[serde(default)]
    tts: TtsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    log_level: Option<String>,
    sessions_dir: Option<String>,
    settings_path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GateOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    delete_commands: Vec<String>,
    #[serde(default)]
    protected_paths: Vec<String>,
    #[serde(default)]
    remove_delete_commands: Vec<String>,
    #[serde(default)]
    remove_protected_paths: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct NotifyOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    input_indicators: Vec<String>,
    #[serde(default)]
    problem_indicators: Vec<String>,
    #[serde(default)]
    completion_indicators: Vec<String>,
    #[serde(default)]
    remove_input_indicators: Vec<String>,
    #[serde(default)]
    remove_problem_indicators: Vec<String>,
    #[serde(default)]
    remove_completion_indicators: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PhrasesOverlay {
    input: Option<String>,
    problem: Option<String>,
    completion: Option<String>,
    fallback: Option<String>,
    session_startup: Option<String>,
    session_resume: Option<String>,
    session_clear: Option<String>,
    stop: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ContextOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    files: Vec<String>,
    #[serde(default)]
    remove_files: Vec<String>,
    max_chars: Option<usize>,
    git_status: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct TtsOverlay {
    /// Provider tables do not item-merge; a non-empty list replaces
    /// the default ranking wholesale.
    #[serde(default)]
    providers: Vec<ProviderConfig>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/cc-hookkit/config.toml (if exists)
    ///
    /// User config merges with defaults: lists extend, scalars override.
    /// Set `replace = true` in any section to replace its defaults entirely.
    /// Use `remove_<field>` lists to subtract specific items from defaults.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/cc-hookkit/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/cc-hookkit/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("cc-hookkit: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        let s = overlay.settings;
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = s.sessions_dir {
            self.settings.sessions_dir = v;
        }
        if let Some(v) = s.settings_path {
            self.settings.settings_path = v;
        }

        // Gate
        let g = overlay.gate;
        merge_list(
            &mut self.gate.delete_commands,
            g.delete_commands,
            &g.remove_delete_commands,
            g.replace,
        );
        merge_list(
            &mut self.gate.protected_paths,
            g.protected_paths,
            &g.remove_protected_paths,
            g.replace,
        );

        // Notify indicators
        let n = overlay.notify;
        merge_list(
            &mut self.notify.input_indicators,
            n.input_indicators,
            &n.remove_input_indicators,
            n.replace,
        );
        merge_list(
            &mut self.notify.problem_indicators,
            n.problem_indicators,
            &n.remove_problem_indicators,
            n.replace,
        );
        merge_list(
            &mut self.notify.completion_indicators,
            n.completion_indicators,
            &n.remove_completion_indicators,
            n.replace,
        );

        // Phrases: scalar overrides
        let p = overlay.phrases;
        if let Some(v) = p.input {
            self.phrases.input = v;
        }
        if let Some(v) = p.problem {
            self.phrases.problem = v;
        }
        if let Some(v) = p.completion {
            self.phrases.completion = v;
        }
        if let Some(v) = p.fallback {
            self.phrases.fallback = v;
        }
        if let Some(v) = p.session_startup {
            self.phrases.session_startup = v;
        }
        if let Some(v) = p.session_resume {
            self.phrases.session_resume = v;
        }
        if let Some(v) = p.session_clear {
            self.phrases.session_clear = v;
        }
        if let Some(v) = p.stop {
            self.phrases.stop = v;
        }

        // Context
        let c = overlay.context;
        merge_list(&mut self.context.files, c.files, &c.remove_files, c.replace);
        if let Some(v) = c.max_chars {
            self.context.max_chars = v;
        }
        if let Some(v) = c.git_status {
            self.context.git_status = v;
        }

        // Providers: replace wholesale when the overlay lists any
        if !overlay.tts.providers.is_empty() {
            self.tts.providers = overlay.tts.providers;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
