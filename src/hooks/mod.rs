//! The hook dispatch table: one handler per hook kind.
//!
//! The host passes a hook-kind tag on the command line and the event
//! as JSON on stdin; the registry maps the tag to a handler. Every
//! dispatch first appends the raw event to the session log, then runs
//! the kind-specific work. A failed log append or announcement is
//! reported and swallowed; only the gate's answer ever reaches stdout
//! alongside session context.

pub mod notification;
pub mod post_tool_use;
pub mod pre_tool_use;
pub mod session_start;
pub mod stop;

use std::collections::HashMap;

use crate::config::Config;
use crate::event::{HookEvent, HookKind};
use crate::gate::Gate;
use crate::notify::Dispatcher;
use crate::session_log::SessionStore;
use serde_json::Value;

/// Flags passed by the host's hook binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookFlags {
    pub notify: bool,
    pub load_context: bool,
}

/// Everything a handler may need, built once per invocation.
pub struct HookContext<'a> {
    pub store: &'a SessionStore,
    pub gate: &'a Gate,
    pub dispatcher: &'a Dispatcher,
    pub config: &'a Config,
    pub flags: HookFlags,
}

/// What a handler hands back: at most one JSON object for stdout, the
/// host's decision/context channel.
#[derive(Debug, Default)]
pub struct HookOutcome {
    pub stdout: Option<Value>,
}

impl HookOutcome {
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn with_stdout(value: Value) -> Self {
        Self { stdout: Some(value) }
    }
}

/// One handler per hook kind.
pub trait HookSpec: Send + Sync {
    fn run(&self, ctx: &HookContext, event: &HookEvent) -> HookOutcome;
}

pub struct HookRegistry {
    specs: HashMap<HookKind, Box<dyn HookSpec>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        let mut specs: HashMap<HookKind, Box<dyn HookSpec>> = HashMap::new();
        specs.insert(
            HookKind::SessionStart,
            Box::new(session_start::SessionStartSpec),
        );
        specs.insert(HookKind::PreToolUse, Box::new(pre_tool_use::PreToolUseSpec));
        specs.insert(
            HookKind::PostToolUse,
            Box::new(post_tool_use::PostToolUseSpec),
        );
        specs.insert(
            HookKind::Notification,
            Box::new(notification::NotificationSpec),
        );
        specs.insert(HookKind::Stop, Box::new(stop::StopSpec));
        Self { specs }
    }

    /// Append the raw event to the session log, then run the kind's
    /// handler. Recording must never block the host, so append failure
    /// is logged and dispatch continues.
    pub fn dispatch(&self, kind: HookKind, ctx: &HookContext, event: &HookEvent) -> HookOutcome {
        if let Err(e) = ctx.store.append(&event.session_id, kind, &event.raw) {
            log::warn!("session log append failed for {kind}: {e}");
        }
        match self.specs.get(&kind) {
            Some(spec) => spec.run(ctx, event),
            None => HookOutcome::silent(),
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::identity::Identity;
    use tempfile::TempDir;

    /// Default-config wiring over a temp sessions dir. The dispatcher
    /// runs in debug mode so tests never spawn a voice process.
    pub struct Fixture {
        pub config: Config,
        pub store: SessionStore,
        pub gate: Gate,
        pub dispatcher: Dispatcher,
        _dir: TempDir,
    }

    impl Fixture {
        pub fn new() -> Self {
            let config = Config::default_config();
            let dir = TempDir::new().unwrap();
            let store = SessionStore::new(dir.path());
            let gate = Gate::from_config(&config.gate);
            let identity = Identity {
                engineer_name: Some("Dana".to_string()),
                debug_notifications: true,
            };
            let dispatcher = Dispatcher::from_config(&config, &identity);
            Self {
                config,
                store,
                gate,
                dispatcher,
                _dir: dir,
            }
        }

        pub fn ctx(&self, flags: HookFlags) -> HookContext<'_> {
            HookContext {
                store: &self.store,
                gate: &self.gate,
                dispatcher: &self.dispatcher,
                config: &self.config,
                flags,
            }
        }
    }
}
