//! cc-hookkit binary: lifecycle hooks for Claude Code.
//!
//! Dispatched on the first argument:
//!
//! ```text
//! cc-hookkit <hook-kind> [--notify] [--load-context]
//! cc-hookkit install [--from <settings.json>] [--settings <path>]
//! ```
//!
//! Hook invocations read one JSON event from stdin, append it to the
//! per-session log, run the kind's handler, and print at most one JSON
//! object for the host (a permission decision or additional context).
//! The process exits 0 whenever its decision and logging duties ran,
//! even if an announcement or log write failed. Nonzero exits are
//! reserved for usage errors, an unwritable install target, and a
//! gating hook that cannot read its event.

use std::io::Read;

use cc_hookkit::config::Config;
use cc_hookkit::event::{HookEvent, HookKind};
use cc_hookkit::gate::Gate;
use cc_hookkit::hooks::{HookContext, HookFlags, HookRegistry};
use cc_hookkit::identity::Identity;
use cc_hookkit::notify::Dispatcher;
use cc_hookkit::session_log::SessionStore;
use cc_hookkit::{install, logging};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        usage();
        return 1;
    };

    let mut flags = HookFlags::default();
    let mut from: Option<String> = None;
    let mut settings_target: Option<String> = None;

    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--notify" => flags.notify = true,
            "--load-context" => flags.load_context = true,
            "--from" => match iter.next() {
                Some(path) => from = Some(path.clone()),
                None => {
                    eprintln!("cc-hookkit: --from requires a path");
                    return 1;
                }
            },
            "--settings" => match iter.next() {
                Some(path) => settings_target = Some(path.clone()),
                None => {
                    eprintln!("cc-hookkit: --settings requires a path");
                    return 1;
                }
            },
            _ => {
                usage();
                return 1;
            }
        }
    }

    // Identity first: it loads .env, which providers read through the
    // process environment.
    let identity = Identity::load();
    let config = Config::load();
    logging::init(&config.settings.log_level);

    if command == "install" {
        return match install::run(&config, from.as_deref(), settings_target.as_deref()) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("cc-hookkit: install failed: {e}");
                1
            }
        };
    }

    let Some(kind) = HookKind::parse(command) else {
        usage();
        return 1;
    };

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        // A gate that cannot see the command cannot answer for it.
        if kind == HookKind::PreToolUse {
            eprintln!("cc-hookkit: cannot read event: {e}");
            return 1;
        }
        log::warn!("{kind}: cannot read event: {e}");
        return 0;
    }

    let event = match HookEvent::from_json(&input) {
        Ok(event) => event,
        Err(e) => {
            if kind == HookKind::PreToolUse {
                eprintln!("cc-hookkit: cannot parse event: {e}");
                return 1;
            }
            log::warn!("{kind}: unparseable event ignored: {e}");
            return 0;
        }
    };

    let sessions_dir = shellexpand::tilde(&config.settings.sessions_dir).into_owned();
    let store = SessionStore::new(sessions_dir);
    let gate = Gate::from_config(&config.gate);
    let dispatcher = Dispatcher::from_config(&config, &identity);
    let registry = HookRegistry::new();

    let ctx = HookContext {
        store: &store,
        gate: &gate,
        dispatcher: &dispatcher,
        config: &config,
        flags,
    };

    let outcome = registry.dispatch(kind, &ctx, &event);
    if let Some(value) = outcome.stdout {
        println!("{value}");
    }
    0
}

fn usage() {
    eprintln!("usage: cc-hookkit <hook> [--notify] [--load-context]");
    eprintln!("       cc-hookkit install [--from <settings.json>] [--settings <path>]");
    eprintln!();
    eprintln!("hooks: session-start, pre-tool-use, post-tool-use, notification, stop");
}
