//! PreToolUse: answer the host's permission question for Bash commands.

use crate::event::{HookEvent, HookKind};
use crate::gate::Verdict;
use crate::hooks::{HookContext, HookOutcome, HookSpec};
use serde_json::json;

pub struct PreToolUseSpec;

impl HookSpec for PreToolUseSpec {
    fn run(&self, ctx: &HookContext, event: &HookEvent) -> HookOutcome {
        // Only Bash commands are gated; other tools get no answer and
        // the host applies its own permission flow.
        if event.tool_name.as_deref() != Some("Bash") {
            return HookOutcome::silent();
        }
        let Some(command) = event.command.as_deref().filter(|c| !c.trim().is_empty()) else {
            return HookOutcome::silent();
        };

        let matched = ctx.gate.evaluate(command);
        if matched.verdict == Verdict::Block {
            log::info!("blocked command: {command} ({})", matched.reason);
        }

        HookOutcome::with_stdout(json!({
            "hookSpecificOutput": {
                "hookEventName": HookKind::PreToolUse.event_name(),
                "permissionDecision": matched.verdict.permission_decision(),
                "permissionDecisionReason": matched.reason,
            }
        }))
    }
}
