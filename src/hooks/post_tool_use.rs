//! PostToolUse: record the tool result and announce finished todo work.

use crate::event::HookEvent;
use crate::hooks::{HookContext, HookOutcome, HookSpec};
use serde_json::Value;

pub struct PostToolUseSpec;

/// A TodoWrite result counts as a completion when any todo in the
/// updated list reached status "completed".
fn completed_todos(event: &HookEvent) -> bool {
    if event.tool_name.as_deref() != Some("TodoWrite") {
        return false;
    }
    event
        .tool_response
        .as_ref()
        .and_then(|response| response.get("newTodos"))
        .and_then(Value::as_array)
        .is_some_and(|todos| {
            todos
                .iter()
                .any(|todo| todo.get("status").and_then(Value::as_str) == Some("completed"))
        })
}

impl HookSpec for PostToolUseSpec {
    fn run(&self, ctx: &HookContext, event: &HookEvent) -> HookOutcome {
        if ctx.flags.notify && completed_todos(event) {
            ctx.dispatcher.speak(&ctx.config.phrases.completion);
        }
        HookOutcome::silent()
    }
}
