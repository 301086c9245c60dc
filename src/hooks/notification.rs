//! Notification: classify the host's message and speak a matching phrase.

use crate::event::HookEvent;
use crate::hooks::{HookContext, HookOutcome, HookSpec};

pub struct NotificationSpec;

impl HookSpec for NotificationSpec {
    fn run(&self, ctx: &HookContext, event: &HookEvent) -> HookOutcome {
        if ctx.flags.notify {
            let message = event.message.as_deref().unwrap_or("");
            let title = event.title.as_deref().unwrap_or("");
            ctx.dispatcher.notify(message, title);
        }
        HookOutcome::silent()
    }
}
