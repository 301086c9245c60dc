//! Stop: record the end of a turn and optionally announce it.

use crate::event::HookEvent;
use crate::hooks::{HookContext, HookOutcome, HookSpec};

pub struct StopSpec;

impl HookSpec for StopSpec {
    fn run(&self, ctx: &HookContext, _event: &HookEvent) -> HookOutcome {
        if ctx.flags.notify {
            ctx.dispatcher.speak(&ctx.config.phrases.stop);
        }
        HookOutcome::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testutil::Fixture;
    use crate::hooks::HookFlags;
    use serde_json::json;

    #[test]
    fn stop_never_writes_stdout() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(HookFlags {
            notify: true,
            load_context: false,
        });
        let event = HookEvent::from_value(json!({"session_id": "s"}));
        assert!(StopSpec.run(&ctx, &event).stdout.is_none());
    }
}
