use crate::model::{Action, CommandOutput};
use crate::registry::{HandlerContext, HandlerResult};

/// Declares a clear; the terminal empties the visible history and keeps recall.
pub fn clear(_ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
    Ok(CommandOutput::empty().with_action(Action::Clear))
}
