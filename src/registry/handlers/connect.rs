use crate::error::TerminalError;
use crate::model::{Action, CommandOutput};
use crate::registry::params::ConnectParams;
use crate::registry::{HandlerContext, HandlerResult};

pub fn connect(ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult {
    let Some(platform) = ConnectParams::parse(args).platform else {
        return Ok(CommandOutput::text(ctx.content.contact_text()));
    };

    let link = ctx
        .content
        .find_social_link(&platform)
        .ok_or(TerminalError::UnknownPlatform { platform })?;

    let action = Action::OpenLink {
        url: link.url.clone(),
    };
    action.validate()?;
    Ok(CommandOutput::text(format!("Opening {}...", link.name)).with_action(action))
}
