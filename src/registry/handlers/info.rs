use crate::content::ABOUT;
use crate::model::CommandOutput;
use crate::registry::catalog::help_text;
use crate::registry::{HandlerContext, HandlerResult};

const RESUME: &str = "I'm working as a fullstack JavaScript developer with breadth experience in single-page applications, responsive websites and Android/iOS mobile applications.

Client-side programming: HTML, CSS, JavaScript, React, Redux
Server-side programming: Node.js, Express, GraphQL
Mobile development: Cordova, React Native
Document database: MongoDB
Server-side administration: Heroku, Linux, Nginx";

pub fn help(ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
    Ok(CommandOutput::text(help_text(ctx.table)))
}

pub fn about(_ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
    Ok(CommandOutput::text(ABOUT))
}

pub fn resume(_ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
    Ok(CommandOutput::text(RESUME))
}
