//! Turns one raw input line into a [`CommandOutput`]. Never fails: unknown
//! commands, bad arguments, handler errors and handler panics all come back
//! as error-kind outputs.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::content::Content;
use crate::error::TerminalError;
use crate::model::CommandOutput;
use crate::registry::{CommandTable, HandlerContext, HandlerResult};
use crate::settings::TerminalSettings;

/// A trimmed input line split on runs of whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub name: String,
    pub args: Vec<String>,
}

/// Returns None for blank input.
pub fn parse_line(raw: &str) -> Option<ParsedLine> {
    let mut tokens = raw.split_whitespace().map(ToString::to_string);
    let name = tokens.next()?;
    Some(ParsedLine {
        name,
        args: tokens.collect(),
    })
}

pub struct Interpreter {
    table: CommandTable,
    content: Content,
}

impl Interpreter {
    pub fn new(table: CommandTable, content: Content) -> Self {
        Self { table, content }
    }

    /// Built-in command table with content taken from `settings`.
    pub fn from_settings(settings: &TerminalSettings) -> Result<Self, TerminalError> {
        Ok(Self::new(
            CommandTable::builtin()?,
            Content::from_settings(settings),
        ))
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn execute(&self, raw: &str) -> CommandOutput {
        let Some(ParsedLine { name, args }) = parse_line(raw) else {
            return CommandOutput::empty();
        };

        let Some(spec) = self.table.find(&name) else {
            tracing::debug!(command = %name, "unknown command");
            return TerminalError::UnknownCommand { name }.into();
        };

        let id = spec.id;
        let ctx = HandlerContext {
            content: &self.content,
            table: &self.table,
        };
        tracing::debug!(command = ?id, args = args.len(), "executing");
        run_guarded(|| id.dispatch(&ctx, &args))
    }
}

/// Run a handler, folding its error or panic into an error-kind output.
fn run_guarded<F>(handler: F) -> CommandOutput
where
    F: FnOnce() -> HandlerResult,
{
    match catch_unwind(AssertUnwindSafe(handler)) {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.is_user_error() => CommandOutput::error(e.to_string()),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "handler failed");
            fault(&e)
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "Unknown error".to_string());
            let err = TerminalError::HandlerFault { message };
            tracing::error!(error = %err, "handler panicked");
            fault(&err)
        }
    }
}

fn fault(err: &TerminalError) -> CommandOutput {
    CommandOutput::error(format!("Error executing command: {err}"))
}
