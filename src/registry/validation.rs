//! Shared validation helpers for the command table and content tables.
//!
//! Keeps the rules for names and links in one place so registration and
//! settings loading report the same messages.

use crate::error::TerminalError;

/// A command name or alias must be a single non-empty token that does not look like a flag.
pub fn validate_command_name(name: &str) -> Result<(), TerminalError> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(TerminalError::InvalidCommandName {
            name: name.to_string(),
        })
    }
}

/// Links opened by `connect` must be absolute http(s) URLs.
pub fn validate_link_url(url: &str) -> Result<(), TerminalError> {
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.chars().any(char::is_whitespace) => Ok(()),
        _ => Err(TerminalError::Settings {
            message: format!("Invalid link url: \"{url}\". Must be an absolute http(s) URL"),
        }),
    }
}
