use serde::Serialize;

/// Structured error type for the terminal. Handlers return it, the interpreter
/// folds it into an error-kind output, and the frontend can match on `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "code", content = "detail")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum TerminalError {
    #[error("command name or alias \"{name}\" is already registered")]
    DuplicateCommand { name: String },
    #[error("invalid command name \"{name}\"")]
    InvalidCommandName { name: String },
    #[error("{name}: command not found")]
    UnknownCommand { name: String },
    #[error("Platform \"{platform}\" not found. Type \"connect\" to see available options.")]
    UnknownPlatform { platform: String },
    #[error("Invalid flag for mirror command: {flag}. Available options: --v1, --v2, --v3")]
    InvalidMirrorFlag { flag: String },
    #[error("{action} action is missing its data")]
    MissingActionData { action: String },
    #[error("{message}")]
    HandlerFault { message: String },
    #[error("Audio not found: {track}")]
    AudioUnavailable { track: String },
    #[error("{message}")]
    Resource { message: String },
    #[error("I/O error: {message}")]
    Io { message: String },
    #[error("Settings error: {message}")]
    Settings { message: String },
}

impl TerminalError {
    /// Errors caused by what the user typed. These are printed as-is; anything
    /// else is a fault inside a handler and gets the generic prefix.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TerminalError::UnknownCommand { .. }
                | TerminalError::UnknownPlatform { .. }
                | TerminalError::InvalidMirrorFlag { .. }
        )
    }
}

impl From<std::io::Error> for TerminalError {
    fn from(e: std::io::Error) -> Self {
        TerminalError::Io {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for TerminalError {
    fn from(e: serde_json::Error) -> Self {
        TerminalError::Settings {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_message_names_token() {
        let err = TerminalError::UnknownCommand {
            name: "nonexistentcmd".into(),
        };
        assert_eq!(err.to_string(), "nonexistentcmd: command not found");
    }

    #[test]
    fn serializes_with_code_tag() {
        let err = TerminalError::InvalidMirrorFlag { flag: "--v9".into() };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "InvalidMirrorFlag");
        assert_eq!(json["detail"]["flag"], "--v9");
    }
}
