use serde::{Deserialize, Serialize};

use crate::error::TerminalError;

use super::MirrorVariant;

/// How the frontend should present an output block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum OutputKind {
    Text,
    Ascii,
    Error,
    Link,
    Cancelled,
    Mirror,
}

/// Side effect declared by a handler. Each variant carries the data it needs,
/// so an `openLink` without a url or a `mirror` without a variant cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "actionData", rename_all = "camelCase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum Action {
    OpenLink {
        url: String,
    },
    PlayAudio {
        #[serde(rename = "audioFile")]
        audio_file: String,
    },
    Clear,
    Mirror {
        variant: MirrorVariant,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::OpenLink { .. } => "openLink",
            Action::PlayAudio { .. } => "playAudio",
            Action::Clear => "clear",
            Action::Mirror { .. } => "mirror",
        }
    }

    /// Reject actions whose payload is present but empty.
    pub fn validate(&self) -> Result<(), TerminalError> {
        let empty = match self {
            Action::OpenLink { url } => url.trim().is_empty(),
            Action::PlayAudio { audio_file } => audio_file.trim().is_empty(),
            Action::Clear | Action::Mirror { .. } => false,
        };
        if empty {
            return Err(TerminalError::MissingActionData {
                action: self.name().to_string(),
            });
        }
        Ok(())
    }
}

/// Normalized, declarative outcome of executing one command.
/// Serializes to the `{output, type, action, actionData, isLongRunning}` shape
/// the browser terminal renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput {
    pub output: String,
    #[serde(rename = "type")]
    pub kind: OutputKind,
    #[serde(flatten)]
    pub action: Option<Action>,
    pub is_long_running: bool,
}

impl CommandOutput {
    pub fn new(output: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            output: output.into(),
            kind,
            action: None,
            is_long_running: false,
        }
    }

    pub fn text(output: impl Into<String>) -> Self {
        Self::new(output, OutputKind::Text)
    }

    pub fn ascii(output: impl Into<String>) -> Self {
        Self::new(output, OutputKind::Ascii)
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self::new(output, OutputKind::Error)
    }

    /// The silent no-op produced by blank input.
    pub fn empty() -> Self {
        Self::text("")
    }

    pub fn cancelled() -> Self {
        Self::new("", OutputKind::Cancelled)
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn long_running(mut self) -> Self {
        self.is_long_running = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == OutputKind::Error
    }
}

impl From<TerminalError> for CommandOutput {
    fn from(e: TerminalError) -> Self {
        CommandOutput::error(e.to_string())
    }
}
