//! Translates the action declared on a [`CommandOutput`] into calls against
//! the host capabilities. Never touches history; the terminal decides what a
//! result means for session state.

use crate::content::Content;
use crate::error::TerminalError;
use crate::model::{Action, CommandOutput};

use super::capability::{Capabilities, SessionHandle};
use super::state::{SessionId, SessionKind};

/// Outcome of an action that completes immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    ClearHistory,
    LinkOpened,
}

pub struct SideEffectDispatcher {
    caps: Capabilities,
}

impl SideEffectDispatcher {
    pub fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    /// The session a result asks for, if any. Only results flagged
    /// long-running with an audio or mirror action start one.
    pub fn session_request(output: &CommandOutput) -> Option<SessionKind> {
        if !output.is_long_running {
            return None;
        }
        match output.action.as_ref()? {
            Action::PlayAudio { audio_file } => Some(SessionKind::Audio {
                track: audio_file.clone(),
            }),
            Action::Mirror { variant } => Some(SessionKind::Mirror { variant: *variant }),
            Action::OpenLink { .. } | Action::Clear => None,
        }
    }

    /// Run an action that does not occupy the session slot.
    pub fn run_immediate(&mut self, action: &Action) -> Result<Effect, TerminalError> {
        action.validate()?;
        match action {
            Action::Clear => Ok(Effect::ClearHistory),
            Action::OpenLink { url } => {
                tracing::info!(%url, "opening link");
                self.caps.links.open(url)?;
                Ok(Effect::LinkOpened)
            }
            Action::PlayAudio { .. } | Action::Mirror { .. } => Ok(Effect::None),
        }
    }

    /// Acquire the resource for a new session.
    pub fn start_session(
        &mut self,
        id: SessionId,
        kind: &SessionKind,
        content: &Content,
    ) -> Result<Box<dyn SessionHandle>, TerminalError> {
        match kind {
            SessionKind::Audio { track } => {
                let track = content.find_audio_track(track).ok_or_else(|| {
                    TerminalError::AudioUnavailable {
                        track: track.clone(),
                    }
                })?;
                tracing::debug!(session = %id, src = %track.src, "starting audio");
                self.caps.audio.play(id, track)
            }
            SessionKind::Mirror { variant } => {
                tracing::debug!(session = %id, %variant, "starting camera");
                self.caps.camera.start(id, *variant)
            }
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            1.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.caps.audio.set_volume(volume);
    }
}
