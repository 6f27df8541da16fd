//! Host capabilities the dispatcher drives: link opening, audio playback and
//! the camera mirror. Long-running ones hand back a [`SessionHandle`] and
//! report completion through [`SessionEvent`]s tagged with the session id.

use serde::Serialize;

use crate::error::TerminalError;
use crate::model::MirrorVariant;
use crate::settings::AudioTrack;

use super::state::SessionId;

/// Stop routine of one running session. `stop` must be safe to call any
/// number of times; only the first call releases anything.
pub trait SessionHandle {
    fn stop(&mut self);
}

/// [`SessionHandle`] backed by a one-shot closure.
pub struct StopOnce<F: FnOnce()> {
    stop: Option<F>,
}

impl<F: FnOnce()> StopOnce<F> {
    pub fn new(stop: F) -> Self {
        Self { stop: Some(stop) }
    }
}

impl<F: FnOnce()> SessionHandle for StopOnce<F> {
    fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

pub fn stop_with<F: FnOnce() + 'static>(stop: F) -> Box<dyn SessionHandle> {
    Box::new(StopOnce::new(stop))
}

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<(), TerminalError>;
}

pub trait AudioPlayer {
    /// Start playing `track`. The player reports `Ended` or `Failed` for `id`
    /// once playback finishes on its own.
    fn play(
        &mut self,
        id: SessionId,
        track: &AudioTrack,
    ) -> Result<Box<dyn SessionHandle>, TerminalError>;

    /// Volume in `[0, 1]`; callers pass values already clamped.
    fn set_volume(&mut self, volume: f32);
}

pub trait MirrorCamera {
    /// Acquire the camera and start rendering. `Loaded` follows once the first
    /// frame is on screen.
    fn start(
        &mut self,
        id: SessionId,
        variant: MirrorVariant,
    ) -> Result<Box<dyn SessionHandle>, TerminalError>;
}

/// The full set of host capabilities a terminal is built with.
pub struct Capabilities {
    pub links: Box<dyn LinkOpener>,
    pub audio: Box<dyn AudioPlayer>,
    pub camera: Box<dyn MirrorCamera>,
}

// ── Completion events ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message", rename_all = "lowercase")]
pub enum SessionEventKind {
    Loaded,
    Ended,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub id: SessionId,
    pub kind: SessionEventKind,
}

impl SessionEvent {
    pub fn loaded(id: SessionId) -> Self {
        Self {
            id,
            kind: SessionEventKind::Loaded,
        }
    }

    pub fn ended(id: SessionId) -> Self {
        Self {
            id,
            kind: SessionEventKind::Ended,
        }
    }

    pub fn failed(id: SessionId, message: impl Into<String>) -> Self {
        Self {
            id,
            kind: SessionEventKind::Failed(message.into()),
        }
    }
}

// ── Recording fakes ─────────────────────────────────────────────

/// Capabilities that only record what they were asked to do. Shared with the
/// dispatcher and terminal tests.
#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    pub type Journal = Arc<Mutex<Vec<String>>>;

    #[derive(Default, Clone)]
    pub struct Failures {
        pub audio: Option<TerminalError>,
        pub camera: Option<TerminalError>,
        pub links: Option<TerminalError>,
    }

    struct RecordingLinks(Journal, Option<TerminalError>);
    struct RecordingAudio(Journal, Option<TerminalError>);
    struct RecordingCamera(Journal, Option<TerminalError>);

    fn handle(journal: &Journal, id: SessionId) -> Box<dyn SessionHandle> {
        let journal = Arc::clone(journal);
        stop_with(move || journal.lock().push(format!("stop {id}")))
    }

    impl LinkOpener for RecordingLinks {
        fn open(&mut self, url: &str) -> Result<(), TerminalError> {
            if let Some(e) = self.1.clone() {
                return Err(e);
            }
            self.0.lock().push(format!("open {url}"));
            Ok(())
        }
    }

    impl AudioPlayer for RecordingAudio {
        fn play(
            &mut self,
            id: SessionId,
            track: &AudioTrack,
        ) -> Result<Box<dyn SessionHandle>, TerminalError> {
            if let Some(e) = self.1.clone() {
                return Err(e);
            }
            self.0.lock().push(format!("play {} {id}", track.name));
            Ok(handle(&self.0, id))
        }

        fn set_volume(&mut self, volume: f32) {
            self.0.lock().push(format!("volume {volume}"));
        }
    }

    impl MirrorCamera for RecordingCamera {
        fn start(
            &mut self,
            id: SessionId,
            variant: MirrorVariant,
        ) -> Result<Box<dyn SessionHandle>, TerminalError> {
            if let Some(e) = self.1.clone() {
                return Err(e);
            }
            self.0.lock().push(format!("camera {variant} {id}"));
            Ok(handle(&self.0, id))
        }
    }

    pub fn recording(failures: Failures) -> (Capabilities, Journal) {
        let journal: Journal = Arc::default();
        let caps = Capabilities {
            links: Box::new(RecordingLinks(Arc::clone(&journal), failures.links)),
            audio: Box::new(RecordingAudio(Arc::clone(&journal), failures.audio)),
            camera: Box::new(RecordingCamera(Arc::clone(&journal), failures.camera)),
        };
        (caps, journal)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::session::state::{SessionKind, SessionState};

    #[test]
    fn stop_once_runs_closure_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut handle = stop_with(move || counter.set(counter.get() + 1));
        handle.stop();
        handle.stop();
        handle.stop();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_event_serializes_message() {
        let mut state = SessionState::new();
        let (id, _) = state.begin_session(SessionKind::Audio {
            track: "marvel".into(),
        });
        let json = serde_json::to_value(SessionEvent::failed(id, "no device")).unwrap();
        assert_eq!(json["kind"]["type"], "failed");
        assert_eq!(json["kind"]["message"], "no device");
    }
}
