pub mod capability;
pub mod dispatcher;
pub mod keys;
pub mod state;
pub mod terminal;

pub use capability::{
    stop_with, AudioPlayer, Capabilities, LinkOpener, MirrorCamera, SessionEvent,
    SessionEventKind, SessionHandle,
};
pub use state::{Cancellation, RunningSession, SessionId, SessionKind, SessionState};
pub use terminal::{SuggestionPopover, Terminal};
