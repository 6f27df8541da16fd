use std::fmt;

use serde::Serialize;

use crate::model::{CommandOutput, HistoryEntry, MirrorVariant};

// ── Session identity ────────────────────────────────────────────

/// Identity of one long-running session. Completion callbacks carry it so a
/// late event for a replaced session can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionKind {
    Audio { track: String },
    Mirror { variant: MirrorVariant },
}

impl SessionKind {
    /// Label recorded if the session is cancelled: `marvel`, `mirror v2`.
    pub fn label(&self) -> String {
        match self {
            SessionKind::Audio { track } => track.clone(),
            SessionKind::Mirror { variant } => format!("mirror {variant}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningSession {
    pub id: SessionId,
    pub kind: SessionKind,
    pub label: String,
    /// Set once the capability reports its first frame or sample.
    pub loaded: bool,
}

/// What a cancellation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cancellation {
    /// A running session was ended; its label was logged as cancelled.
    Session(RunningSession),
    /// The typed line was logged as cancelled.
    Input,
    /// Nothing was running and the line was blank.
    Nothing,
}

// ── Session state ───────────────────────────────────────────────

/// The single mutable control object of a terminal: visible history, recall
/// log, input line and the active-session slot.
#[derive(Debug, Default)]
pub struct SessionState {
    history: Vec<HistoryEntry>,
    command_log: Vec<String>,
    recall: Option<usize>,
    pending_input: String,
    active: Option<RunningSession>,
    next_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn command_log(&self) -> &[String] {
        &self.command_log
    }

    pub fn recall_cursor(&self) -> Option<usize> {
        self.recall
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn active(&self) -> Option<&RunningSession> {
        self.active.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    // ── History ──

    /// Append an entry. Non-blank commands also enter the recall log unless
    /// they repeat the previous one.
    pub fn record(&mut self, command: impl Into<String>, result: CommandOutput) {
        let entry = HistoryEntry::new(command, result);
        let trimmed = entry.command.trim();
        if !trimmed.is_empty() && self.command_log.last().map(String::as_str) != Some(trimmed) {
            self.command_log.push(trimmed.to_string());
        }
        self.history.push(entry);
        self.recall = None;
    }

    /// Empty the visible history. The recall log is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ── Input line and recall ──

    /// Direct edit of the input line; leaves history navigation.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
        self.recall = None;
    }

    pub fn take_input(&mut self) -> String {
        self.recall = None;
        std::mem::take(&mut self.pending_input)
    }

    /// Step back through the recall log, holding at the oldest entry.
    pub fn recall_up(&mut self) -> &str {
        let Some(last) = self.command_log.len().checked_sub(1) else {
            return &self.pending_input;
        };
        let index = match self.recall {
            None => last,
            Some(i) => i.saturating_sub(1),
        };
        self.show_recalled(index);
        &self.pending_input
    }

    /// Step forward; walking past the newest entry leaves recall with an
    /// empty line. Outside recall this does nothing.
    pub fn recall_down(&mut self) -> &str {
        if let Some(i) = self.recall {
            if i + 1 >= self.command_log.len() {
                self.recall = None;
                self.pending_input.clear();
            } else {
                self.show_recalled(i + 1);
            }
        }
        &self.pending_input
    }

    fn show_recalled(&mut self, index: usize) {
        if let Some(command) = self.command_log.get(index) {
            self.pending_input.clone_from(command);
            self.recall = Some(index);
        }
    }

    // ── Active-session slot ──

    /// Occupy the slot with a new session. Returns the new id and whatever
    /// session was displaced; the caller must already have stopped its resource.
    pub fn begin_session(&mut self, kind: SessionKind) -> (SessionId, Option<RunningSession>) {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        let label = kind.label();
        let displaced = self.active.replace(RunningSession {
            id,
            kind,
            label,
            loaded: false,
        });
        tracing::debug!(session = %id, "session started");
        (id, displaced)
    }

    /// Free the slot if `id` still owns it. A stale id is a no-op.
    pub fn finish_session(&mut self, id: SessionId) -> Option<RunningSession> {
        if self.active.as_ref().is_some_and(|s| s.id == id) {
            tracing::debug!(session = %id, "session finished");
            self.active.take()
        } else {
            tracing::debug!(session = %id, "ignoring stale session event");
            None
        }
    }

    /// Free the slot regardless of owner, without logging anything.
    pub fn abandon_session(&mut self) -> Option<RunningSession> {
        self.active.take()
    }

    pub fn mark_loaded(&mut self, id: SessionId) -> bool {
        match self.active.as_mut() {
            Some(s) if s.id == id => {
                s.loaded = true;
                true
            }
            _ => false,
        }
    }

    /// Ctrl+C. A running session is ended and its label logged as cancelled;
    /// otherwise a non-blank typed line is logged as cancelled. The input line
    /// is cleared either way.
    pub fn cancel(&mut self) -> Cancellation {
        let outcome = if let Some(running) = self.active.take() {
            self.record(running.label.clone(), CommandOutput::cancelled());
            Cancellation::Session(running)
        } else if self.pending_input.trim().is_empty() {
            Cancellation::Nothing
        } else {
            let typed = std::mem::take(&mut self.pending_input);
            self.record(typed, CommandOutput::cancelled());
            Cancellation::Input
        };
        self.pending_input.clear();
        self.recall = None;
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::model::OutputKind;

    fn with_log(commands: &[&str]) -> SessionState {
        let mut state = SessionState::new();
        for c in commands {
            state.record(*c, CommandOutput::text(""));
        }
        state
    }

    fn audio(track: &str) -> SessionKind {
        SessionKind::Audio {
            track: track.into(),
        }
    }

    #[test]
    fn record_dedups_immediate_repeats_only() {
        let state = with_log(&["help", "help", "about", "help", "  ", ""]);
        assert_eq!(state.command_log(), &["help", "about", "help"]);
        assert_eq!(state.history().len(), 6);
    }

    #[test]
    fn record_trims_for_recall_but_keeps_raw_in_history() {
        let state = with_log(&["  about  "]);
        assert_eq!(state.command_log(), &["about"]);
        assert_eq!(state.history()[0].command, "  about  ");
    }

    #[test]
    fn recall_walks_up_and_holds() {
        let mut state = with_log(&["help", "about", "connect"]);
        assert_eq!(state.recall_up(), "connect");
        assert_eq!(state.recall_up(), "about");
        assert_eq!(state.recall_up(), "help");
        assert_eq!(state.recall_up(), "help");
        assert_eq!(state.recall_cursor(), Some(0));
    }

    #[test]
    fn recall_walks_down_to_empty() {
        let mut state = with_log(&["help", "about", "connect"]);
        for _ in 0..4 {
            state.recall_up();
        }
        assert_eq!(state.recall_down(), "about");
        assert_eq!(state.recall_down(), "connect");
        assert_eq!(state.recall_down(), "");
        assert_eq!(state.recall_cursor(), None);
    }

    #[test]
    fn down_outside_recall_is_noop() {
        let mut state = with_log(&["help"]);
        assert_eq!(state.recall_down(), "");
        state.set_input("ab");
        assert_eq!(state.recall_down(), "ab");
        assert_eq!(state.recall_cursor(), None);
    }

    #[test]
    fn up_with_empty_log_keeps_input() {
        let mut state = SessionState::new();
        state.set_input("typing");
        assert_eq!(state.recall_up(), "typing");
        assert_eq!(state.recall_cursor(), None);
    }

    #[test]
    fn editing_resets_recall() {
        let mut state = with_log(&["help", "about"]);
        state.recall_up();
        state.set_input("abo");
        assert_eq!(state.recall_cursor(), None);
        assert_eq!(state.recall_up(), "about");
    }

    #[test]
    fn clear_keeps_recall_log() {
        let mut state = with_log(&["help", "about"]);
        state.clear_history();
        assert!(state.history().is_empty());
        assert_eq!(state.command_log().len(), 2);
        assert_eq!(state.recall_up(), "about");
    }

    #[test]
    fn session_ids_are_unique_and_stale_finish_is_noop() {
        let mut state = SessionState::new();
        let (a, displaced) = state.begin_session(audio("marvel"));
        assert!(displaced.is_none());
        let (b, displaced) = state.begin_session(audio("starwars"));
        assert_ne!(a, b);
        assert_eq!(displaced.map(|s| s.id), Some(a));

        assert!(state.finish_session(a).is_none());
        assert_eq!(state.active().map(|s| s.id), Some(b));
        assert!(!state.mark_loaded(a));
        assert!(state.mark_loaded(b));
        assert!(state.finish_session(b).is_some());
        assert!(state.is_idle());
    }

    #[test]
    fn cancel_running_session_logs_label() {
        let mut state = SessionState::new();
        state.begin_session(SessionKind::Mirror {
            variant: MirrorVariant::V2,
        });
        state.set_input("half typed");

        let outcome = state.cancel();
        assert!(matches!(outcome, Cancellation::Session(_)));
        assert!(state.is_idle());
        assert_eq!(state.pending_input(), "");
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].command, "mirror v2");
        assert_eq!(state.history()[0].result.kind, OutputKind::Cancelled);
    }

    #[test]
    fn cancel_idle_logs_typed_line() {
        let mut state = SessionState::new();
        state.set_input("conn");
        assert_eq!(state.cancel(), Cancellation::Input);
        assert_eq!(state.history()[0].command, "conn");
        assert_eq!(state.history()[0].result.kind, OutputKind::Cancelled);
        assert_eq!(state.pending_input(), "");
    }

    #[test]
    fn cancel_idle_blank_does_nothing() {
        let mut state = SessionState::new();
        state.set_input("   ");
        assert_eq!(state.cancel(), Cancellation::Nothing);
        assert!(state.history().is_empty());
        assert_eq!(state.pending_input(), "");
    }
}
