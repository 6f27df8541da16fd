//! The terminal driver. Owns the interpreter, the session state and the
//! dispatcher, and is the only place where a command result turns into
//! history, session transitions and capability calls.

use serde::Serialize;

use crate::autocomplete::{self, CompletionContext, Suggestion};
use crate::content::EMPTY_HINT;
use crate::error::TerminalError;
use crate::interpreter::Interpreter;
use crate::model::{CommandOutput, HistoryEntry};
use crate::settings::TerminalSettings;

use super::capability::{Capabilities, SessionEvent, SessionEventKind, SessionHandle};
use super::dispatcher::{Effect, SideEffectDispatcher};
use super::keys::{self, GlobalShortcut, InputAction, KeyPress};
use super::state::{Cancellation, RunningSession, SessionId, SessionKind, SessionState};

/// Suggestion list shown after an ambiguous Tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionPopover {
    pub suggestions: Vec<String>,
    pub context: CompletionContext,
}

pub struct Terminal {
    interpreter: Interpreter,
    state: SessionState,
    dispatcher: SideEffectDispatcher,
    handle: Option<(SessionId, Box<dyn SessionHandle>)>,
    popover: Option<SuggestionPopover>,
    fault: Option<String>,
}

impl Terminal {
    pub fn new(interpreter: Interpreter, caps: Capabilities) -> Self {
        Self {
            interpreter,
            state: SessionState::new(),
            dispatcher: SideEffectDispatcher::new(caps),
            handle: None,
            popover: None,
            fault: None,
        }
    }

    pub fn from_settings(
        settings: &TerminalSettings,
        caps: Capabilities,
    ) -> Result<Self, TerminalError> {
        let mut terminal = Self::new(Interpreter::from_settings(settings)?, caps);
        terminal.set_volume(settings.effective_volume());
        Ok(terminal)
    }

    // ── Read access for the UI ──

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.state.history()
    }

    pub fn input(&self) -> &str {
        self.state.pending_input()
    }

    pub fn active(&self) -> Option<&RunningSession> {
        self.state.active()
    }

    pub fn suggestions(&self) -> Option<&SuggestionPopover> {
        self.popover.as_ref()
    }

    /// Why the last session could not start or stopped early.
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Hint shown while nothing has been run yet.
    pub fn empty_hint(&self) -> Option<&'static str> {
        self.state.history().is_empty().then_some(EMPTY_HINT)
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.dispatcher.set_volume(volume);
    }

    // ── Input line ──

    /// Replace the input line. Suggestions stay open only while the line ends
    /// in a space.
    pub fn type_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() || !text.ends_with(' ') {
            self.popover = None;
        }
        self.state.set_input(text);
    }

    pub fn recall_up(&mut self) {
        self.state.recall_up();
    }

    pub fn recall_down(&mut self) {
        self.state.recall_down();
    }

    pub fn dismiss_suggestions(&mut self) {
        self.popover = None;
    }

    /// Tab: apply a single completion or open the suggestion list.
    pub fn complete(&mut self) -> Suggestion {
        let input = self.state.pending_input().to_string();
        if input.trim().is_empty() {
            return Suggestion::None;
        }
        let suggestion = autocomplete::suggest(
            self.interpreter.table(),
            self.interpreter.content(),
            &input,
        );
        match &suggestion {
            Suggestion::Complete { .. } => {
                if let Some(line) = autocomplete::apply(&input, &suggestion) {
                    self.state.set_input(line);
                }
                self.popover = None;
            }
            Suggestion::Multiple {
                suggestions,
                context,
            } => {
                self.popover = Some(SuggestionPopover {
                    suggestions: suggestions.clone(),
                    context: *context,
                });
            }
            Suggestion::None => self.popover = None,
        }
        suggestion
    }

    // ── Execution ──

    /// Enter: run the input line. Blank lines do nothing.
    pub fn submit(&mut self) -> Option<CommandOutput> {
        if self.state.pending_input().trim().is_empty() {
            return None;
        }
        let line = self.state.take_input();
        Some(self.run_line(&line))
    }

    /// Run one line as if typed. Any running session is stopped first without
    /// a cancelled entry.
    pub fn run_line(&mut self, line: &str) -> CommandOutput {
        self.popover = None;
        self.stop_active();
        self.fault = None;

        let output = self.interpreter.execute(line);
        self.state.record(line, output.clone());

        if let Some(action) = &output.action {
            match self.dispatcher.run_immediate(action) {
                Ok(Effect::ClearHistory) => self.state.clear_history(),
                Ok(Effect::LinkOpened | Effect::None) => {}
                Err(e) => tracing::warn!(action = action.name(), error = %e, "action failed"),
            }
        }

        if let Some(kind) = SideEffectDispatcher::session_request(&output) {
            self.start_session(kind);
        }
        output
    }

    fn start_session(&mut self, kind: SessionKind) {
        let (id, displaced) = self.state.begin_session(kind.clone());
        if let Some(prev) = displaced {
            tracing::warn!(session = %prev.id, "replaced a session that was still active");
        }
        match self
            .dispatcher
            .start_session(id, &kind, self.interpreter.content())
        {
            Ok(handle) => self.handle = Some((id, handle)),
            Err(e) => {
                tracing::warn!(session = %id, error = %e, "session failed to start");
                self.state.finish_session(id);
                self.fault = Some(e.to_string());
            }
        }
    }

    /// Stop whatever is running, recording nothing.
    fn stop_active(&mut self) {
        if let Some((id, mut handle)) = self.handle.take() {
            tracing::debug!(session = %id, "stopping session");
            handle.stop();
        }
        self.state.abandon_session();
    }

    /// Release the resource of `id` if it is still held.
    fn release(&mut self, id: SessionId) {
        if self.handle.as_ref().is_some_and(|(held, _)| *held == id) {
            if let Some((_, mut handle)) = self.handle.take() {
                handle.stop();
            }
        }
    }

    /// Ctrl+C.
    pub fn cancel(&mut self) -> Cancellation {
        self.popover = None;
        let outcome = self.state.cancel();
        if let Cancellation::Session(running) = &outcome {
            tracing::debug!(session = %running.id, "session cancelled");
            self.release(running.id);
        }
        outcome
    }

    /// Apply a completion event from a capability. Returns false when the
    /// event belongs to a session that is no longer active.
    pub fn on_session_event(&mut self, event: SessionEvent) -> bool {
        match event.kind {
            SessionEventKind::Loaded => self.state.mark_loaded(event.id),
            SessionEventKind::Ended => {
                if self.state.finish_session(event.id).is_none() {
                    return false;
                }
                self.release(event.id);
                true
            }
            SessionEventKind::Failed(message) => {
                if self.state.finish_session(event.id).is_none() {
                    return false;
                }
                tracing::warn!(session = %event.id, error = %message, "session failed");
                self.release(event.id);
                self.fault = Some(message);
                true
            }
        }
    }

    // ── Keyboard ──

    /// Key pressed while the input line has focus.
    pub fn press_key(&mut self, press: KeyPress) -> InputAction {
        let action = keys::input_action(press);
        match action {
            InputAction::Submit => {
                self.submit();
            }
            InputAction::Complete => {
                self.complete();
            }
            InputAction::RecallUp => self.recall_up(),
            InputAction::RecallDown => self.recall_down(),
            InputAction::Cancel => {
                self.cancel();
            }
            InputAction::DismissSuggestions => self.dismiss_suggestions(),
            InputAction::Insert(c) => {
                let mut line = self.input().to_string();
                line.push(c);
                self.type_input(line);
            }
            InputAction::DeleteBack => {
                let mut line = self.input().to_string();
                line.pop();
                self.type_input(line);
            }
            InputAction::Ignore => {}
        }
        action
    }

    /// Key pressed anywhere else in the page.
    pub fn press_global(&mut self, press: KeyPress) -> GlobalShortcut {
        let shortcut = keys::global_shortcut(press);
        match shortcut {
            GlobalShortcut::ClearHistory => self.state.clear_history(),
            GlobalShortcut::RunHelp => {
                self.run_line("help");
            }
            GlobalShortcut::FocusInput | GlobalShortcut::Ignore => {}
        }
        shortcut
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.stop_active();
    }
}
