// CLI binary: unrecoverable setup errors exit the process.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::unreachable, clippy::indexing_slicing)]

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use termfolio::autocomplete::{self, Suggestion};
use termfolio::content::EMPTY_HINT;
use termfolio::error::TerminalError;
use termfolio::interpreter::Interpreter;
use termfolio::mirror::{self, Frame};
use termfolio::model::{Action, CommandOutput, MirrorVariant, OutputKind};
use termfolio::paths;
use termfolio::registry::catalog;
use termfolio::session::{
    stop_with, AudioPlayer, Capabilities, Cancellation, LinkOpener, MirrorCamera, SessionEvent,
    SessionEventKind, SessionHandle, SessionId, SessionKind, Terminal,
};
use termfolio::settings::{self, AudioTrack, MirrorSettings, TerminalSettings};

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(name = "termfolio-cli", about = "Portfolio terminal for the shell", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config directory override
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal (default)
    Repl,
    /// Execute one line and print its result
    Run {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Show completions for a partial line
    Complete { input: String },
    /// List commands grouped by category
    Commands {
        /// Include hidden commands
        #[arg(long)]
        all: bool,
    },
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(paths::default_config_dir);
    let settings = settings::load_or_default(&config_dir).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    tracing::debug!(config_dir = %config_dir.display(), "settings loaded");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            if let Err(e) = run_repl(&settings, cli.json).await {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        Commands::Run { line } => {
            let interpreter = build_interpreter(&settings);
            let output = interpreter.execute(&line.join(" "));
            print_output(&output, cli.json);
            if output.is_error() {
                process::exit(1);
            }
        }
        Commands::Complete { input } => {
            let interpreter = build_interpreter(&settings);
            let suggestion =
                autocomplete::suggest(interpreter.table(), interpreter.content(), &input);
            print_suggestion(&input, &suggestion, cli.json);
        }
        Commands::Commands { all } => {
            let interpreter = build_interpreter(&settings);
            if cli.json {
                let specs: Vec<_> = interpreter
                    .table()
                    .all()
                    .filter(|s| all || !s.hidden)
                    .collect();
                println!("{}", serde_json::to_string_pretty(&specs).unwrap_or_default());
            } else {
                println!("{}", catalog::commands_by_category(interpreter.table(), all));
            }
        }
    }
}

fn build_interpreter(settings: &TerminalSettings) -> Interpreter {
    Interpreter::from_settings(settings).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    })
}

// ── Interactive loop ─────────────────────────────────────────────

async fn run_repl(settings: &TerminalSettings, json: bool) -> Result<(), TerminalError> {
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let caps = Capabilities {
        links: Box::new(PrintingLinkOpener),
        audio: Box::new(TimedAudioPlayer::new(events_tx.clone())),
        camera: Box::new(PatternCamera::new(events_tx, settings.mirror)),
    };
    let mut terminal = Terminal::from_settings(settings, caps)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !json {
        println!("{}", catalog::help_text(terminal.interpreter().table()));
        println!();
        println!("{EMPTY_HINT}");
    }

    loop {
        prompt(&terminal, settings, json);
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => handle_line(&mut terminal, &line, json),
                Ok(None) => break,
                Err(e) => return Err(e.into()),
            },
            Some(event) = events.recv() => handle_event(&mut terminal, event, settings, json),
            _ = tokio::signal::ctrl_c() => {
                let outcome = terminal.cancel();
                if !json {
                    match outcome {
                        Cancellation::Session(running) => println!("^C {}", running.label),
                        Cancellation::Input | Cancellation::Nothing => println!("^C"),
                    }
                }
            }
        }
    }
    Ok(())
}

fn prompt(terminal: &Terminal, settings: &TerminalSettings, json: bool) {
    use std::io::Write;

    if json {
        return;
    }
    match terminal.active() {
        Some(running) => print!("[{}] {} ", running.label, settings.prompt),
        None => print!("{} ", settings.prompt),
    }
    print!("{}", terminal.input());
    let _ = std::io::stdout().flush();
}

/// A line ending in a tab asks for completion; an empty line submits whatever
/// completion left pending.
fn handle_line(terminal: &mut Terminal, line: &str, json: bool) {
    if let Some(partial) = line.strip_suffix('\t') {
        let typed = format!("{}{partial}", terminal.input());
        terminal.type_input(typed);
        let suggestion = terminal.complete();
        if json {
            println!("{}", serde_json::to_string(&suggestion).unwrap_or_default());
        } else if let Some(popover) = terminal.suggestions() {
            println!("{}", popover.suggestions.join("  "));
        } else if suggestion == Suggestion::None {
            println!("(no completions)");
        }
        return;
    }

    if !line.is_empty() || terminal.input().is_empty() {
        let typed = format!("{}{line}", terminal.input());
        terminal.type_input(typed);
    }
    let had_history = !terminal.history().is_empty();
    let Some(output) = terminal.submit() else {
        return;
    };

    if json {
        println!("{}", serde_json::to_string(&output).unwrap_or_default());
        return;
    }
    if output.action == Some(Action::Clear) {
        if had_history {
            print!("\x1B[2J\x1B[1;1H");
        }
        println!("{EMPTY_HINT}");
        return;
    }
    print_output(&output, false);
    if let Some(fault) = terminal.fault() {
        println!("{fault}");
    }
}

fn handle_event(
    terminal: &mut Terminal,
    event: SessionEvent,
    settings: &TerminalSettings,
    json: bool,
) {
    let running = terminal.active().cloned();
    let kind = event.kind.clone();
    if !terminal.on_session_event(event) {
        return;
    }
    let Some(running) = running else {
        return;
    };
    if json {
        println!(
            "{}",
            serde_json::json!({ "session": running.label, "event": kind })
        );
        return;
    }

    println!();
    match kind {
        SessionEventKind::Loaded => {
            if let SessionKind::Mirror { variant } = running.kind {
                print_mirror_frame(settings.mirror, variant);
            }
        }
        SessionEventKind::Ended => println!("[{} finished]", running.label),
        SessionEventKind::Failed(message) => println!("{message}"),
    }
}

fn print_mirror_frame(size: MirrorSettings, variant: MirrorVariant) {
    let frame = Frame::test_pattern(size.frame_width, size.frame_height, 0);
    println!("{}", mirror::render_ascii(&frame, variant));
}

// ── Output formatting ────────────────────────────────────────────

fn print_output(output: &CommandOutput, raw_json: bool) {
    if raw_json {
        println!("{}", serde_json::to_string_pretty(output).unwrap_or_default());
        return;
    }

    match output.kind {
        OutputKind::Cancelled => println!("^C"),
        _ if output.output.is_empty() => {}
        _ => println!("{}", output.output),
    }
    if let Some(Action::OpenLink { url }) = &output.action {
        println!("→ {url}");
    }
}

fn print_suggestion(input: &str, suggestion: &Suggestion, raw_json: bool) {
    if raw_json {
        println!("{}", serde_json::to_string_pretty(suggestion).unwrap_or_default());
        return;
    }
    match suggestion {
        Suggestion::None => {}
        Suggestion::Complete { .. } => {
            if let Some(line) = autocomplete::apply(input, suggestion) {
                println!("{line}");
            }
        }
        Suggestion::Multiple { suggestions, .. } => {
            for s in suggestions {
                println!("{s}");
            }
        }
    }
}

// ── Host capabilities ────────────────────────────────────────────

/// There is no browser to hand the URL to; `print_output` prints it instead.
struct PrintingLinkOpener;

impl LinkOpener for PrintingLinkOpener {
    fn open(&mut self, url: &str) -> Result<(), TerminalError> {
        tracing::info!(%url, "link requested");
        Ok(())
    }
}

/// Stands in for an audio device: the session ends after the track's
/// configured duration.
struct TimedAudioPlayer {
    events: UnboundedSender<SessionEvent>,
    volume: f32,
}

impl TimedAudioPlayer {
    fn new(events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            events,
            volume: 1.0,
        }
    }
}

impl AudioPlayer for TimedAudioPlayer {
    fn play(
        &mut self,
        id: SessionId,
        track: &AudioTrack,
    ) -> Result<Box<dyn SessionHandle>, TerminalError> {
        let length =
            Duration::try_from_secs_f64(track.duration_secs).map_err(|e| TerminalError::Resource {
                message: format!("Failed to play audio: {e}"),
            })?;
        tracing::info!(session = %id, src = %track.src, volume = self.volume, "playing");

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(length).await;
            let _ = events.send(SessionEvent::ended(id));
        });
        Ok(stop_with(move || task.abort()))
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Camera backed by a generated test pattern. Reports `Loaded` once the
/// first frame would be on screen, then holds until stopped.
struct PatternCamera {
    events: UnboundedSender<SessionEvent>,
    size: MirrorSettings,
}

const FIRST_FRAME_DELAY: Duration = Duration::from_millis(100);

impl PatternCamera {
    fn new(events: UnboundedSender<SessionEvent>, size: MirrorSettings) -> Self {
        Self { events, size }
    }
}

impl MirrorCamera for PatternCamera {
    fn start(
        &mut self,
        id: SessionId,
        variant: MirrorVariant,
    ) -> Result<Box<dyn SessionHandle>, TerminalError> {
        if self.size.frame_width == 0 || self.size.frame_height == 0 {
            return Err(TerminalError::Resource {
                message: mirror::CAMERA_DENIED.to_string(),
            });
        }
        tracing::info!(session = %id, %variant, "camera started");

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(FIRST_FRAME_DELAY).await;
            let _ = events.send(SessionEvent::loaded(id));
            std::future::pending::<()>().await;
        });
        Ok(stop_with(move || task.abort()))
    }
}
