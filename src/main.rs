use std::error::Error;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::cardio::{CardioAction, CardioEffect, CardioState};
use crate::config::Config;
use crate::display::{Event, Events, Headless, TerminalApp};
use crate::notify::{BellNotifier, ExecNotifier, Notifier};
use crate::tick::{TickHandle, Ticker};
use crate::time_format::TimeFormat;
use crate::workout_tracker::{AppEffect, WorkoutTracker};

mod cardio;
mod config;
mod control;
mod display;
mod file;
mod notify;
mod rest_timer;
mod session;
mod tick;
mod time_format;
mod workout_tracker;

const SOCKET_NAME: &str = "restbell.sock";

pub trait TimerDisplay {
    fn run(&mut self) -> Result<bool, Box<dyn Error>>;

    fn tracker(&self) -> &Arc<Mutex<WorkoutTracker>>;
}

#[derive(Parser)]
#[command(name = "restbell", about = "Rest countdowns for strength and cardio sessions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Track a strength session with a rest countdown per exercise
    Workout(WorkoutArgs),
    /// Run a single cardio countdown
    Cardio(CardioArgs),
}

#[derive(Args, Default)]
struct WorkoutArgs {
    /// Session file to load and keep saved
    #[arg(short, long)]
    file: Option<String>,

    /// Frontend to render with
    #[arg(short, long, value_enum, default_value = "terminal")]
    display: DisplayKind,

    /// Control socket path
    #[arg(short, long)]
    socket: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum DisplayKind {
    #[default]
    Terminal,
    Null,
}

#[derive(Args)]
struct CardioArgs {
    /// Countdown minutes
    #[arg(short, long)]
    minutes: u32,

    /// Countdown seconds on top of the minutes
    #[arg(short, long, default_value_t = 0)]
    seconds: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("restbell=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli
        .command
        .unwrap_or(Command::Workout(WorkoutArgs::default()))
    {
        Command::Workout(args) => run_workout(args).await,
        Command::Cardio(args) => run_cardio(args).await,
    }
}

async fn run_workout(args: WorkoutArgs) -> Result<(), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref());
    let notifier = notifier_from(&config);
    let message = config.notify_message.clone();
    let period = Duration::from_millis(config.tick_millis);
    let socket = args
        .socket
        .or_else(|| config.socket.clone())
        .unwrap_or_else(default_socket_path);

    let tracker = WorkoutTracker::new(args.file, config);
    let mut app: Box<dyn TimerDisplay> = match args.display {
        DisplayKind::Terminal => Box::new(TerminalApp::new(tracker)),
        DisplayKind::Null => Box::new(Headless::new(tracker)),
    };
    let tracker = Arc::clone(app.tracker());
    let _ = std::fs::remove_file(&socket);
    let listener = UnixListener::bind(&socket)?;
    let (request_tx, mut request_rx) = mpsc::unbounded_channel();
    tokio::spawn(control::serve(listener, request_tx));
    tracing::info!("listening on {}", socket);

    let ticker = Ticker::new(period);
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();

    loop {
        if app.run()? {
            break;
        }

        while tick_rx.try_recv().is_ok() {
            tracker.lock().unwrap().tick();
        }

        while let Ok((request, reply)) = request_rx.try_recv() {
            let response = control::handle(&tracker, request);
            let _ = reply.send(response);
        }

        let pending = tracker.lock().unwrap().take_pending();
        for effect in pending {
            match effect {
                AppEffect::StartTicker => {
                    let mut tracker = tracker.lock().unwrap();
                    // The countdowns may have emptied again since the start
                    // was requested.
                    if !tracker.timers.is_empty() {
                        match ticker.start(tick_tx.clone()) {
                            Ok(handle) => tracker.set_ticker(handle),
                            Err(err) => {
                                tracing::warn!("rest countdown will not advance: {}", err)
                            }
                        }
                    }
                }
                AppEffect::StopTicker(handle) => handle.stop(),
                AppEffect::Notify => {
                    let notifier = Arc::clone(&notifier);
                    let message = message.clone();
                    tokio::spawn(async move {
                        if let Err(err) = notifier.notify(&message).await {
                            tracing::warn!("notification failed: {}", err);
                        }
                    });
                }
            }
        }

        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    let _ = std::fs::remove_file(&socket);
    Ok(())
}

async fn run_cardio(args: CardioArgs) -> Result<(), Box<dyn Error>> {
    let mut state = CardioState::new(args.minutes, args.seconds);
    let total = state.total_seconds();
    let ticker = Ticker::new(Duration::from_secs(1));
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut handle: Option<TickHandle> = None;

    let effect = state.reduce(CardioAction::Start);
    apply_cardio_effect(effect, &ticker, &tick_tx, &mut handle);

    enable_raw_mode()?;
    let events = Events::new(Duration::from_millis(250));

    loop {
        while tick_rx.try_recv().is_ok() {
            let effect = state.reduce(CardioAction::Decrement);
            apply_cardio_effect(effect, &ticker, &tick_tx, &mut handle);
        }

        render_cardio(&state)?;

        if state.finished() {
            break;
        }

        if let Event::Input(key) = events.next()? {
            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char(' ') => {
                    let action = if state.ticking() {
                        CardioAction::Pause
                    } else {
                        CardioAction::Start
                    };
                    let effect = state.reduce(action);
                    apply_cardio_effect(effect, &ticker, &tick_tx, &mut handle);
                }
                _ => {}
            }
        }
    }

    if let Some(handle) = handle.take() {
        handle.stop();
    }
    disable_raw_mode()?;
    println!();

    let elapsed = total - state.total_seconds();
    println!("{} elapsed", TimeFormat::for_clock().format_seconds(elapsed));
    Ok(())
}

fn apply_cardio_effect(
    effect: Option<CardioEffect>,
    ticker: &Ticker,
    events: &mpsc::UnboundedSender<()>,
    handle: &mut Option<TickHandle>,
) {
    match effect {
        Some(CardioEffect::StartTicker) => match ticker.start(events.clone()) {
            Ok(started) => {
                if let Some(old) = handle.replace(started) {
                    old.stop();
                }
            }
            Err(err) => tracing::warn!("cardio countdown will not advance: {}", err),
        },
        Some(CardioEffect::StopTicker) => {
            if let Some(old) = handle.take() {
                old.stop();
            }
        }
        None => {}
    }
}

fn render_cardio(state: &CardioState) -> Result<(), Box<dyn Error>> {
    let shown = TimeFormat::for_clock().format_seconds(state.total_seconds());
    let label = if state.finished() {
        "done"
    } else if state.ticking() {
        "running"
    } else {
        "paused"
    };
    print!("\r{} {}  [space] pause/resume  [q] quit", shown, label);
    io::stdout().flush()?;
    Ok(())
}

fn notifier_from(config: &Config) -> Arc<dyn Notifier + Send + Sync> {
    match &config.notify_command {
        Some(words) if !words.is_empty() => {
            Arc::new(ExecNotifier::new(words[0].clone(), words[1..].to_vec()))
        }
        _ => Arc::new(BellNotifier),
    }
}

fn default_socket_path() -> String {
    format!(
        "{}/{}",
        std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string()),
        SOCKET_NAME
    )
}
