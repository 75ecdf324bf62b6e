//! Terminal column-match runner (default binary).
//!
//! Game state is driven by the tokio scheduler in `tui_columns::runtime`. This
//! thread owns the terminal: it polls crossterm for keys, forwards them as
//! actions and draws the latest published snapshot.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_columns::config::GameConfig;
use tui_columns::core::GameController;
use tui_columns::input::{handle_key_event, should_quit};
use tui_columns::runtime::GameLoop;
use tui_columns::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// tui-columns - falling three-cell column puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for piece colors
    #[arg(short, long)]
    seed: Option<u32>,

    /// Drop timer period in milliseconds
    #[arg(long)]
    drop_ms: Option<u64>,

    /// Resolution/render frame period in milliseconds
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Also reset running score and lines on game over
    #[arg(long)]
    reset_counters: bool,

    /// Write logs to this file (the terminal is used by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.drop_ms {
            config.drop_interval_ms = ms;
        }
        if let Some(ms) = self.frame_ms {
            config.frame_interval_ms = ms;
        }
        if self.reset_counters {
            config.reset_counters_on_game_over = true;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = GameConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    init_tracing(config.log_file.as_deref())?;

    let seed = config.seed.unwrap_or_else(seed_from_clock);
    info!(seed, ?config, "starting");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .context("failed to build tokio runtime")?;
    let game = GameController::with_rules(seed, config.rules());
    let game_loop = GameLoop::spawn(rt.handle(), game, config.timing());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &game_loop, config.timing().frame_interval);

    // Always try to restore terminal state.
    let _ = term.exit();
    game_loop.stop();
    rt.shutdown_timeout(Duration::from_millis(200));
    result
}

fn run(term: &mut TerminalRenderer, game_loop: &GameLoop, frame: Duration) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frames = game_loop.frames();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = *frames.borrow();
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    if !game_loop.send(action) {
                        return Ok(());
                    }
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
