//! Terminal runner (default binary).
//!
//! Shows a title screen until the first key, then drives a [`Session`] at
//! ~30 Hz: key events are collected until the next
//! frame is due, then the session steps once with those intents and the
//! measured elapsed time, and the resulting snapshot is drawn.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::{debug, info, Level};

use blockfall::core::{GameEvent, GameSnapshot, Session};
use blockfall::input::{should_quit, HeldKeys};
use blockfall::load_rules_or_default;
use blockfall::term::{BoardView, Frame, TerminalRenderer, Viewport};
use blockfall::types::{Intent, Rules, FRAME_MS};

/// Keys pressed this soon after a game over do not restart the game.
const GAME_OVER_GRACE: Duration = Duration::from_millis(500);

/// Keys pressed this soon after pausing do not resume, so a key repeat of
/// the pause key itself is swallowed.
const RESUME_GRACE: Duration = Duration::from_millis(300);

/// blockfall - falling-block puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding the default rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (level from BLOCKFALL_LOG, default info)
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let rules = load_rules_or_default(args.config.as_deref()).context("loading rules")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, ?rules, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed, rules);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

/// Install a file logger; without a file nothing is logged, since the
/// terminal itself is busy showing the game.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let level = std::env::var("BLOCKFALL_LOG")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, seed: u64, rules: Rules) -> Result<()> {
    let mut session = Session::new(seed, rules);
    let view = BoardView::default();
    let mut frame = Frame::new(0, 0);
    let mut snapshot = GameSnapshot::default();
    let mut held = if term.release_events() {
        HeldKeys::with_release_events()
    } else {
        HeldKeys::new()
    };
    debug!(release_events = term.release_events(), "input configured");

    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut intents: Vec<Intent> = Vec::with_capacity(16);
    let mut last_step = Instant::now();
    let mut game_over_at: Option<Instant> = None;
    let mut on_title = true;
    let mut paused_at: Option<Instant> = None;

    loop {
        // Render.
        let (w, h) = terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        if on_title {
            view.render_title_into(viewport, &mut frame);
        } else {
            session.snapshot_into(&mut snapshot);
            view.render_into(&snapshot, viewport, &mut frame);
        }
        term.draw(&frame)?;

        // Input until the next frame is due.
        let deadline = last_step + frame_duration;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if on_title => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if should_quit(key) {
                        return Ok(());
                    }
                    on_title = false;
                    debug!("leaving title screen");
                }
                Event::Key(key) => {
                    if let Some(ended) = game_over_at {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if should_quit(key) {
                            return Ok(());
                        }
                        if ended.elapsed() >= GAME_OVER_GRACE {
                            held.release_all();
                            intents.clear();
                            session.restart();
                            game_over_at = None;
                        }
                        continue;
                    }
                    let paused = paused_after(session.paused(), &intents);
                    if paused && paused_at.is_some_and(|at| at.elapsed() < RESUME_GRACE) {
                        continue;
                    }
                    intents.extend(held.route(key, paused));
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if on_title {
            last_step = Instant::now();
            continue;
        }

        // Tick.
        let now = Instant::now();
        let elapsed_ms =
            u32::try_from(now.duration_since(last_step).as_millis()).unwrap_or(u32::MAX);
        last_step = now;

        intents.extend(held.update(elapsed_ms));
        session.step(&intents, elapsed_ms);
        intents.clear();
        paused_at = if session.paused() {
            paused_at.or(Some(now))
        } else {
            None
        };

        for ev in session.take_events() {
            match ev {
                GameEvent::PieceLocked { rows_cleared } => debug!(rows_cleared, "locked"),
                GameEvent::RowsCleared(rows) => {
                    info!(rows, score = session.score(), "rows cleared")
                }
                GameEvent::GameOver { score } => {
                    info!(score, seed, "game over");
                    game_over_at = Some(now);
                }
            }
        }

        if session.quit_requested() {
            info!(score = session.score(), "quit");
            return Ok(());
        }
    }
}

/// Pause state once the queued intents have been applied
fn paused_after(paused: bool, queued: &[Intent]) -> bool {
    let toggles = queued
        .iter()
        .filter(|intent| **intent == Intent::PauseToggle)
        .count();
    paused != (toggles % 2 == 1)
}
