//! MR. TET terminal runner (default binary).
//!
//! Fixed-timestep loop: poll input until the next tick, feed commands and
//! elapsed time to the engine, persist the score on game over, redraw.
//! Uses crossterm for input and the framebuffer renderer from `mr_tet::term`.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::{info, LevelFilter};

use mr_tet::core::{EngineConfig, GameSnapshot, GameState, SimpleRng, StepOutcome};
use mr_tet::input::{should_quit, InputHandler};
use mr_tet::scores::{now_ms, ScoreHistory, ScoreRecord};
use mr_tet::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use mr_tet::types::{GameCommand, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "mr-tet", version, about = "MR. TET: falling blocks in the terminal")]
struct Args {
    /// Seed for the piece bag. Defaults to the current time.
    #[arg(long)]
    seed: Option<u32>,

    /// JSON engine config (lock_delay_ms, soft_drop_factor, lock_reset).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Score history file.
    #[arg(long, value_name = "PATH", default_value = "mr-tet-scores.json")]
    scores: PathBuf,

    /// Write logs to this file (the terminal is busy drawing the game).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = load_config(args.config.as_ref())?;
    let seed = args.seed.unwrap_or_else(|| now_ms() as u32);
    info!("seed {} config {:?}", seed, config);

    let mut scores = ScoreHistory::open(&args.scores);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, GameState::with_source(SimpleRng::new(seed), config), &mut scores);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn run(term: &mut TerminalRenderer, mut game: GameState, scores: &mut ScoreHistory) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        game.snapshot_into(&mut snapshot);
        let hud = Hud {
            best: scores.best().map(|r| r.score),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = input.handle_key_event(key) {
                        if command == GameCommand::Start {
                            input.reset();
                        }
                        let outcome = game.apply_command(command);
                        record_outcome(outcome, scores);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();

            for command in input.update(TICK_MS) {
                game.apply_command(command);
            }
            game.set_soft_drop(input.soft_drop_held());
            let outcome = game.update(TICK_MS);
            record_outcome(outcome, scores);
        }
    }
}

fn record_outcome(outcome: StepOutcome, scores: &mut ScoreHistory) {
    let Some(record) = outcome.game_over() else {
        return;
    };
    if let Some(rank) = scores.record(ScoreRecord::from_game(&record, now_ms())) {
        info!("score {} ranked #{}", record.score, rank + 1);
    }
}
