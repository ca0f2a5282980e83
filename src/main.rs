//! Terminal 3D block game runner (default binary).
//!
//! Plays in the terminal with crossterm input and the framebuffer renderer, or
//! runs headless for a fixed number of frames and prints the final snapshot.

use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tetris3d::core::{process_game_update, GameState};
use tetris3d::input::{should_quit, InputState, KeyMap};
use tetris3d::settings::Settings;
use tetris3d::term::{
    GameView, OffscreenRenderer, OrbitCamera, OrbitCameraController, Renderer, TerminalRenderer,
};
use tetris3d::types::{Command, FrameInput, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "tetris3d", version, about = "Falling blocks in three dimensions")]
struct Args {
    /// Settings file (TOML): board, timing and key bindings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for block shapes and colors (default: current time)
    #[arg(long)]
    seed: Option<u32>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// off | error | warn | info | debug | trace
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Run this many frames without a terminal and print the final state as JSON
    #[arg(long)]
    headless: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = Settings::load(args.config.as_deref())?;
    let keys = settings.key_map()?;
    let seed = args.seed.unwrap_or_else(seed_from_time);
    let state = GameState::new(&settings.game_config(), seed)?;
    log::info!("starting with seed {seed}");

    if let Some(frames) = args.headless {
        return run_headless(state, frames);
    }

    let mut term = TerminalRenderer::new(GameView::default().with_keys(keys.clone()));
    term.enter()?;

    let result = run(&mut term, state, &keys);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let Ok(level) = LevelFilter::from_str(&args.log_level) else {
        bail!("unknown log level {:?}", args.log_level);
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let config = ConfigBuilder::new().set_thread_level(LevelFilter::Off).build();
    WriteLogger::init(level, config, file).context("installing logger")?;
    Ok(())
}

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
        .unwrap_or(1)
}

fn run_headless(mut state: GameState, frames: u32) -> Result<()> {
    let board = state.board();
    let camera = OrbitCamera::centered_on(board.width(), board.depth(), board.height());
    let dt = TICK_MS as f32 / 1000.0;
    let input = FrameInput::new();

    for _ in 0..frames {
        process_game_update(&mut state, dt, &input, camera.forward());
        if state.game_over() {
            break;
        }
    }

    if log::log_enabled!(log::Level::Debug) {
        let mut renderer = OffscreenRenderer::new(GameView::default(), 80, 26);
        renderer.initialize(&state)?;
        renderer.render(&state, &camera)?;
        log::debug!("final frame:\n{}", renderer.frame().text());
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut state: GameState, keys: &KeyMap) -> Result<()> {
    let board = state.board();
    let mut camera = OrbitCamera::centered_on(board.width(), board.depth(), board.height());
    let controller = OrbitCameraController::default();
    let mut input = InputState::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();

    term.initialize(&state)?;

    loop {
        let frame_start = Instant::now();
        input.begin_frame();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(&key) {
                        return Ok(());
                    }
                    input.handle_key_event(&key, keys);
                }
                Event::Resize(w, h) => term.set_framebuffer_size(w, h),
                _ => {}
            }
        }

        if input.is_key_pressed(Command::Quit) {
            return Ok(());
        }

        let elapsed = frame_start.duration_since(last_frame);
        last_frame = frame_start;
        input.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);

        controller.update(&mut camera, &input);

        if input.is_key_pressed(Command::Pause) && !state.game_over() {
            let paused = state.toggle_paused();
            log::info!("{}", if paused { "paused" } else { "resumed" });
        }

        if !state.paused() {
            process_game_update(
                &mut state,
                elapsed.as_secs_f32(),
                &input.frame_input(),
                camera.forward(),
            );
        }

        term.render(&state, &camera)?;

        if let Some(rest) = tick_duration.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
