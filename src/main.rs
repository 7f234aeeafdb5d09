use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use neon_snake::config::{Skin, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
use neon_snake::engine::StepOutcome;
use neon_snake::grid::Grid;
use neon_snake::input::{self, GameInput};
use neon_snake::renderer;
use neon_snake::scheduler::TickScheduler;
use neon_snake::score::FileHighScoreStore;
use neon_snake::session::{Phase, Session};
use neon_snake::terminal::{install_panic_hook, TerminalGuard};

/// How long one input poll may block before the loop re-checks the scheduler.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Parser)]
#[command(name = "neon-snake", version, about = "Neon-styled terminal snake")]
struct Cli {
    /// Snake color skin.
    #[arg(long, value_enum, default_value_t = Skin::NeonGreen)]
    skin: Skin,

    /// Play-field width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH, value_parser = clap::value_parser!(u16).range(8..=128))]
    width: u16,

    /// Play-field height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT, value_parser = clap::value_parser!(u16).range(8..=128))]
    height: u16,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    install_panic_hook();

    let store = FileHighScoreStore::at_default_path();
    let mut session = Session::new(
        Grid::new(cli.width, cli.height),
        cli.seed,
        Box::new(store),
    );

    let mut guard = TerminalGuard::enter()?;
    run(&mut guard, &mut session, cli.skin)
}

fn run(guard: &mut TerminalGuard, session: &mut Session, skin: Skin) -> io::Result<()> {
    let mut scheduler = TickScheduler::new(session.tick_interval);

    loop {
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session, skin))?;

        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match input::translate_key(key) {
                    Some(GameInput::Quit) => break,
                    Some(GameInput::Start) => {
                        session.start();
                        let now = Instant::now();
                        scheduler.rearm(session.tick_interval, now);
                        scheduler.start(now);
                    }
                    Some(GameInput::Pause) => {
                        session.toggle_pause();
                        match session.phase {
                            Phase::Running => scheduler.start(Instant::now()),
                            _ => scheduler.stop(),
                        }
                    }
                    Some(GameInput::Direction(direction)) => session.buffer_direction(direction),
                    None => {}
                }
            }
        }

        if scheduler.due(Instant::now()) {
            match session.tick() {
                Some(StepOutcome::Terminated(_)) => scheduler.stop(),
                Some(StepOutcome::Scored(_)) if session.tick_interval != scheduler.interval() => {
                    scheduler.rearm(session.tick_interval, Instant::now());
                }
                _ => {}
            }
        }
    }

    info!("exiting at player request");
    Ok(())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
    info!("neon-snake starting, logging to {}", path.display());
    Ok(())
}
