use clap::Parser;
use stackris_engine::engine::PieceBag;

use crate::{app::AutoPlayApp, tui};

/// Watch the engine play itself in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Frames per second the session is driven at
    #[clap(long, default_value_t = 60)]
    fps: u64,
    /// Seed for the piece randomizer; drawn from the OS when omitted
    #[clap(long)]
    seed: Option<u64>,
    /// Start in turbo mode
    #[clap(long, default_value_t = false)]
    turbo: bool,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    anyhow::ensure!(args.fps > 0, "--fps must be at least 1");

    let bag = match args.seed {
        Some(seed) => PieceBag::with_seed(seed),
        None => PieceBag::new(),
    };
    let mut app = AutoPlayApp::new(args.fps, bag, args.turbo);
    tui::run(&mut app, args.fps)
}
