use std::io;

use anyhow::Result;
use clap::Parser;
use combat::SeededRng;
use hero::Difficulty;
use terminal_arena::{Console, GameSession, SessionOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "terminal-arena")]
#[command(about = "Turn-based fight against a horde of wolves, dragons and lions")]
#[command(version)]
struct Args {
    /// Difficulty level 1-3 (asked interactively when omitted)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Character name (asked interactively when omitted)
    #[arg(short, long)]
    name: Option<String>,

    /// Seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut rng = SeededRng::new(args.seed.unwrap_or_else(rand::random));
    tracing::info!(seed = rng.seed(), "new game");

    let options = SessionOptions {
        difficulty: args.difficulty,
        name: args.name,
    };
    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut session = GameSession::new(console, options);
    let outcome = session.run(&mut rng)?;
    tracing::info!(%outcome, "game finished");

    Ok(())
}
