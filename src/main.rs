use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead, Write};

use yield_or_die::simulation::{ControlType, PlayerMove, SimWorld};

#[derive(Parser)]
#[command(name = "yield_or_die")]
#[command(about = "Learn who has right-of-way at four-way intersections")]
struct Cli {
    /// Read each move (stop/go) from stdin instead of playing automatically
    #[arg(long)]
    interactive: bool,

    /// Number of rounds to play
    #[arg(long, default_value = "10")]
    rounds: u32,

    /// Seed for reproducible intersections
    #[arg(long)]
    seed: Option<u64>,

    /// Only generate this kind of intersection (uncontrolled, yield-sign-only, controlled)
    #[arg(long)]
    control: Option<ControlType>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut world = SimWorld::new_with_options(cli.seed, cli.control)?;

    if cli.interactive {
        run_interactive(&mut world, cli.rounds)?;
    } else {
        run_headless(&mut world, cli.rounds)?;
    }

    info!("=== GAME COMPLETE ===");
    println!("=== Final Score ===");
    println!("{}", world.game_state.summary());
    Ok(())
}

/// Play every round with a simulated player that picks at random
fn run_headless(world: &mut SimWorld, rounds: u32) -> Result<()> {
    println!("Playing {} rounds in headless mode...", rounds);
    println!();

    for round in 1..=rounds {
        println!("--- Round {} ---", round);
        world.draw_map();
        world.print_summary()?;

        let player_move = world.random_move();
        let outcome = world.play(player_move)?;
        println!("Simulated player chose to {}.", player_move);
        println!("{}", outcome.feedback);
        println!();
    }
    Ok(())
}

/// Ask the player for every move on stdin
fn run_interactive(world: &mut SimWorld, rounds: u32) -> Result<()> {
    println!("You are the car coming from behind (bottom of the map).");
    println!("Cars show their signal: S straight, L left, R right. '*' marks priority roads.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for round in 1..=rounds {
        println!("--- Round {} ---", round);
        world.draw_map();
        world.print_scene();

        let player_move = loop {
            print!("Stop or go? ");
            io::stdout().flush().context("Failed to flush stdout")?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read from stdin")?,
                None => return Ok(()),
            };
            match line.parse::<PlayerMove>() {
                Ok(player_move) => break player_move,
                Err(e) => warn!("{}", e),
            }
        };

        let outcome = world.play(player_move)?;
        println!("{}", outcome.feedback);
        println!();
    }
    Ok(())
}
