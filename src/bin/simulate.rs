use std::env;
use std::error::Error;
use std::process;

use nimbot::{Bot, GameState, create_bot_from_spec, describe_action, render_state};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut visualize = false;
    let mut seed = DEFAULT_SEED;
    let mut piles: Vec<i64> = vec![1, 3, 5, 7];
    let mut bot_specs: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visualize" => visualize = true,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--piles" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--piles requires a value".to_string())?;
                piles = value
                    .split(',')
                    .map(|part| part.trim().parse::<i64>())
                    .collect::<Result<Vec<i64>, _>>()
                    .map_err(|_| format!("invalid piles value: {value}"))?;
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => bot_specs.push(other.to_string()),
        }
    }

    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("qlearn")];
    }
    if bot_specs.len() != 2 {
        return Err(format!("expected exactly 2 players, received {}", bot_specs.len()).into());
    }

    let mut game = GameState::from_counts(&piles)?;
    let initial = game.piles().to_vec();
    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(2);
    for (index, spec) in bot_specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, seed, &initial)?);
    }

    println!("Starting Nim with piles {initial:?}. Whoever takes the last object loses.\n");
    while game.winner().is_none() {
        let current = game.player();
        let legal_actions = game.legal_actions();
        if visualize {
            println!("{}", render_state(&game));
        }
        let action = bots[current.index()].select_action(&game, &legal_actions)?;
        println!("{current}: {}", describe_action(&action));
        game.play(action)?;
    }

    if let Some(winner) = game.winner() {
        println!("\nGame finished. Winner: {winner} ({}).", bot_specs[winner.index()]);
    }
    Ok(())
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [BOT BOT]");
    println!("  --visualize           Show the piles before every move");
    println!("  --seed <u64>          Seed for bots and training (default: {DEFAULT_SEED:#x})");
    println!("  --piles <list>        Starting piles, comma separated (default: 1,3,5,7)");
    println!("  --help                Show this help message");
    println!("Bot entries (exactly 2):");
    println!("  human[:name]          Interactive human-controlled player");
    println!("  random[:seed]         Random bot with optional per-bot seed");
    println!("  heuristic             Closed-form misère strategy");
    println!("  qlearn[:episodes]     Agent trained by self-play before the game");
    println!("If no bots are provided, defaults to a human against a trained agent.");
}
