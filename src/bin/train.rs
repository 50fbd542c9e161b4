use std::error::Error;
use std::process;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nimbot::ml::{DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE, DEFAULT_TRAINING_SEED};
use nimbot::{
    AgentConfig, GameState, HeuristicBot, PolicyBot, QLearningAgent, RandomBot, Trainer,
    TrainingConfig, describe_action, evaluate,
};

#[derive(Parser, Debug)]
#[command(about = "Train a misère Nim agent by self-play Q-learning", version)]
struct TrainArgs {
    /// Number of self-play episodes.
    #[arg(long, default_value_t = 10_000)]
    episodes: usize,
    /// Step size of the temporal-difference update, in (0, 1].
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,
    /// Exploration probability used while generating experience, in (0, 1].
    #[arg(long, default_value_t = DEFAULT_EXPLORATION_RATE)]
    exploration: f64,
    /// Starting piles, comma separated.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_value = "1,3,5,7")]
    piles: Vec<i64>,
    /// Master seed controlling reproducibility.
    #[arg(long, default_value_t = DEFAULT_TRAINING_SEED)]
    seed: u64,
    /// Evaluation games against each reference opponent (0 skips evaluation).
    #[arg(long, default_value_t = 1000)]
    eval_games: usize,
    /// Log a progress line every this many episodes.
    #[arg(long, default_value_t = 1000)]
    log_every: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run(TrainArgs::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: TrainArgs) -> Result<(), Box<dyn Error>> {
    let initial = GameState::from_counts(&args.piles)?;
    let config = TrainingConfig {
        initial_piles: initial.piles().to_vec(),
        exploration_rate: args.exploration,
        seed: args.seed,
        log_every: args.log_every,
    };
    let agent_config = AgentConfig {
        learning_rate: args.learning_rate,
        ..AgentConfig::default()
    };
    let mut trainer = Trainer::new(config, agent_config)?;
    let mut agent = QLearningAgent::new(agent_config)?;
    let summary = trainer.train_agent(&mut agent, args.episodes)?;

    println!("Trained on {:?}:", initial.piles());
    println!("  episodes:          {}", summary.episodes);
    println!("  moves:             {}", summary.moves);
    println!(
        "  first player wins: {} ({:.2}%)",
        summary.first_player_wins,
        percent(summary.first_player_wins, summary.episodes)
    );
    println!("  value estimates:   {}", summary.table_size);

    let greedy = agent.greedy_actions(&initial.key());
    let described: Vec<String> = greedy.iter().map(describe_action).collect();
    println!("Preferred opening: {}", described.join(" | "));

    if args.eval_games == 0 {
        return Ok(());
    }
    let mut challenger = PolicyBot::new(Arc::new(agent), StdRng::seed_from_u64(args.seed ^ 1));

    let mut random = RandomBot::new(StdRng::seed_from_u64(args.seed.rotate_left(32)));
    let vs_random = evaluate(&mut challenger, &mut random, args.eval_games, initial.piles())?;
    let mut heuristic = HeuristicBot::new();
    let vs_heuristic = evaluate(&mut challenger, &mut heuristic, args.eval_games, initial.piles())?;

    println!("Evaluation ({} games each, alternating seats):", args.eval_games);
    for (label, result) in [("random", vs_random), ("heuristic", vs_heuristic)] {
        println!(
            "  vs {label:<10} {}/{}  ({:.2}% ± {:.2})",
            result.wins,
            result.games,
            result.rate() * 100.0,
            result.standard_error() * 100.0
        );
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
