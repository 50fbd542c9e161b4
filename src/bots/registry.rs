use std::error::Error;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::ml::{AgentConfig, Trainer, TrainingConfig};
use crate::{HeuristicBot, HumanBot, PolicyBot, RandomBot};

/// Episodes used for `qlearn` specs that do not name a count.
pub const DEFAULT_SPEC_EPISODES: usize = 10_000;

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - heuristic
/// - qlearn[:episodes] (trains a fresh agent on `initial` first)
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
    initial: &[usize],
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let derived_seed = seed ^ ((index as u64 + 1) * 0x9E37_79B9);
    match label_for_spec(spec).as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string());
            let name = name.unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(name)))
        }
        "random" => {
            let custom_seed = spec
                .split_once(':')
                .and_then(|(_, value)| value.parse::<u64>().ok())
                .unwrap_or(derived_seed);
            Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
        }
        "heuristic" => Ok(Box::new(HeuristicBot::new())),
        "qlearn" => {
            let episodes = match spec.split_once(':') {
                Some((_, value)) => value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| format!("invalid episode count in spec: {spec}"))?,
                None => DEFAULT_SPEC_EPISODES,
            };
            let config = TrainingConfig {
                initial_piles: initial.to_vec(),
                seed: derived_seed,
                ..TrainingConfig::default()
            };
            log::info!("training agent for seat {index} ({episodes} episodes)");
            let agent = Trainer::new(config, AgentConfig::default())?.train(episodes)?;
            Ok(Box::new(PolicyBot::new(
                Arc::new(agent),
                StdRng::seed_from_u64(derived_seed.rotate_left(17)),
            )))
        }
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn labels_drop_arguments_and_case() {
        assert_eq!(label_for_spec("Random:42"), "random");
        assert_eq!(label_for_spec(" qlearn:500"), "qlearn");
        assert_eq!(label_for_spec("heuristic"), "heuristic");
    }

    #[test]
    fn unknown_specs_are_rejected() {
        assert!(create_bot_from_spec("minimax", 0, 1, &[1, 3, 5, 7]).is_err());
        assert!(create_bot_from_spec("qlearn:lots", 0, 1, &[1, 3, 5, 7]).is_err());
    }

    #[test]
    fn built_bots_pick_legal_moves() {
        let game = GameState::standard();
        let legal = game.legal_actions();
        for spec in ["random:7", "heuristic", "qlearn:50"] {
            let mut bot = create_bot_from_spec(spec, 1, 3, game.piles()).expect("known spec");
            let action = bot.select_action(&game, &legal).expect("legal move");
            assert!(legal.contains(&action), "{spec} chose {action}");
        }
    }
}
