use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use nimbot::{
    Action, AgentConfig, GameError, PolicyBot, QLearningAgent, RandomBot, StateKey, Trainer,
    TrainingConfig, evaluate, train,
};

fn trainer_on(piles: &[usize], seed: u64) -> Trainer<StdRng> {
    let config = TrainingConfig {
        initial_piles: piles.to_vec(),
        seed,
        ..TrainingConfig::default()
    };
    Trainer::new(config, AgentConfig::default()).expect("valid config")
}

#[test]
fn learns_to_leave_the_last_object_to_the_opponent() -> Result<(), GameError> {
    let agent = trainer_on(&[2], 11).train(300)?;
    let state = StateKey::from(vec![2]);
    assert_eq!(agent.greedy_actions(&state), vec![Action::new(0, 1)]);
    assert!(agent.value(&state, Action::new(0, 2)) < 0.0);
    Ok(())
}

#[test]
fn learns_the_single_winning_reply_in_a_small_endgame() -> Result<(), GameError> {
    // From [1, 2] only emptying the second pile wins.
    let agent = trainer_on(&[1, 2], 12).train(2_000)?;
    let state = StateKey::from(vec![1, 2]);
    assert_eq!(agent.greedy_actions(&state), vec![Action::new(1, 2)]);
    Ok(())
}

#[test]
fn training_is_reproducible_for_a_seed() -> Result<(), GameError> {
    let a = trainer_on(&[1, 3, 5], 99).train(500)?;
    let b = trainer_on(&[1, 3, 5], 99).train(500)?;
    assert_eq!(a.len(), b.len());
    for ((state, action), value) in a.table().iter() {
        assert_eq!(b.value(state, *action), *value);
    }
    Ok(())
}

#[test]
fn value_table_only_grows() -> Result<(), GameError> {
    let mut trainer = trainer_on(&[1, 3, 5, 7], 5);
    let mut agent = QLearningAgent::default();
    let mut previous = 0;
    for _ in 0..5 {
        let summary = trainer.train_agent(&mut agent, 100)?;
        assert_eq!(summary.episodes, 100);
        assert!(summary.moves >= 100 * 4, "every game needs at least four moves");
        assert!(summary.table_size >= previous);
        previous = summary.table_size;
    }
    Ok(())
}

#[test]
fn estimates_never_exceed_zero() -> Result<(), GameError> {
    // The only reward is -1 for taking the last object.
    let agent = trainer_on(&[1, 3, 5, 7], 6).train(1_000)?;
    for (_, &value) in agent.table().iter() {
        assert!((-1.0..=0.0).contains(&value), "estimate {value} out of range");
    }
    Ok(())
}

#[test]
fn default_training_entry_point_returns_a_usable_agent() -> Result<(), GameError> {
    let agent = train(200)?;
    assert!(!agent.is_empty());
    assert_eq!(agent.config(), AgentConfig::default());
    Ok(())
}

#[test]
fn trained_agent_beats_random_play() -> Result<(), GameError> {
    let agent = trainer_on(&[1, 3, 5, 7], 2024).train(10_000)?;
    let mut challenger = PolicyBot::new(Arc::new(agent), StdRng::seed_from_u64(7));
    let mut random = RandomBot::new(StdRng::seed_from_u64(8));
    let result = evaluate(&mut challenger, &mut random, 400, &[1, 3, 5, 7])?;
    // Random against random sits near 50%.
    assert!(
        result.rate() > 0.65,
        "trained agent won only {}/{}",
        result.wins,
        result.games
    );

    let mut baseline = RandomBot::new(StdRng::seed_from_u64(9));
    let mut other = RandomBot::new(StdRng::seed_from_u64(10));
    let random_vs_random = evaluate(&mut baseline, &mut other, 400, &[1, 3, 5, 7])?;
    assert!(result.rate() > random_vs_random.rate());
    Ok(())
}
