mod support;

use gym_core::{
    CharacterClass, EnvConfig, EnvError, Episode, EpisodeStatus, GameOutcome, GymError, Phase,
};
use support::{TowerEncoder, TowerSimulator};

const FIGHT: usize = 0;
const CLIMB: usize = 1;
const REST: usize = 2;
const STRIKE: usize = 0;

fn episode(simulator: TowerSimulator) -> Episode<TowerSimulator, TowerEncoder> {
    Episode::new(simulator, TowerEncoder::default(), EnvConfig::default())
        .expect("encoder declares features")
}

fn mask_sum(info: &gym_core::StepInfo) -> usize {
    info.action_mask.iter().map(usize::from).sum()
}

#[test]
fn step_before_start_is_rejected() {
    let mut env = episode(TowerSimulator::default());
    let err = env.step(0).unwrap_err();
    assert!(matches!(err, EnvError::NotStarted));
    assert_eq!(err.error_code(), "ENV_NOT_STARTED");
}

#[test]
fn start_reports_initial_info() {
    let mut env = episode(TowerSimulator::default());
    let (observation, info) = env.start(Some(42)).unwrap();

    assert_eq!(observation.len(), env.observation_space().len());
    assert_eq!(info.floor, 0);
    assert_eq!(info.hp, 50);
    assert_eq!(info.max_hp, 50);
    assert_eq!(info.gold, 99);
    assert_eq!(info.seed, 42);
    assert_eq!(info.screen, "MAP_SCREEN");
    assert_eq!(info.available_actions_count, 3);
    assert_eq!(mask_sum(&info), 3);
    assert_eq!(env.status(), Some(EpisodeStatus::Running));
    assert_eq!(env.session().unwrap().seed, 42);
}

#[test]
fn unseeded_start_draws_from_seed_stream() {
    let config = EnvConfig::default().with_seed_stream(7);
    let mut first =
        Episode::new(TowerSimulator::default(), TowerEncoder::default(), config.clone()).unwrap();
    let mut second =
        Episode::new(TowerSimulator::default(), TowerEncoder::default(), config).unwrap();

    let (_, a) = first.start(None).unwrap();
    let (_, b) = second.start(None).unwrap();

    assert_eq!(a.seed, b.seed);
    assert!(a.seed < EnvConfig::SEED_UPPER_BOUND);
}

#[test]
fn invalid_index_runs_first_action_with_penalty() {
    let mut valid = episode(TowerSimulator::default());
    let mut invalid = episode(TowerSimulator::default());
    valid.start(Some(42)).unwrap();
    invalid.start(Some(42)).unwrap();

    let expected = valid.step(FIGHT).unwrap();
    let penalized = invalid.step(200).unwrap();

    assert_eq!(expected.reward - penalized.reward, 1.0);
    assert_eq!(penalized.reward, -1.0);
    assert!(!penalized.terminated);
    assert!(!penalized.truncated);
    assert_eq!(penalized.observation, expected.observation);
    assert_eq!(penalized.info.screen, "BATTLE");
    assert_eq!(invalid.snapshot(), valid.snapshot());
}

#[test]
fn index_equal_to_available_count_is_invalid() {
    let mut env = episode(TowerSimulator::default());
    let (_, info) = env.start(Some(1)).unwrap();

    let transition = env.step(info.available_actions_count).unwrap();
    assert_eq!(transition.reward, -1.0);
    assert_eq!(transition.info.screen, "BATTLE");
}

#[test]
fn hp_stays_continuous_across_battle_boundary() {
    let mut env = episode(TowerSimulator {
        heal_on_exit: 6,
        ..TowerSimulator::default()
    });
    env.start(Some(3)).unwrap();

    let enter = env.step(FIGHT).unwrap();
    assert_eq!(enter.reward, 0.0);
    assert_eq!(enter.info.hp, 50);
    assert_eq!(enter.info.screen, "BATTLE");
    assert_eq!(env.machine().unwrap().phase(), Phase::Battle);

    let hit = env.step(STRIKE).unwrap();
    assert_eq!(hit.reward, -4.0);
    assert_eq!(hit.info.hp, 46);

    // Enemy falls; the battle ends at 42 HP and the overworld heals to 48.
    let win = env.step(STRIKE).unwrap();
    assert_eq!(win.reward, -4.0);
    assert_eq!(win.info.hp, 48);
    assert_eq!(win.info.screen, "MAP_SCREEN");
    assert_eq!(win.info.gold, 109);
    assert_eq!(env.machine().unwrap().phase(), Phase::Overworld);

    // Resting is measured from the post-battle overworld HP.
    let rest = env.step(REST).unwrap();
    assert_eq!(rest.reward, 2.0);
    assert_eq!(rest.info.hp, 50);
}

#[test]
fn battle_entry_hp_becomes_the_new_baseline() {
    let mut env = episode(TowerSimulator {
        battle_entry_hp: Some(30),
        ..TowerSimulator::default()
    });
    env.start(Some(3)).unwrap();

    // The duel opens at 30 HP; the jump from 50 is not scored.
    let enter = env.step(FIGHT).unwrap();
    assert_eq!(enter.reward, 0.0);
    assert_eq!(enter.info.hp, 30);
    assert_eq!(enter.info.screen, "BATTLE");

    let hit = env.step(STRIKE).unwrap();
    assert_eq!(hit.reward, -4.0);
    assert_eq!(hit.info.hp, 26);
}

#[test]
fn battle_observations_keep_declared_length() {
    let mut env = episode(TowerSimulator::default());
    let (initial, _) = env.start(Some(5)).unwrap();
    let in_battle = env.step(FIGHT).unwrap();

    assert_eq!(initial.len(), 6);
    assert_eq!(in_battle.observation.len(), 6);
    assert!(env.observation_space().contains(&in_battle.observation));
    assert_eq!(in_battle.info.available_actions_count, 2);
}

#[test]
fn victory_pays_bonus_then_short_circuits() {
    let mut env = episode(TowerSimulator::default());
    env.start(Some(9)).unwrap();

    assert_eq!(env.step(CLIMB).unwrap().reward, 10.0);
    assert_eq!(env.step(CLIMB).unwrap().reward, 10.0);

    let last = env.step(CLIMB).unwrap();
    assert_eq!(last.reward, 1000.0 + 10.0);
    assert!(last.terminated);
    assert!(!last.truncated);
    assert_eq!(
        env.status(),
        Some(EpisodeStatus::Finished(GameOutcome::PlayerVictory))
    );

    let steps = env.steps();
    for index in [0, 1, 127] {
        let after = env.step(index).unwrap();
        assert_eq!(after.reward, 0.0);
        assert!(after.terminated);
        assert!(!after.truncated);
        assert_eq!(after.observation, last.observation);
        assert_eq!(after.info, last.info);
    }
    assert_eq!(env.steps(), steps);
}

#[test]
fn loss_applies_penalty_with_hp_delta() {
    let mut env = episode(TowerSimulator {
        damage_taken: 30,
        ..TowerSimulator::default()
    });
    env.start(Some(11)).unwrap();

    env.step(FIGHT).unwrap();
    assert_eq!(env.step(STRIKE).unwrap().reward, -30.0);

    let last = env.step(STRIKE).unwrap();
    assert_eq!(last.reward, -20.0 - 100.0);
    assert!(last.terminated);
    assert_eq!(last.info.hp, 0);
    assert_eq!(
        env.status(),
        Some(EpisodeStatus::Finished(GameOutcome::PlayerLoss))
    );
}

#[test]
fn empty_catalog_stalls_the_episode() {
    let mut env = episode(TowerSimulator {
        stall_floor: Some(1),
        ..TowerSimulator::default()
    });
    env.start(Some(13)).unwrap();

    let climbed = env.step(CLIMB).unwrap();
    assert!(!climbed.terminated);
    assert_eq!(climbed.info.available_actions_count, 0);
    assert!(climbed.info.action_mask.is_empty());

    let stalled = env.step(0).unwrap();
    assert_eq!(stalled.reward, 0.0);
    assert!(stalled.terminated);
    assert_eq!(stalled.observation, climbed.observation);
    assert_eq!(env.status(), Some(EpisodeStatus::Stalled));

    let again = env.step(0).unwrap();
    assert!(again.terminated);
    assert_eq!(again.reward, 0.0);
}

#[test]
fn mask_is_clamped_to_action_space() {
    let mut env = episode(TowerSimulator {
        extra_actions: 200,
        ..TowerSimulator::default()
    });
    let (_, info) = env.start(Some(17)).unwrap();

    assert_eq!(info.available_actions_count, EnvConfig::MAX_ACTIONS);
    assert_eq!(mask_sum(&info), EnvConfig::MAX_ACTIONS);
    assert_eq!(info.action_mask.to_vec().len(), EnvConfig::MAX_ACTIONS);

    assert_eq!(env.step(127).unwrap().reward, 0.0);
    assert_eq!(env.step(128).unwrap().reward, -1.0);
}

#[test]
fn simulator_failure_is_fatal_at_start() {
    let mut env = episode(TowerSimulator {
        unavailable: true,
        ..TowerSimulator::default()
    });

    let err = env.start(Some(1)).unwrap_err();
    assert!(matches!(err, EnvError::Simulator(_)));
    assert!(err.severity().is_fatal());
    assert!(matches!(env.step(0), Err(EnvError::NotStarted)));
}

#[test]
fn encoder_contract_violations_are_fatal() {
    let empty = TowerEncoder {
        empty: true,
        ..TowerEncoder::default()
    };
    let err = Episode::new(TowerSimulator::default(), empty, EnvConfig::default())
        .err()
        .expect("empty observation space is rejected");
    assert!(matches!(err, EnvError::EmptyObservationSpace));

    let truncated = TowerEncoder {
        truncate: true,
        ..TowerEncoder::default()
    };
    let mut env = Episode::new(TowerSimulator::default(), truncated, EnvConfig::default()).unwrap();
    let err = env.start(Some(1)).unwrap_err();
    assert!(matches!(
        err,
        EnvError::ObservationSize {
            expected: 6,
            actual: 5
        }
    ));
}

#[test]
fn restart_discards_previous_session() {
    let mut env = episode(TowerSimulator::default());
    env.start(Some(1)).unwrap();
    env.step(FIGHT).unwrap();
    env.step(STRIKE).unwrap();

    let (_, info) = env.start(Some(2)).unwrap();
    assert_eq!(info.screen, "MAP_SCREEN");
    assert_eq!(info.hp, 50);
    assert_eq!(info.seed, 2);
    assert_eq!(env.steps(), 0);
    assert_eq!(env.status(), Some(EpisodeStatus::Running));
}

#[test]
fn session_carries_character_and_ascension() {
    let config = EnvConfig::new(CharacterClass::Silent, 5);
    let mut env = Episode::new(TowerSimulator::default(), TowerEncoder::default(), config).unwrap();
    let (_, info) = env.start(Some(8)).unwrap();

    let session = env.session().unwrap();
    assert_eq!(session.character, CharacterClass::Silent);
    assert_eq!(session.ascension, 5);
    assert_eq!(info.hp, 45);
}

#[test]
fn identical_seeds_and_actions_replay_identically() {
    let actions = [FIGHT, 7, STRIKE, STRIKE, REST, CLIMB, CLIMB, CLIMB, 0];
    let run = || {
        let mut env = episode(TowerSimulator::default());
        env.start(Some(21)).unwrap();
        actions
            .iter()
            .map(|&index| env.step(index).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}
