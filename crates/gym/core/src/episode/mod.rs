//! Episode controller exposing the `start` / `step` contract.
//!
//! [`Episode`] owns one session at a time. `start` replaces the session
//! wholesale; `step` is the only operation that mutates simulator state. Once
//! the run is decided (or the simulator stalls) every later `step` returns the
//! same terminal transition with zero reward and touches nothing.
mod info;

pub use info::{EpisodeStatus, Observation, Session, StepInfo, Transition};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::config::EnvConfig;
use crate::error::EnvError;
use crate::machine::{GameSnapshot, StateMachine, StepOutcome};
use crate::reward::RewardShaper;
use crate::sim::{ObservationEncoder, OverworldContext, Simulator};
use crate::space::{ActionSpace, ObservationSpace};

type Machine<S> = StateMachine<<S as Simulator>::Overworld, <S as Simulator>::Battle>;

/// State owned by a started session.
struct Run<S: Simulator> {
    session: Session,
    machine: Machine<S>,
    shaper: RewardShaper,
    status: EpisodeStatus,
    observation: Observation,
    steps: u64,
}

impl<S: Simulator> Run<S> {
    fn info(&self) -> StepInfo {
        let snapshot = self.machine.snapshot();
        let mask = self.machine.catalog().mask();

        StepInfo {
            screen: snapshot.screen.to_string(),
            action_mask: mask,
            available_actions_count: mask.available_count(),
            floor: snapshot.floor,
            hp: snapshot.hp,
            max_hp: snapshot.max_hp,
            gold: snapshot.gold,
            seed: self.machine.overworld().seed(),
        }
    }

    fn terminal_transition(&self) -> Transition {
        Transition {
            observation: self.observation.clone(),
            reward: 0.0,
            terminated: true,
            truncated: false,
            info: self.info(),
        }
    }
}

/// RL environment over a [`Simulator`] and its [`ObservationEncoder`].
///
/// One `Episode` serves one episode at a time and is not shared between
/// threads; run parallel episodes with one `Episode` each.
pub struct Episode<S, E>
where
    S: Simulator,
    E: ObservationEncoder<S::Overworld, S::Battle>,
{
    simulator: S,
    encoder: E,
    config: EnvConfig,
    observation_space: ObservationSpace,
    action_space: ActionSpace,
    seed_rng: StdRng,
    run: Option<Run<S>>,
}

impl<S, E> Episode<S, E>
where
    S: Simulator,
    E: ObservationEncoder<S::Overworld, S::Battle>,
{
    /// Builds the environment and declares its observation space.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::EmptyObservationSpace`] if the encoder declares no features.
    pub fn new(simulator: S, encoder: E, config: EnvConfig) -> Result<Self, EnvError> {
        let maximums = encoder.observation_maximums();
        if maximums.is_empty() {
            return Err(EnvError::EmptyObservationSpace);
        }

        let seed_rng = match config.seed_stream {
            Some(stream) => StdRng::seed_from_u64(stream),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            simulator,
            encoder,
            observation_space: ObservationSpace::new(maximums),
            action_space: ActionSpace::Discrete(EnvConfig::MAX_ACTIONS),
            config,
            seed_rng,
            run: None,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn observation_space(&self) -> &ObservationSpace {
        &self.observation_space
    }

    pub fn action_space(&self) -> ActionSpace {
        self.action_space
    }

    /// Session of the current episode, if one was started.
    pub fn session(&self) -> Option<&Session> {
        self.run.as_ref().map(|run| &run.session)
    }

    pub fn status(&self) -> Option<EpisodeStatus> {
        self.run.as_ref().map(|run| run.status)
    }

    /// Number of mutating steps taken in the current episode.
    pub fn steps(&self) -> u64 {
        self.run.as_ref().map_or(0, |run| run.steps)
    }

    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.run.as_ref().map(|run| run.machine.snapshot())
    }

    pub fn machine(&self) -> Option<&Machine<S>> {
        self.run.as_ref().map(|run| &run.machine)
    }

    /// Starts a new episode, discarding any previous session.
    ///
    /// Without a seed, one is drawn uniformly from `[0, SEED_UPPER_BOUND)`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Simulator`] if the simulator cannot create the run,
    /// or [`EnvError::ObservationSize`] if the encoder breaks its declared shape.
    pub fn start(&mut self, seed: Option<u64>) -> Result<(Observation, StepInfo), EnvError> {
        self.run = None;

        let seed =
            seed.unwrap_or_else(|| self.seed_rng.gen_range(0..EnvConfig::SEED_UPPER_BOUND));
        let session = Session {
            character: self.config.character,
            ascension: self.config.ascension,
            seed,
        };

        let overworld =
            self.simulator
                .create_overworld(session.character, session.seed, session.ascension)?;
        let machine = StateMachine::new(overworld);
        let observation = encode(&self.encoder, &self.observation_space, &machine)?;

        let snapshot = machine.snapshot();
        let status = if snapshot.outcome.is_decided() {
            EpisodeStatus::Finished(snapshot.outcome)
        } else {
            EpisodeStatus::Running
        };

        debug!(
            seed,
            character = %session.character,
            ascension = session.ascension,
            floor = snapshot.floor,
            hp = snapshot.hp,
            "episode started"
        );

        let run = Run {
            session,
            machine,
            shaper: RewardShaper::new(self.config.reward, snapshot.reward_sample()),
            status,
            observation: observation.clone(),
            steps: 0,
        };
        let info = run.info();
        self.run = Some(run);

        Ok((observation, info))
    }

    /// Advances the episode by one action index.
    ///
    /// Out-of-range indices execute the first legal action and cost the
    /// invalid-action penalty. A finished or stalled episode returns its
    /// terminal transition with zero reward.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotStarted`] before the first `start`.
    pub fn step(&mut self, action_index: usize) -> Result<Transition, EnvError> {
        let run = self.run.as_mut().ok_or(EnvError::NotStarted)?;
        if run.status.is_terminal() {
            return Ok(run.terminal_transition());
        }

        let (substituted, switch) = match run.machine.advance(action_index)? {
            StepOutcome::Finished => {
                run.status = EpisodeStatus::Finished(run.machine.overworld().outcome());
                return Ok(run.terminal_transition());
            }
            StepOutcome::Stalled => {
                warn!(
                    seed = run.session.seed,
                    step = run.steps,
                    screen = %run.machine.screen(),
                    "no legal actions while the run is undecided, ending episode"
                );
                run.status = EpisodeStatus::Stalled;
                return Ok(run.terminal_transition());
            }
            StepOutcome::Executed {
                substituted,
                switch,
                ..
            } => (substituted, switch),
        };

        run.steps += 1;
        let snapshot = run.machine.snapshot();
        let reward = run.shaper.observe(
            snapshot.reward_sample(),
            switch.map(|switch| switch.outgoing_hp()),
            !substituted,
        );
        run.observation = encode(&self.encoder, &self.observation_space, &run.machine)?;

        if snapshot.outcome.is_decided() {
            run.status = EpisodeStatus::Finished(snapshot.outcome);
            info!(
                seed = run.session.seed,
                steps = run.steps,
                floor = snapshot.floor,
                outcome = %snapshot.outcome,
                "episode finished"
            );
        }

        trace!(
            step = run.steps,
            action_index,
            substituted,
            floor = reward.floor,
            hp = reward.hp,
            terminal = reward.terminal,
            invalid = reward.invalid_action,
            "step reward"
        );

        Ok(Transition {
            observation: run.observation.clone(),
            reward: reward.total(),
            terminated: run.status.is_terminal(),
            truncated: false,
            info: run.info(),
        })
    }
}

fn encode<O, B, E>(
    encoder: &E,
    space: &ObservationSpace,
    machine: &StateMachine<O, B>,
) -> Result<Observation, EnvError>
where
    O: crate::sim::OverworldContext,
    B: crate::sim::BattleContext<Overworld = O>,
    E: ObservationEncoder<O, B>,
{
    let observation = encoder.observation(machine.overworld(), machine.battle());
    if observation.len() != space.len() {
        return Err(EnvError::ObservationSize {
            expected: space.len(),
            actual: observation.len(),
        });
    }
    Ok(observation)
}
