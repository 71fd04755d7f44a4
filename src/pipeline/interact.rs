//! Episode driving loop for a tabular agent and an environment

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    ports::{EpisodeReport, Environment, Observer},
    tabular::TabularAgent,
};

/// Interaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractConfig {
    /// Number of episodes to run
    pub num_episodes: usize,

    /// Number of most recent episode scores averaged together
    pub window: usize,

    /// Cut an episode short after this many steps
    pub max_steps_per_episode: Option<usize>,

    /// Stop once the best window average reaches this value
    pub solve_threshold: Option<f64>,
}

impl Default for InteractConfig {
    fn default() -> Self {
        Self {
            num_episodes: 20_000,
            window: 100,
            max_steps_per_episode: None,
            solve_threshold: None,
        }
    }
}

/// Result of an interaction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractResult {
    /// Episodes actually played
    pub episodes: usize,

    /// Window average recorded after every episode once the window is full
    pub avg_rewards: Vec<f64>,

    /// Highest window average seen
    pub best_avg_reward: Option<f64>,

    /// Agent's exploration rate at the end of the run
    pub final_epsilon: f64,

    /// Number of states in the agent's Q-table at the end of the run
    pub states_seen: usize,

    /// Whether the run stopped because it reached the solve threshold
    pub solved: bool,
}

/// Drives a [`TabularAgent`] through episodes of an [`Environment`]
pub struct Interaction {
    config: InteractConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Interaction {
    /// Create a new interaction driver
    pub fn new(config: InteractConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the run
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &InteractConfig {
        &self.config
    }

    /// Run every configured episode, or until the solve threshold is met
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a zero window,
    /// [`Error::ActionCountMismatch`] if the environment and the agent
    /// disagree on the number of actions, and any error raised by the
    /// environment or an observer.
    pub fn run<E>(
        &mut self,
        env: &mut E,
        agent: &mut TabularAgent<E::State>,
    ) -> Result<InteractResult>
    where
        E: Environment,
    {
        if self.config.window == 0 {
            return Err(Error::InvalidConfiguration {
                message: "window must be at least 1".to_string(),
            });
        }
        if env.num_actions() != agent.num_actions() {
            return Err(Error::ActionCountMismatch {
                expected: agent.num_actions(),
                got: env.num_actions(),
            });
        }

        info!(
            episodes = self.config.num_episodes,
            window = self.config.window,
            "starting interaction"
        );
        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut window: VecDeque<f64> = VecDeque::with_capacity(self.config.window);
        let mut avg_rewards = Vec::new();
        let mut best_avg_reward: Option<f64> = None;
        let mut episodes = 0;
        let mut solved = false;

        for episode in 0..self.config.num_episodes {
            let (score, steps) = self.play_episode(episode, env, agent)?;
            episodes += 1;

            if window.len() == self.config.window {
                window.pop_front();
            }
            window.push_back(score);

            let window_average = if window.len() == self.config.window {
                let average = window.iter().sum::<f64>() / window.len() as f64;
                avg_rewards.push(average);
                if best_avg_reward.is_none_or(|best| average > best) {
                    best_avg_reward = Some(average);
                }
                Some(average)
            } else {
                None
            };

            let report = EpisodeReport {
                episode,
                score,
                steps,
                window_average,
                best_average: best_avg_reward,
                epsilon: agent.epsilon(),
            };
            for observer in &mut self.observers {
                observer.on_episode_end(&report)?;
            }

            if let (Some(threshold), Some(best)) = (self.config.solve_threshold, best_avg_reward) {
                if best >= threshold {
                    info!(episode, best, "environment solved");
                    solved = true;
                    break;
                }
            }
        }

        let result = InteractResult {
            episodes,
            avg_rewards,
            best_avg_reward,
            final_epsilon: agent.epsilon(),
            states_seen: agent.q_table().len(),
            solved,
        };

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }
        info!(
            episodes = result.episodes,
            best_avg_reward = ?result.best_avg_reward,
            states = result.states_seen,
            "interaction finished"
        );

        Ok(result)
    }

    fn play_episode<E>(
        &self,
        episode: usize,
        env: &mut E,
        agent: &mut TabularAgent<E::State>,
    ) -> Result<(f64, usize)>
    where
        E: Environment,
    {
        let mut state = env.reset()?;
        let mut score = 0.0;
        let mut steps = 0;

        loop {
            let action = agent.select_action(&state);
            let outcome = env.step(action)?;
            agent.step(state, action, outcome.reward, &outcome.next_state, outcome.done);

            score += outcome.reward;
            steps += 1;
            state = outcome.next_state;

            if outcome.done {
                break;
            }
            if self
                .config
                .max_steps_per_episode
                .is_some_and(|limit| steps >= limit)
            {
                warn!(episode, steps, "episode cut short at step limit");
                break;
            }
        }

        Ok((score, steps))
    }
}
