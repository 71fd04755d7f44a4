//! Epsilon-greedy tabular agent
//!
//! The agent picks actions epsilon-greedily from its Q-table and learns from
//! one transition at a time. Its TD target blends the uniform average and the
//! maximum of the next state's action-values, weighted by the current
//! exploration rate.

use std::hash::Hash;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    error::Result,
    tabular::{
        config::AgentConfig,
        q_table::{self, QTable},
    },
};

/// Exploration rate every agent starts from
pub const INITIAL_EPSILON: f64 = 1.0;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular agent for discrete-state, discrete-action tasks
///
/// States can be any hashable identifier. Each agent owns its Q-table and
/// its random number generator; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct TabularAgent<S> {
    q_table: QTable<S>,
    config: AgentConfig,
    epsilon: f64,
    rng: StdRng,
}

impl<S> TabularAgent<S>
where
    S: Eq + Hash + Clone,
{
    /// Create an agent for `num_actions` actions with default hyperparameters
    ///
    /// # Panics
    ///
    /// Panics if `num_actions` is zero.
    pub fn new(num_actions: usize) -> Self {
        assert!(num_actions > 0, "an agent needs at least one action");
        Self::build(AgentConfig::new(num_actions))
    }

    /// Create an agent from a validated configuration
    pub fn from_config(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AgentConfig) -> Self {
        debug!(
            num_actions = config.num_actions,
            alpha = config.alpha,
            epsilon_decay = config.epsilon_decay,
            epsilon_min = config.epsilon_min,
            gamma = config.gamma,
            seed = ?config.seed,
            "created tabular agent"
        );
        Self {
            q_table: QTable::new(config.num_actions),
            rng: build_rng(config.seed),
            epsilon: INITIAL_EPSILON,
            config,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
        self
    }

    /// ε-greedy action selection
    ///
    /// Reading the state's row inserts it into the table if it is unseen.
    pub fn select_action(&mut self, state: &S) -> usize {
        let greedy = q_table::greedy_action(self.q_table.row(state));
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: uniform over the whole action set
            self.rng.random_range(0..self.config.num_actions)
        } else {
            greedy
        }
    }

    /// Learn from one transition
    ///
    /// Decays epsilon first, then moves Q(s,a) toward
    /// `reward + γ · next_G` where
    /// `next_G = ε · mean_a' Q(s',a') + (1 - ε) · max_a' Q(s',a')`,
    /// or zero when `done`.
    ///
    /// # Panics
    ///
    /// Panics if `action` is not below the agent's action count.
    pub fn step(&mut self, state: S, action: usize, reward: f64, next_state: &S, done: bool) {
        self.decay_epsilon();

        let next_return = self.expected_next_return(next_state, done);
        let td_target = reward + self.config.gamma * next_return;
        let alpha = self.config.alpha;

        let value = &mut self.q_table.row_mut(&state)[action];
        *value += alpha * (td_target - *value);
    }

    /// Expected return from `next_state` under the current exploration rate
    ///
    /// Does not decay epsilon. The next state's row is only touched when the
    /// transition is not terminal.
    pub fn expected_next_return(&mut self, next_state: &S, done: bool) -> f64 {
        if done {
            return 0.0;
        }
        let row = self.q_table.row(next_state);
        self.epsilon * q_table::mean_value(row) + (1.0 - self.epsilon) * q_table::max_value(row)
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Override the exploration rate, clamped to `[0, 1]`
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    pub fn num_actions(&self) -> usize {
        self.config.num_actions
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable<S> {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable<S> {
        &mut self.q_table
    }

    /// Forget everything learned and start over with the same configuration
    pub fn reset(&mut self) {
        debug!(states = self.q_table.len(), "resetting tabular agent");
        self.q_table.clear();
        self.epsilon = INITIAL_EPSILON;
        self.rng = build_rng(self.config.seed);
    }
}

impl<S> Default for TabularAgent<S>
where
    S: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(AgentConfig::DEFAULT_NUM_ACTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn scenario_agent() -> TabularAgent<&'static str> {
        let config = AgentConfig::new(2)
            .with_alpha(0.01)
            .with_gamma(1.0)
            .with_epsilon_min(0.0)
            .with_seed(5);
        let mut agent = TabularAgent::from_config(config).unwrap();
        agent.q_table_mut().insert("s0", vec![0.0, 0.0]).unwrap();
        agent.q_table_mut().insert("s1", vec![2.0, 4.0]).unwrap();
        agent.set_epsilon(0.0);
        agent
    }

    #[test]
    fn test_fresh_agent() {
        let agent: TabularAgent<u32> = TabularAgent::default();
        assert_eq!(agent.num_actions(), 6);
        assert_eq!(agent.epsilon(), 1.0);
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_select_action_inserts_unseen_state() {
        let mut agent = TabularAgent::new(3).with_seed(1);
        let action = agent.select_action(&"new");
        assert!(action < 3);
        assert_eq!(agent.q_table().get(&"new"), Some([0.0; 3].as_slice()));
    }

    #[test]
    fn test_select_action_greedy_when_epsilon_zero() {
        let mut agent = TabularAgent::new(4).with_seed(2);
        agent.q_table_mut().insert("s", vec![0.1, 0.7, 0.7, 0.3]).unwrap();
        agent.set_epsilon(0.0);
        for _ in 0..50 {
            assert_eq!(agent.select_action(&"s"), 1);
        }
    }

    #[test]
    fn test_select_action_explores_when_epsilon_one() {
        let mut agent = TabularAgent::new(4).with_seed(3);
        agent.q_table_mut().insert("s", vec![9.0, 0.0, 0.0, 0.0]).unwrap();
        let mut seen = [false; 4];
        for _ in 0..400 {
            seen[agent.select_action(&"s")] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "uniform exploration covers {seen:?}");
    }

    #[test]
    fn test_epsilon_decays_per_step_and_clamps() {
        let config = AgentConfig::new(2)
            .with_epsilon_decay(0.5)
            .with_epsilon_min(0.1)
            .with_seed(4);
        let mut agent = TabularAgent::from_config(config).unwrap();
        let mut previous = agent.epsilon();
        for k in 1..=10 {
            agent.step(0u8, 0, 0.0, &1u8, false);
            let expected = 0.5f64.powi(k).max(0.1);
            assert!((agent.epsilon() - expected).abs() < TOLERANCE);
            assert!(agent.epsilon() <= previous);
            assert!(agent.epsilon() >= 0.1);
            previous = agent.epsilon();
        }
        assert_eq!(agent.epsilon(), 0.1);
    }

    #[test]
    fn test_greedy_target_scenario() {
        let mut agent = scenario_agent();
        agent.step("s0", 0, 1.0, &"s1", false);
        let row = agent.q_table().get(&"s0").unwrap();
        assert!((row[0] - 0.05).abs() < TOLERANCE);
        assert_eq!(row[1], 0.0);
    }

    #[test]
    fn test_terminal_scenario() {
        let mut agent = scenario_agent();
        agent.step("s0", 0, 1.0, &"s1", true);
        let row = agent.q_table().get(&"s0").unwrap();
        assert!((row[0] - 0.01).abs() < TOLERANCE);
        assert_eq!(row[1], 0.0);
    }

    #[test]
    fn test_terminal_ignores_next_state_values() {
        let mut agent = TabularAgent::new(3).with_seed(6);
        agent.q_table_mut().insert("s", vec![0.5, 0.0, 0.0]).unwrap();
        agent.q_table_mut().insert("t", vec![100.0, 100.0, 100.0]).unwrap();
        agent.step("s", 0, 2.0, &"t", true);
        let expected = 0.5 + 0.01 * (2.0 - 0.5);
        assert!((agent.q_table().get(&"s").unwrap()[0] - expected).abs() < TOLERANCE);
    }

    #[test]
    fn test_terminal_step_does_not_create_next_state() {
        let mut agent = TabularAgent::new(2).with_seed(7);
        agent.step("s", 1, 1.0, &"never-read", true);
        assert!(agent.q_table().get(&"never-read").is_none());
        assert!(agent.q_table().get(&"s").is_some());
    }

    #[test]
    fn test_expected_next_return_extremes() {
        let mut agent = TabularAgent::new(4).with_seed(8);
        agent.q_table_mut().insert("n", vec![1.0, 2.0, 3.0, 6.0]).unwrap();

        agent.set_epsilon(0.0);
        assert_eq!(agent.expected_next_return(&"n", false), 6.0);

        agent.set_epsilon(1.0);
        assert_eq!(agent.expected_next_return(&"n", false), 3.0);

        agent.set_epsilon(0.25);
        let blended = 0.25 * 3.0 + 0.75 * 6.0;
        assert!((agent.expected_next_return(&"n", false) - blended).abs() < TOLERANCE);

        assert_eq!(agent.expected_next_return(&"n", true), 0.0);
    }

    #[test]
    fn test_step_uses_decayed_epsilon() {
        let config = AgentConfig::new(2)
            .with_alpha(1.0)
            .with_epsilon_decay(0.5)
            .with_epsilon_min(0.0)
            .with_seed(9);
        let mut agent = TabularAgent::from_config(config).unwrap();
        agent.q_table_mut().insert("n", vec![0.0, 4.0]).unwrap();
        // epsilon 1.0 decays to 0.5 before the target is built
        agent.step("s", 0, 0.0, &"n", false);
        let expected = 0.5 * 2.0 + 0.5 * 4.0;
        assert!((agent.q_table().get(&"s").unwrap()[0] - expected).abs() < TOLERANCE);
    }

    #[test]
    fn test_discount_scales_next_return() {
        let config = AgentConfig::new(2)
            .with_alpha(1.0)
            .with_gamma(0.5)
            .with_epsilon_min(0.0)
            .with_seed(10);
        let mut agent = TabularAgent::from_config(config).unwrap();
        agent.q_table_mut().insert("n", vec![2.0, 2.0]).unwrap();
        agent.step("s", 1, 1.0, &"n", false);
        assert!((agent.q_table().get(&"s").unwrap()[1] - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_set_epsilon_clamps() {
        let mut agent: TabularAgent<u8> = TabularAgent::new(2);
        agent.set_epsilon(1.7);
        assert_eq!(agent.epsilon(), 1.0);
        agent.set_epsilon(-0.2);
        assert_eq!(agent.epsilon(), 0.0);
    }

    #[test]
    fn test_reset_restores_initial_conditions() {
        let mut agent = TabularAgent::new(2).with_seed(11);
        let before: Vec<usize> = (0..20).map(|i| agent.select_action(&i)).collect();
        for i in 0..5 {
            agent.step(i, 0, 1.0, &(i + 1), false);
        }
        agent.reset();
        assert!(agent.q_table().is_empty());
        assert_eq!(agent.epsilon(), INITIAL_EPSILON);
        let after: Vec<usize> = (0..20).map(|i| agent.select_action(&i)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_seeded_agents_agree() {
        let mut a = TabularAgent::new(6).with_seed(12);
        let mut b = TabularAgent::new(6).with_seed(12);
        for state in 0..100u32 {
            assert_eq!(a.select_action(&state), b.select_action(&state));
        }
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let result: Result<TabularAgent<u8>> =
            TabularAgent::from_config(AgentConfig::new(2).with_alpha(0.0));
        assert!(result.is_err());
    }
}
