//! Environment port - abstraction over the task the agent interacts with
//!
//! The crate ships no environments. Callers adapt their own simulator to this
//! trait and hand it to the [`Interaction`](crate::pipeline::Interaction)
//! driver.

use std::hash::Hash;

use crate::Result;

/// Outcome of applying one action to an environment
#[derive(Debug, Clone, PartialEq)]
pub struct EnvStep<S> {
    /// State reached after the action
    pub next_state: S,
    /// Reward received for the action
    pub reward: f64,
    /// Whether `next_state` ends the episode
    pub done: bool,
}

/// Episodic environment with a discrete action set
///
/// # Examples
///
/// ```
/// use tabular_agent::ports::{EnvStep, Environment};
///
/// /// Walk right along a line of `len` cells; reaching the end pays 1.
/// struct Corridor {
///     len: u32,
///     position: u32,
/// }
///
/// impl Environment for Corridor {
///     type State = u32;
///
///     fn num_actions(&self) -> usize {
///         2
///     }
///
///     fn reset(&mut self) -> tabular_agent::Result<u32> {
///         self.position = 0;
///         Ok(self.position)
///     }
///
///     fn step(&mut self, action: usize) -> tabular_agent::Result<EnvStep<u32>> {
///         if action == 1 {
///             self.position += 1;
///         }
///         let done = self.position + 1 >= self.len;
///         Ok(EnvStep {
///             next_state: self.position,
///             reward: if done { 1.0 } else { 0.0 },
///             done,
///         })
///     }
/// }
/// ```
pub trait Environment {
    /// Hashable state identifier used as the Q-table key
    type State: Eq + Hash + Clone;

    /// Number of discrete actions, `0..num_actions()`
    fn num_actions(&self) -> usize;

    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Result<Self::State>;

    /// Apply `action` in the current state.
    ///
    /// # Errors
    ///
    /// Implementations report simulator failures with
    /// [`Error::Environment`](crate::Error::Environment).
    fn step(&mut self, action: usize) -> Result<EnvStep<Self::State>>;
}
