//! Tabular temporal difference learning
//!
//! This module implements an epsilon-greedy agent that keeps one row of
//! action-values per visited state and learns from single transitions.
//!
//! ## Update Rule
//!
//! On every `step` the exploration rate decays first:
//!
//! ```text
//! ε ← max(ε · decay, ε_min)
//! ```
//!
//! and then the action-value of the visited pair moves toward a target that
//! blends the expected and the greedy value of the next state:
//!
//! ```text
//! next_G   = 0                                            if done
//!          = ε · mean_a' Q(s',a') + (1 - ε) · max_a' Q(s',a')   otherwise
//! Q(s,a)  ← Q(s,a) + α [r + γ · next_G - Q(s,a)]
//! ```
//!
//! | ε | Target behaves like |
//! |---|---------------------|
//! | 1 | Uniform average of Q(s',·) |
//! | 0 | Q-learning max over Q(s',·) |
//!
//! ## Usage Example
//!
//! ```
//! use tabular_agent::tabular::{AgentConfig, TabularAgent};
//!
//! let mut agent = TabularAgent::from_config(AgentConfig::new(6).with_seed(7)).unwrap();
//!
//! let state = 328u32;
//! let action = agent.select_action(&state);
//! agent.step(state, action, -1.0, &428u32, false);
//! assert!(agent.epsilon() < 1.0);
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

// Public re-exports
pub use agent::{INITIAL_EPSILON, TabularAgent};
pub use config::AgentConfig;
pub use q_table::QTable;
