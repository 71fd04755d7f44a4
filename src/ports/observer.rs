//! Observer port - abstraction for training observation
//!
//! This port defines the interface for observing an interaction run,
//! allowing composable reporting without coupling the episode loop to
//! specific output formats.

use serde::{Deserialize, Serialize};

use crate::{Result, pipeline::InteractResult};

/// Summary of one finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Index of the episode (0-based)
    pub episode: usize,
    /// Sum of rewards collected in the episode
    pub score: f64,
    /// Number of environment steps taken
    pub steps: usize,
    /// Mean score over the last full window, once one is available
    pub window_average: Option<f64>,
    /// Best window average so far
    pub best_average: Option<f64>,
    /// Agent's exploration rate after the episode
    pub epsilon: f64,
}

/// Observer trait for monitoring an interaction run
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(report)` - After every episode
/// 3. `on_training_end(result)` - Once at the end, also after an early stop
///
/// # Examples
///
/// ```no_run
/// use tabular_agent::ports::{EpisodeReport, Observer};
///
/// struct ScoreCollector {
///     scores: Vec<f64>,
/// }
///
/// impl Observer for ScoreCollector {
///     fn on_episode_end(&mut self, report: &EpisodeReport) -> tabular_agent::Result<()> {
///         self.scores.push(report.score);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when the run starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_episode_end(&mut self, _report: &EpisodeReport) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes.
    ///
    /// Use this to finalize outputs or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_end(&mut self, _result: &InteractResult) -> Result<()> {
        Ok(())
    }
}
