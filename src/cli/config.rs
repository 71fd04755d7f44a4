//! Shared configuration types for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::tabular::AgentConfig;

/// Hyperparameter flags shared by commands that build an agent
///
/// Precedence: explicit flag, then `--config` file, then defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct AgentArgs {
    /// JSON file with agent hyperparameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of actions (default 6)
    #[arg(long, short = 'a')]
    pub actions: Option<usize>,

    /// Learning rate α
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Multiplicative epsilon decay per step
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Lower bound for epsilon
    #[arg(long)]
    pub epsilon_min: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    /// Resolve the flags into a validated agent configuration
    pub fn resolve(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::load(path)
                .with_context(|| format!("Failed to load agent config: {}", path.display()))?,
            None => AgentConfig::default(),
        };

        if let Some(actions) = self.actions {
            config.num_actions = actions;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(decay) = self.epsilon_decay {
            config.epsilon_decay = decay;
        }
        if let Some(min) = self.epsilon_min {
            config.epsilon_min = min;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid agent hyperparameters")?;
        Ok(config)
    }
}
