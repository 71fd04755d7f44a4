//! Hyperparameters for the tabular agent.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for creating a [`TabularAgent`](super::TabularAgent).
///
/// Missing fields fall back to the defaults when deserialized, so a config
/// file only needs to name the values it overrides.
///
/// # Examples
///
/// ```
/// use tabular_agent::tabular::AgentConfig;
///
/// let config = AgentConfig::new(6)
///     .with_alpha(0.1)
///     .with_epsilon_decay(0.9999)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Number of actions available in every state
    pub num_actions: usize,
    /// Learning rate α
    pub alpha: f64,
    /// Multiplicative epsilon decay applied on every step
    pub epsilon_decay: f64,
    /// Floor for epsilon
    pub epsilon_min: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_NUM_ACTIONS: usize = 6;

    /// Create a configuration for `num_actions` actions with default values
    /// for everything else.
    pub fn new(num_actions: usize) -> Self {
        Self {
            num_actions,
            alpha: 0.01,
            epsilon_decay: 0.99999,
            epsilon_min: 0.001,
            gamma: 1.0,
            seed: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_epsilon_min(mut self, epsilon_min: f64) -> Self {
        self.epsilon_min = epsilon_min;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every hyperparameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.num_actions == 0 {
            return Err(invalid("num_actions must be at least 1".to_string()));
        }
        check_range("alpha", self.alpha, |v| v > 0.0 && v <= 1.0, "(0, 1]")?;
        check_range(
            "epsilon_decay",
            self.epsilon_decay,
            |v| v > 0.0 && v <= 1.0,
            "(0, 1]",
        )?;
        check_range(
            "epsilon_min",
            self.epsilon_min,
            |v| (0.0..=1.0).contains(&v),
            "[0, 1]",
        )?;
        check_range("gamma", self.gamma, |v| (0.0..=1.0).contains(&v), "[0, 1]")?;
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| Error::io(format!("open config {}", path.display()), source))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|source| Error::io(format!("create config {}", path.display()), source))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer
            .flush()
            .map_err(|source| Error::io(format!("write config {}", path.display()), source))?;
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUM_ACTIONS)
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}

fn check_range(name: &str, value: f64, ok: impl Fn(f64) -> bool, range: &str) -> Result<()> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} = {value} is outside {range}")))
    }
}
