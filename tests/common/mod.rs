//! Shared fixtures for the integration tests.

use tabular_agent::{
    Error, Result,
    ports::{EnvStep, Environment},
};

/// Deterministic corridor of `len` cells.
///
/// Action 0 moves left (bounded at cell 0), action 1 moves right. Every move
/// costs 1; entering the last cell pays `goal_reward` and ends the episode.
pub struct Corridor {
    pub len: u32,
    pub goal_reward: f64,
    position: u32,
}

impl Corridor {
    pub fn new(len: u32, goal_reward: f64) -> Self {
        assert!(len >= 2, "corridor needs a start and a goal");
        Self {
            len,
            goal_reward,
            position: 0,
        }
    }

    /// Best achievable episode score.
    pub fn optimal_score(&self) -> f64 {
        self.goal_reward - f64::from(self.len - 2)
    }
}

impl Environment for Corridor {
    type State = u32;

    fn num_actions(&self) -> usize {
        2
    }

    fn reset(&mut self) -> Result<u32> {
        self.position = 0;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<EnvStep<u32>> {
        match action {
            0 => self.position = self.position.saturating_sub(1),
            1 => self.position += 1,
            other => {
                return Err(Error::Environment {
                    message: format!("corridor has no action {other}"),
                });
            }
        }

        let done = self.position + 1 == self.len;
        Ok(EnvStep {
            next_state: self.position,
            reward: if done { self.goal_reward } else { -1.0 },
            done,
        })
    }
}

/// Write `lines` to a JSON Lines file.
pub fn write_jsonl(path: &std::path::Path, lines: &[serde_json::Value]) {
    let body: String = lines
        .iter()
        .map(|line| format!("{line}\n"))
        .collect();
    std::fs::write(path, body).unwrap();
}
