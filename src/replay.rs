//! Replay of recorded transitions
//!
//! A transition log is a JSON Lines file with one
//! `{"state", "action", "reward", "next_state", "done"}` object per line,
//! e.g. captured from an external simulator. Replaying it drives
//! [`TabularAgent::step`] exactly as a live episode loop would.

use std::{
    fmt,
    fs::File,
    hash::Hash,
    io::{BufRead, BufReader},
    path::Path,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{Error, Result, tabular::TabularAgent};

/// One recorded (s, a, r, s', done) tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<S> {
    pub state: S,
    pub action: usize,
    pub reward: f64,
    pub next_state: S,
    pub done: bool,
}

/// State identifier as it appears in a transition log
///
/// Simulators write either integer ids (e.g. encoded taxi positions) or
/// string labels. Both parse, and `328` and `"328"` are distinct states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Int(id) => write!(f, "{id}"),
            StateKey::Text(label) => f.write_str(label),
        }
    }
}

/// Outcome of replaying a transition log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Transitions fed to the agent
    pub transitions: usize,
    /// Terminal transitions seen
    pub episodes: usize,
    /// Sum of all rewards
    pub total_reward: f64,
    /// Mean reward per completed episode
    pub mean_episode_return: Option<f64>,
    /// States in the agent's Q-table after the replay
    pub states_seen: usize,
    /// Agent's exploration rate after the replay
    pub final_epsilon: f64,
}

/// Read a JSON Lines transition log
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn read_transitions<S, P>(path: P) -> Result<Vec<Transition<S>>>
where
    S: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| Error::io(format!("open transitions {}", path.display()), source))?;

    let mut transitions = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line
            .map_err(|source| Error::io(format!("read transitions {}", path.display()), source))?;
        if line.trim().is_empty() {
            continue;
        }
        let transition = serde_json::from_str(&line).map_err(|source| Error::TransitionParse {
            line: index + 1,
            source,
        })?;
        transitions.push(transition);
    }

    debug!(count = transitions.len(), path = %path.display(), "read transition log");
    Ok(transitions)
}

/// Feed every transition through `agent.step`, in order
///
/// # Errors
///
/// Returns [`Error::ActionOutOfRange`] at the first transition whose action
/// is not valid for the agent; the transitions before it have already been
/// applied.
pub fn replay<S, I>(agent: &mut TabularAgent<S>, transitions: I) -> Result<ReplaySummary>
where
    S: Eq + Hash + Clone,
    I: IntoIterator<Item = Transition<S>>,
{
    let num_actions = agent.num_actions();
    let mut count = 0;
    let mut episodes = 0;
    let mut total_reward = 0.0;
    let mut episode_return = 0.0;
    let mut completed_return = 0.0;

    for transition in transitions {
        if transition.action >= num_actions {
            return Err(Error::ActionOutOfRange {
                action: transition.action,
                num_actions,
            });
        }

        agent.step(
            transition.state,
            transition.action,
            transition.reward,
            &transition.next_state,
            transition.done,
        );

        count += 1;
        total_reward += transition.reward;
        episode_return += transition.reward;
        if transition.done {
            episodes += 1;
            completed_return += episode_return;
            episode_return = 0.0;
        }
    }

    let summary = ReplaySummary {
        transitions: count,
        episodes,
        total_reward,
        mean_episode_return: (episodes > 0).then(|| completed_return / episodes as f64),
        states_seen: agent.q_table().len(),
        final_epsilon: agent.epsilon(),
    };
    info!(
        transitions = summary.transitions,
        episodes = summary.episodes,
        states = summary.states_seen,
        "replay finished"
    );
    Ok(summary)
}
