//! Tabular epsilon-greedy temporal difference agent
//!
//! This crate provides:
//! - A tabular agent with lazily initialised action-values and an
//!   expected/greedy blended TD target
//! - An episode driver for any caller-supplied environment
//! - Replay of recorded transition logs
//! - A small CLI for replay and configuration

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod replay;
pub mod tabular;

pub use error::{Error, Result};
pub use tabular::{AgentConfig, TabularAgent};
