//! CLI infrastructure for the tabular agent
//!
//! This module provides the command-line interface for replaying recorded
//! transitions and inspecting agent configurations.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
