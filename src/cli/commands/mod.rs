//! Subcommands of the `tabular-agent` binary

pub mod config;
pub mod replay;
