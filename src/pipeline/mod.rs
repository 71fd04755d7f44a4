//! Episode driving pipeline
//!
//! This module runs a [`TabularAgent`](crate::tabular::TabularAgent) against
//! any [`Environment`](crate::ports::Environment), tracking a sliding window
//! of episode scores and reporting progress through observers.

pub mod interact;
pub mod observers;

pub use interact::{InteractConfig, InteractResult, Interaction};
// Re-export observer implementations (adapters)
pub use observers::{JsonlObserver, LogObserver, ProgressObserver};

pub use crate::ports::{EpisodeReport, Environment, Observer};
