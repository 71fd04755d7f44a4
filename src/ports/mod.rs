//! Ports (trait boundaries) for external collaborators.
//!
//! The environment being learned and the reporting of a run live outside the
//! agent. These traits are owned by the crate and implemented by callers or
//! by the adapters in [`pipeline::observers`](crate::pipeline::observers).

pub mod environment;
pub mod observer;

pub use environment::{EnvStep, Environment};
pub use observer::{EpisodeReport, Observer};
