//! Observer adapters for interaction runs
//!
//! Observers allow composable reporting during a run without coupling the
//! episode loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{
    Error, Result,
    pipeline::InteractResult,
    ports::{EpisodeReport, Observer},
};

/// Progress bar observer - Shows run progress and the window average
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "-".to_string(), |avg| format!("{avg:.2}"))
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(report.episode as u64 + 1);
            pb.set_message(format!(
                "avg {} best {} eps {:.4}",
                format_average(report.window_average),
                format_average(report.best_average),
                report.epsilon
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self, result: &InteractResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("best {}", format_average(result.best_avg_reward)));
        }
        Ok(())
    }
}

/// Log observer - Emits a tracing event every `every` episodes
pub struct LogObserver {
    every: usize,
}

impl LogObserver {
    /// Create a log observer; an interval of zero is treated as one
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Observer for LogObserver {
    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        if (report.episode + 1).is_multiple_of(self.every) {
            info!(
                episode = report.episode + 1,
                score = report.score,
                window_average = ?report.window_average,
                best_average = ?report.best_average,
                epsilon = report.epsilon,
                "episode finished"
            );
        }
        Ok(())
    }

    fn on_training_end(&mut self, result: &InteractResult) -> Result<()> {
        info!(
            episodes = result.episodes,
            best_avg_reward = ?result.best_avg_reward,
            final_epsilon = result.final_epsilon,
            solved = result.solved,
            "run summary"
        );
        Ok(())
    }
}

/// JSONL observer - Writes one [`EpisodeReport`] per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|source| Error::io(format!("create {}", path.display()), source))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(&mut self, report: &EpisodeReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &InteractResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
