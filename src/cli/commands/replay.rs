//! Replay command - Feed a recorded transition log through a fresh agent

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::AgentArgs,
        output::{create_replay_progress, format_number, print_kv, print_section},
    },
    replay::{ReplaySummary, StateKey, Transition, read_transitions, replay},
    tabular::{AgentConfig, TabularAgent},
};

#[derive(Debug, Serialize)]
struct ReplaySummaryFile {
    transitions_file: String,
    agent: AgentConfig,
    replay: ReplaySummary,
}

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("replay_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Replay a JSON Lines transition log through a tabular agent")]
pub struct ReplayArgs {
    /// Transition log, one {state, action, reward, next_state, done} object per line
    pub transitions: PathBuf,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: ReplayArgs) -> Result<()> {
    let config = args.agent.resolve()?;
    let mut agent: TabularAgent<StateKey> = TabularAgent::from_config(config.clone())?;

    let transitions: Vec<Transition<StateKey>> = read_transitions(&args.transitions)
        .with_context(|| format!("Failed to read {}", args.transitions.display()))?;

    let summary = if args.no_progress {
        replay(&mut agent, transitions)?
    } else {
        let pb = create_replay_progress(transitions.len() as u64)?;
        let summary = replay(&mut agent, pb.wrap_iter(transitions.into_iter()))?;
        pb.finish_and_clear();
        summary
    };

    print_section("Replay Summary");
    print_kv("Transitions", &format_number(summary.transitions));
    print_kv("Episodes", &format_number(summary.episodes));
    print_kv("Total reward", &format!("{:.3}", summary.total_reward));
    print_kv(
        "Mean return",
        &summary
            .mean_episode_return
            .map_or_else(|| "n/a".to_string(), |mean| format!("{mean:.3}")),
    );
    print_kv("States seen", &format_number(summary.states_seen));
    print_kv("Final epsilon", &format!("{:.6}", summary.final_epsilon));

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let payload = ReplaySummaryFile {
            transitions_file: args.transitions.display().to_string(),
            agent: config,
            replay: summary,
        };
        to_writer_pretty(file, &payload).context("Failed to write replay summary")?;
        print_kv("Summary", &path.display().to_string());
    }

    Ok(())
}
