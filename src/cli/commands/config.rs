//! Config command - Emit agent hyperparameters as JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::config::AgentArgs;

#[derive(Parser, Debug)]
#[command(about = "Print the effective agent configuration as JSON")]
pub struct ConfigArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Write to this file instead of stdout
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = args.agent.resolve()?;

    match &args.output {
        Some(path) => {
            config
                .save(path)
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }

    Ok(())
}
