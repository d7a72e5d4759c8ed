use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use comgpt_core::{
    ExpansionConfig, GraphEncoding, LlmConfig, NodeId, PromptStrategy, TruthFormat,
    TruthResolution,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(name = "comgpt")]
#[clap(about = "Grow local communities around seed nodes with an LLM in the loop")]
pub struct Args {
    /// Edge list, one whitespace-separated pair per line
    #[clap(long, help = "Path to the edge-list file")]
    pub edges: PathBuf,

    /// Node list for datasets that ship one
    #[clap(long, help = "Path to the node-list file")]
    pub nodes: Option<PathBuf>,

    /// Ground-truth communities
    #[clap(long, help = "Path to the ground-truth file")]
    pub truth: Option<PathBuf>,

    #[clap(long, default_value = "lines", help = "Ground-truth layout (lines or csv)")]
    pub truth_format: TruthFormat,

    #[clap(
        long,
        default_value = "first_match",
        help = "Reference community per seed (first_match or union)"
    )]
    pub resolution: TruthResolution,

    /// Seeds to expand
    #[clap(long, value_delimiter = ',', required = true, help = "Comma-separated seed nodes")]
    pub seeds: Vec<NodeId>,

    #[clap(long, help = "Independent runs per seed")]
    pub iterations: Option<usize>,

    #[clap(long, help = "Maximum candidates shown to the model")]
    pub candidates: Option<usize>,

    #[clap(long, help = "Attempts at a valid selection before giving up")]
    pub max_retries: Option<usize>,

    #[clap(long, help = "Disable the backfill phase")]
    pub no_backfill: bool,

    #[clap(
        long,
        default_value = "nsg",
        help = "Selection prompt (zero_shot, few_shot, cot, bag or nsg)"
    )]
    pub strategy: PromptStrategy,

    #[clap(long, help = "Leave supplementary knowledge out of selection prompts")]
    pub no_knowledge: bool,

    #[clap(long, help = "Seconds to pause every ten oracle calls")]
    pub pause_secs: Option<u64>,

    #[clap(long, help = "Runs per seed executed at the same time")]
    pub concurrency: Option<usize>,

    /// LLM model name
    #[clap(long, help = "Model name for LLM operations")]
    pub model: Option<String>,

    /// Temperature setting for LLM
    #[clap(long, help = "Temperature for LLM (0.0-2.0)")]
    pub temperature: Option<f32>,
}

impl Args {
    /// Expansion settings from the environment with CLI overrides
    pub fn expansion_config(&self) -> ExpansionConfig {
        let mut config = ExpansionConfig::from_env();

        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(candidates) = self.candidates {
            config.candidate_limit = candidates;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_oracle_retries = max_retries;
        }
        if self.no_backfill {
            config.backfill = false;
        }
        if let Some(pause_secs) = self.pause_secs {
            config.pause_duration = Duration::from_secs(pause_secs);
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_runs = concurrency;
        }

        config
    }

    /// LLM settings from the environment with CLI overrides
    pub fn llm_config(&self) -> LlmConfig {
        let mut config = LlmConfig::from_env();

        if let Some(model) = &self.model {
            if !model.trim().is_empty() {
                config.model = Some(model.clone());
            }
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }

        config
    }

    pub fn encoding(&self) -> GraphEncoding {
        if self.no_knowledge {
            GraphEncoding::Incident
        } else {
            GraphEncoding::IncidentWithKnowledge
        }
    }
}
