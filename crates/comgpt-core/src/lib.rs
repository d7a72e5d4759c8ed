/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! # ComGPT Core
//!
//! Oracle-guided local community detection.
//!
//! Starting from a seed node, a community grows one node at a time. The graph
//! proposes candidates ranked by the cohesion metric and a natural-language
//! decision oracle chooses among them. Repeated runs keep the most cohesive
//! result, which can be scored against ground-truth communities.

pub mod candidates;
pub mod cohesion;
pub mod comgpt;
pub mod community;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod evaluation;
pub mod expansion;
pub mod graph;
pub mod helpers;
pub mod llm_client;
pub mod oracle;
pub mod prompts;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use comgpt::{BatchReport, ComGpt, SeedReport, SkippedSeed};
pub use community::{Community, RunRecord};
pub use config::ExpansionConfig;
pub use errors::{ComGptError, ComGptResult, LlmError, LlmResult};
pub use graph::{Graph, GraphStats, NodeId};

// Re-export traits
pub use llm_client::LlmClient;
pub use oracle::DecisionOracle;
pub use prompts::PromptBuilder;

// Re-export concrete types
pub use encoding::GraphEncoding;
pub use evaluation::{evaluate, GroundTruth, Scores, TruthFormat, TruthResolution};
pub use expansion::ExpansionController;
pub use llm_client::{LlmConfig, Message, OpenAiClient};
pub use oracle::LlmOracle;
pub use prompts::{PromptStrategy, TextPromptBuilder};
pub use selector::RunSelector;
