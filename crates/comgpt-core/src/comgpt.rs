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

//! Main ComGPT orchestrator

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    community::RunRecord,
    config::ExpansionConfig,
    errors::{ComGptError, ComGptResult},
    evaluation::{evaluate, GroundTruth, Scores, TruthResolution},
    expansion::ExpansionController,
    graph::{Graph, NodeId},
    llm_client::LlmClient,
    oracle::{DecisionOracle, LlmOracle},
    prompts::PromptBuilder,
    selector::RunSelector,
};

/// Outcome of one evaluated seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub seed: NodeId,
    pub community: Vec<NodeId>,
    pub cohesion: f64,
    pub truth_size: usize,
    pub scores: Scores,
}

/// A seed that could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSeed {
    pub seed: NodeId,
    pub reason: String,
}

/// Results of a batch of seeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub seeds: Vec<SeedReport>,
    pub skipped: Vec<SkippedSeed>,
    pub mean_f1: f64,
    pub mean_jaccard: f64,
}

impl BatchReport {
    fn from_reports(seeds: Vec<SeedReport>, skipped: Vec<SkippedSeed>) -> Self {
        let count = seeds.len().max(1) as f64;
        let mean_f1 = seeds.iter().map(|r| r.scores.f1).sum::<f64>() / count;
        let mean_jaccard = seeds.iter().map(|r| r.scores.jaccard).sum::<f64>() / count;
        Self {
            seeds,
            skipped,
            mean_f1,
            mean_jaccard,
        }
    }
}

/// Local community detection over one graph
pub struct ComGpt {
    graph: Arc<Graph>,
    selector: RunSelector,
}

impl ComGpt {
    /// Build the engine from its collaborators; the configuration is validated
    pub fn new(
        graph: Arc<Graph>,
        oracle: Arc<dyn DecisionOracle>,
        prompts: Arc<dyn PromptBuilder>,
        config: ExpansionConfig,
    ) -> ComGptResult<Self> {
        config.validate()?;
        let controller = ExpansionController::new(graph.clone(), oracle, prompts, config);
        Ok(Self {
            graph,
            selector: RunSelector::new(controller),
        })
    }

    /// Build the engine around a chat-completion client
    pub fn with_llm_client(
        graph: Arc<Graph>,
        llm_client: Arc<dyn LlmClient>,
        prompts: Arc<dyn PromptBuilder>,
        config: ExpansionConfig,
    ) -> ComGptResult<Self> {
        let oracle: Arc<dyn DecisionOracle> = Arc::new(LlmOracle::new(llm_client));
        Self::new(graph, oracle, prompts, config)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Detect the community of `seed`
    pub async fn detect(&self, seed: NodeId) -> ComGptResult<RunRecord> {
        self.selector.select(seed).await
    }

    /// Detect and score a single seed
    pub async fn evaluate_seed(
        &self,
        seed: NodeId,
        truth: &GroundTruth,
        resolution: TruthResolution,
    ) -> ComGptResult<SeedReport> {
        let reference = truth.resolve(seed, resolution)?;
        let record = self.detect(seed).await?;
        let community = record.community.distinct();
        let scores = evaluate(&community, &reference)?;

        info!(
            "Seed {}: {} nodes, F1 {:.4}, Jaccard {:.4}",
            seed,
            community.len(),
            scores.f1,
            scores.jaccard
        );
        Ok(SeedReport {
            seed,
            community,
            cohesion: record.cohesion,
            truth_size: reference.len(),
            scores,
        })
    }

    /// Detect and score every seed in order.
    ///
    /// Seeds without a reference community or outside the graph are skipped
    /// and listed in the report; oracle transport failures abort the batch.
    #[instrument(skip(self, seeds, truth), fields(seed_count = seeds.len()))]
    pub async fn evaluate_seeds(
        &self,
        seeds: &[NodeId],
        truth: &GroundTruth,
        resolution: TruthResolution,
    ) -> ComGptResult<BatchReport> {
        let mut reports = Vec::with_capacity(seeds.len());
        let mut skipped = Vec::new();

        for &seed in seeds {
            match self.evaluate_seed(seed, truth, resolution).await {
                Ok(report) => reports.push(report),
                Err(
                    err @ (ComGptError::EmptyGroundTruth
                    | ComGptError::UnknownSeed { .. }
                    | ComGptError::EmptyPrediction),
                ) => {
                    warn!("Skipping seed {}: {}", seed, err);
                    skipped.push(SkippedSeed {
                        seed,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let report = BatchReport::from_reports(reports, skipped);
        info!(
            "Evaluated {} seeds, mean F1 {:.4}, mean Jaccard {:.4}",
            report.seeds.len(),
            report.mean_f1,
            report.mean_jaccard
        );
        Ok(report)
    }
}
