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

//! Run selector: repeated independent runs, best cohesion wins

use tracing::{debug, info, instrument};

use crate::community::{best_record, RunRecord};
use crate::errors::{ComGptError, ComGptResult};
use crate::expansion::ExpansionController;
use crate::graph::NodeId;
use crate::helpers::semaphore_gather;

pub struct RunSelector {
    controller: ExpansionController,
}

impl RunSelector {
    pub fn new(controller: ExpansionController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &ExpansionController {
        &self.controller
    }

    /// Execute `iterations` runs from `seed` and keep the most cohesive one.
    ///
    /// Runs start from a fresh community each time. With
    /// `max_concurrent_runs > 1` they are executed concurrently; the result
    /// does not depend on completion order since ties keep the lowest run index.
    #[instrument(skip(self))]
    pub async fn select(&self, seed: NodeId) -> ComGptResult<RunRecord> {
        let records = self.all_runs(seed).await?;
        for (index, record) in records.iter().enumerate() {
            debug!("Run {} cohesion {:.4}", index, record.cohesion);
        }

        let best = best_record(records).ok_or_else(|| ComGptError::Config {
            message: "iterations must be at least 1".to_string(),
        })?;
        info!(
            "Best community for seed {} has cohesion {:.4}",
            seed, best.cohesion
        );
        Ok(best)
    }

    /// Records of every run in run order
    pub async fn all_runs(&self, seed: NodeId) -> ComGptResult<Vec<RunRecord>> {
        let config = self.controller.config();
        if config.max_concurrent_runs <= 1 {
            let mut records = Vec::with_capacity(config.iterations);
            for _ in 0..config.iterations {
                records.push(self.controller.run(seed).await?);
            }
            return Ok(records);
        }

        let runs: Vec<_> = (0..config.iterations)
            .map(|_| self.controller.run(seed))
            .collect();
        semaphore_gather(runs, config.max_concurrent_runs)
            .await
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpansionConfig;
    use crate::graph::Graph;
    use crate::oracle::DecisionOracle;
    use crate::testing::{ring_plus_hub, HighestDegreeOracle, ListPrompts, ScriptedOracle};
    use std::sync::Arc;
    use std::time::Duration;

    fn selector(graph: Arc<Graph>, oracle: Arc<dyn DecisionOracle>, config: ExpansionConfig) -> RunSelector {
        RunSelector::new(ExpansionController::new(
            graph,
            oracle,
            Arc::new(ListPrompts),
            config.with_pause(10, Duration::ZERO),
        ))
    }

    #[tokio::test]
    async fn test_select_keeps_most_cohesive_run() {
        let graph = Arc::new(ring_plus_hub());
        // first run: 5 then null twice (M({1,5}) = 0.25); second run: 6, 2, 3, 4
        let oracle = Arc::new(ScriptedOracle::new(&[
            "Node 5", "null", "null", "Node 6", "Node 2", "Node 3", "Node 4",
        ]));
        let config = ExpansionConfig::default()
            .with_backfill(false)
            .with_iterations(2)
            .with_max_oracle_retries(2);
        let selector = selector(graph.clone(), oracle, config);

        let records = selector.all_runs(1).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].community.members(), &[1, 5]);

        let best = best_record(records).unwrap();
        assert!((best.cohesion - 7.0 / 3.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_concurrent_runs_match_sequential_runs() {
        let graph = Arc::new(ring_plus_hub());
        let sequential = selector(
            graph.clone(),
            Arc::new(HighestDegreeOracle::new(graph.clone())),
            ExpansionConfig::default().with_backfill(false).with_iterations(3),
        )
        .select(1)
        .await
        .unwrap();

        let concurrent = selector(
            graph.clone(),
            Arc::new(HighestDegreeOracle::new(graph.clone())),
            ExpansionConfig::default()
                .with_backfill(false)
                .with_iterations(3)
                .with_max_concurrent_runs(3),
        )
        .select(1)
        .await
        .unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[tokio::test]
    async fn test_unknown_seed_fails_every_mode() {
        let graph = Arc::new(ring_plus_hub());
        let config = ExpansionConfig::default().with_max_concurrent_runs(2);
        let selector = selector(graph, Arc::new(ScriptedOracle::new(&[])), config);

        assert!(selector.select(7).await.is_err());
    }
}
