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

//! Expansion controller state machine

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::state::{BackfillOutcome, Phase, Rejection, RunState};
use crate::candidates::{rank_all_candidates, rank_candidates};
use crate::community::RunRecord;
use crate::config::ExpansionConfig;
use crate::errors::{ComGptError, ComGptResult};
use crate::graph::{Graph, NodeId};
use crate::oracle::{consult, DecisionOracle};
use crate::prompts::PromptBuilder;

/// Drives single runs from a seed to termination.
///
/// The controller is stateless between runs; everything a run mutates lives in
/// its own [`RunState`], so one controller can serve concurrent runs.
pub struct ExpansionController {
    graph: Arc<Graph>,
    oracle: Arc<dyn DecisionOracle>,
    prompts: Arc<dyn PromptBuilder>,
    config: ExpansionConfig,
}

impl ExpansionController {
    pub fn new(
        graph: Arc<Graph>,
        oracle: Arc<dyn DecisionOracle>,
        prompts: Arc<dyn PromptBuilder>,
        config: ExpansionConfig,
    ) -> Self {
        Self {
            graph,
            oracle,
            prompts,
            config,
        }
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Execute one run from `seed`
    #[instrument(skip(self))]
    pub async fn run(&self, seed: NodeId) -> ComGptResult<RunRecord> {
        if !self.graph.contains(seed) {
            return Err(ComGptError::UnknownSeed { node: seed });
        }

        let mut state = RunState::new(seed);
        while state.phase != Phase::Terminated {
            state.phase = match state.phase {
                Phase::Select => {
                    self.select_phase(&mut state).await?;
                    if self.config.backfill {
                        state.snapshot(&self.graph);
                        Phase::Backfill
                    } else {
                        Phase::Terminated
                    }
                }
                Phase::Backfill => {
                    if !state
                        .community
                        .within_duplicate_budget(self.config.duplicate_fraction)
                    {
                        debug!("Duplicate budget exhausted, skipping backfill");
                        Phase::Terminated
                    } else {
                        match self.backfill_step(&mut state).await? {
                            BackfillOutcome::Accepted(_) => Phase::Select,
                            BackfillOutcome::Declined => Phase::Terminated,
                        }
                    }
                }
                Phase::Terminated => Phase::Terminated,
            };
            debug!("Phase -> {:?}", state.phase);
        }

        let record = state.finish(&self.graph, self.config.backfill);
        info!(
            "Run from seed {} finished with {} members, cohesion {:.4}",
            seed,
            record.community.unique_count(),
            record.cohesion
        );
        Ok(record)
    }

    /// Grow the community until candidates run out, the duplicate budget is
    /// spent, or the oracle gives no usable answer.
    async fn select_phase(&self, state: &mut RunState) -> ComGptResult<()> {
        loop {
            let candidates =
                rank_candidates(&state.community, &self.graph, self.config.candidate_limit);
            if candidates.is_empty() {
                debug!("No positive-gain candidates left");
                return Ok(());
            }
            if !state
                .community
                .within_duplicate_budget(self.config.duplicate_fraction)
            {
                debug!(
                    "Stopping selection with {} duplicates in {} entries",
                    state.community.duplicates(),
                    state.community.len()
                );
                return Ok(());
            }

            let next = match candidates.as_slice() {
                [only] => Some(*only),
                _ => self.select_with_oracle(state, &candidates).await?,
            };

            match next {
                Some(node) => {
                    debug!("Adding node {}", node);
                    state.community.push(node);
                }
                None => return Ok(()),
            }
        }
    }

    /// Ask the oracle for the next member, retrying invalid answers a bounded
    /// number of times. `None` once retries are exhausted. Counts as one
    /// selection for pacing however many attempts it takes.
    async fn select_with_oracle(
        &self,
        state: &mut RunState,
        candidates: &[NodeId],
    ) -> ComGptResult<Option<NodeId>> {
        let selected = self.attempt_selection(state, candidates).await?;
        self.pace(state).await;
        Ok(selected)
    }

    async fn attempt_selection(
        &self,
        state: &RunState,
        candidates: &[NodeId],
    ) -> ComGptResult<Option<NodeId>> {
        let local: HashSet<NodeId> = state
            .community
            .members()
            .iter()
            .chain(candidates.iter())
            .copied()
            .collect();

        for attempt in 1..=self.config.max_oracle_retries {
            let request = self
                .prompts
                .selection_prompt(&self.graph, &state.community, candidates);
            let answer = consult(self.oracle.as_ref(), &request).await?;

            match validate_selection(answer, state.community.members(), &local) {
                Ok(node) => return Ok(Some(node)),
                Err(rejection) => warn!(
                    "Rejected oracle answer ({}), attempt {}/{}",
                    rejection, attempt, self.config.max_oracle_retries
                ),
            }
        }

        warn!(
            "No valid selection after {} attempts, ending selection",
            self.config.max_oracle_retries
        );
        Ok(None)
    }

    /// Offer the full frontier to the oracle once. Only members of that
    /// frontier can be accepted.
    async fn backfill_step(&self, state: &mut RunState) -> ComGptResult<BackfillOutcome> {
        let candidates =
            rank_all_candidates(&state.community, &self.graph, self.config.candidate_limit);
        if candidates.is_empty() {
            debug!("Nothing to backfill");
            return Ok(BackfillOutcome::Declined);
        }

        let request = self
            .prompts
            .backfill_prompt(&self.graph, &state.community, &candidates);
        let answer = consult(self.oracle.as_ref(), &request).await?;

        match answer {
            Some(node) if candidates.contains(&node) => {
                info!("Backfilled node {}", node);
                state.community.push(node);
                Ok(BackfillOutcome::Accepted(node))
            }
            Some(node) => {
                warn!("Backfill answer {} is not a backfill candidate", node);
                Ok(BackfillOutcome::Declined)
            }
            None => {
                debug!("Oracle declined to backfill");
                Ok(BackfillOutcome::Declined)
            }
        }
    }

    /// Pause every `pause_every` oracle selections; `0` never pauses
    async fn pace(&self, state: &mut RunState) {
        let calls = state.record_oracle_call();
        let every = self.config.pause_every;
        if every > 0 && calls % every == 0 && !self.config.pause_duration.is_zero() {
            debug!(
                "Pausing {:?} after {} oracle calls",
                self.config.pause_duration, calls
            );
            tokio::time::sleep(self.config.pause_duration).await;
        }
    }
}

fn validate_selection(
    answer: Option<NodeId>,
    members: &[NodeId],
    local: &HashSet<NodeId>,
) -> Result<NodeId, Rejection> {
    let node = answer.ok_or(Rejection::NoNode)?;
    if members == [node] {
        return Err(Rejection::SelfSelection(node));
    }
    if !local.contains(&node) {
        return Err(Rejection::OutOfScope(node));
    }
    Ok(node)
}
