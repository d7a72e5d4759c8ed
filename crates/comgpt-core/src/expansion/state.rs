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

//! Per-run state owned by a single expansion

use std::fmt;

use crate::cohesion::cohesion;
use crate::community::{best_record, Community, RunRecord};
use crate::graph::{Graph, NodeId};

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Select,
    Backfill,
    Terminated,
}

/// Why an oracle answer was not accepted during selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No integer in the reply
    NoNode,
    /// The seed chose itself while it was the only member
    SelfSelection(NodeId),
    /// The id is neither a member nor a candidate
    OutOfScope(NodeId),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoNode => write!(f, "no node id"),
            Rejection::SelfSelection(node) => write!(f, "self selection of {}", node),
            Rejection::OutOfScope(node) => write!(f, "node {} is out of scope", node),
        }
    }
}

/// Result of one backfill step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillOutcome {
    Accepted(NodeId),
    Declined,
}

/// Mutable state of a run. Never shared between runs.
#[derive(Debug, Clone)]
pub struct RunState {
    pub community: Community,
    pub phase: Phase,
    snapshots: Vec<RunRecord>,
    oracle_calls: usize,
}

impl RunState {
    pub fn new(seed: NodeId) -> Self {
        Self {
            community: Community::seed(seed),
            phase: Phase::Select,
            snapshots: Vec::new(),
            oracle_calls: 0,
        }
    }

    /// Record the current community as a candidate result
    pub fn snapshot(&mut self, graph: &Graph) {
        let score = cohesion(self.community.members(), graph);
        self.snapshots
            .push(RunRecord::new(self.community.clone(), score));
    }

    pub fn snapshots(&self) -> &[RunRecord] {
        &self.snapshots
    }

    /// Count one oracle selection and return the running total
    pub fn record_oracle_call(&mut self) -> usize {
        self.oracle_calls += 1;
        self.oracle_calls
    }

    pub fn oracle_calls(&self) -> usize {
        self.oracle_calls
    }

    /// Final record: the current community alone, or the best snapshot once
    /// the final community has been added to the snapshots.
    pub fn finish(mut self, graph: &Graph, use_snapshots: bool) -> RunRecord {
        let final_score = cohesion(self.community.members(), graph);
        let final_record = RunRecord::new(self.community, final_score);
        if !use_snapshots {
            return final_record;
        }

        self.snapshots.push(final_record.clone());
        best_record(self.snapshots).unwrap_or(final_record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::barbell;

    #[test]
    fn test_finish_prefers_best_snapshot() {
        let graph = barbell();
        let mut state = RunState::new(1);
        state.community.push(2);
        state.community.push(3);
        state.snapshot(&graph);

        state.community.push(4);
        let record = state.finish(&graph, true);
        assert_eq!(record.community.members(), &[1, 2, 3]);
        assert!((record.cohesion - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_finish_without_snapshots_returns_final_community() {
        let graph = barbell();
        let mut state = RunState::new(1);
        state.community.push(2);
        state.community.push(3);
        state.snapshot(&graph);
        state.community.push(4);

        let record = state.finish(&graph, false);
        assert_eq!(record.community.members(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_oracle_call_counter() {
        let mut state = RunState::new(1);
        assert_eq!(state.record_oracle_call(), 1);
        assert_eq!(state.record_oracle_call(), 2);
        assert_eq!(state.oracle_calls(), 2);
        assert_eq!(Rejection::OutOfScope(9).to_string(), "node 9 is out of scope");
    }
}
