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

//! Natural-language encoding of a graph region
//!
//! The oracle never sees the full graph. Each request carries the induced
//! subgraph of a small region around the community, written out node by node,
//! optionally followed by supplementary knowledge that spells out how every
//! candidate connects to the inside and the outside of the community.

pub mod incident;
pub mod knowledge;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::community::Community;
use crate::graph::{Graph, NodeId};

pub use incident::incident_text;
pub use knowledge::{ConnectionScope, knowledge_text};

/// Induced subgraph of a region, in a fixed node order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalGraph {
    nodes: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
}

impl LocalGraph {
    /// Induce the subgraph on `nodes`, keeping their first-seen order.
    pub fn induced(graph: &Graph, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut seen = HashSet::new();
        let nodes: Vec<NodeId> = nodes.into_iter().filter(|node| seen.insert(*node)).collect();

        let adjacency = nodes
            .iter()
            .map(|&node| {
                let inside = graph
                    .neighbors(node)
                    .iter()
                    .copied()
                    .filter(|neighbor| seen.contains(neighbor))
                    .collect();
                (node, inside)
            })
            .collect();

        Self { nodes, adjacency }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }
}

/// How the region around a community is written out for the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphEncoding {
    /// Induced adjacency only
    #[serde(rename = "incident")]
    Incident,
    /// Induced adjacency followed by per-candidate connectivity summaries
    #[default]
    #[serde(rename = "incident_with_knowledge")]
    IncidentWithKnowledge,
}

impl GraphEncoding {
    /// Region for a selection step: the community and its ranked candidates.
    pub fn describe_selection(
        &self,
        graph: &Graph,
        community: &Community,
        candidates: &[NodeId],
    ) -> String {
        let members = community.distinct();
        let local = LocalGraph::induced(
            graph,
            members.iter().chain(candidates.iter()).copied(),
        );
        let topology = incident_text(&local);

        match self {
            GraphEncoding::Incident => topology,
            GraphEncoding::IncidentWithKnowledge => format!(
                "{} {}",
                topology,
                knowledge_text(
                    graph,
                    &members,
                    candidates,
                    candidates,
                    ConnectionScope::Candidates
                )
            ),
        }
    }

    /// Region for a backfill step.
    ///
    /// Covers the community, the backfill candidates and every neighbor of
    /// those candidates. Supplementary knowledge is always attached since the
    /// decision hinges on how candidates connect outside the community.
    pub fn describe_backfill(
        &self,
        graph: &Graph,
        community: &Community,
        candidates: &[NodeId],
    ) -> String {
        let members = community.distinct();
        let member_set: HashSet<NodeId> = members.iter().copied().collect();
        let candidate_set: HashSet<NodeId> = candidates.iter().copied().collect();

        let mut extension: Vec<NodeId> = candidates
            .iter()
            .flat_map(|&candidate| graph.neighbors(candidate).iter().copied())
            .filter(|node| !member_set.contains(node) && !candidate_set.contains(node))
            .collect();
        extension.sort_unstable();
        extension.dedup();

        let local = LocalGraph::induced(
            graph,
            members
                .iter()
                .chain(candidates.iter())
                .chain(extension.iter())
                .copied(),
        );
        let outside: Vec<NodeId> = candidates.iter().chain(extension.iter()).copied().collect();

        format!(
            "{} {}",
            incident_text(&local),
            knowledge_text(graph, &members, &outside, candidates, ConnectionScope::All)
        )
    }
}
