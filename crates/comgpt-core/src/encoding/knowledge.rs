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

//! Supplementary knowledge: explicit per-candidate connectivity summaries

use std::collections::HashSet;

use super::incident::{join_ids, list_ids};
use crate::graph::{Graph, NodeId};

/// Which outside links of a candidate are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionScope {
    /// Only links to other listed candidates
    Candidates,
    /// Every link leaving the community
    All,
}

/// Summarise how each candidate connects to the community and beyond.
pub fn knowledge_text(
    graph: &Graph,
    members: &[NodeId],
    outside: &[NodeId],
    candidates: &[NodeId],
    scope: ConnectionScope,
) -> String {
    let member_set: HashSet<NodeId> = members.iter().copied().collect();
    let candidate_set: HashSet<NodeId> = candidates.iter().copied().collect();

    let mut text = format!(
        "Supplementary knowledge: Nodes in the current community: {}. The outside nodes contain: {}.",
        list_ids(members),
        list_ids(outside)
    );

    for &candidate in candidates {
        let neighbors = graph.neighbors(candidate);
        let inside: Vec<NodeId> = members
            .iter()
            .copied()
            .filter(|member| neighbors.contains(member))
            .collect();
        let beyond: Vec<NodeId> = neighbors
            .iter()
            .copied()
            .filter(|node| !member_set.contains(node))
            .filter(|node| scope == ConnectionScope::All || candidate_set.contains(node))
            .collect();

        text.push_str(&format!(
            " Node {} is connected to nodes within the community: {}.",
            candidate,
            or_null(&inside)
        ));
        text.push_str(&format!(
            " Node {} is connected to nodes outside community: {}.",
            candidate,
            or_null(&beyond)
        ));
    }

    text
}

fn or_null(ids: &[NodeId]) -> String {
    if ids.is_empty() {
        "null".to_string()
    } else {
        join_ids(ids)
    }
}
