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

//! Cohesion metric (M) of a node subset
//!
//! `M = (ein / eout) * (distinct / len)` where `ein` counts edges with both
//! ends in the subset and `eout` counts edges with exactly one end in it. The
//! second factor penalises sequences that repeat members. A subset without
//! external edges cannot be ranked by this ratio and scores
//! [`DEGENERATE_COHESION`].

use std::collections::HashSet;
use std::iter;

use crate::graph::{Graph, NodeId};

/// Score of a subset with no external edges
pub const DEGENERATE_COHESION: f64 = -1.0;

/// Internal and boundary edge counts of a subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCounts {
    pub internal: usize,
    pub external: usize,
}

/// Count internal and boundary edges of a distinct node set
pub fn edge_counts(members: &HashSet<NodeId>, graph: &Graph) -> EdgeCounts {
    let mut internal_endpoints = 0;
    let mut external = 0;
    for &node in members {
        for neighbor in graph.neighbors(node) {
            if members.contains(neighbor) {
                internal_endpoints += 1;
            } else {
                external += 1;
            }
        }
    }

    EdgeCounts {
        internal: internal_endpoints / 2,
        external,
    }
}

/// Cohesion of a member sequence
pub fn cohesion(members: &[NodeId], graph: &Graph) -> f64 {
    score(members.iter().copied(), graph)
}

/// Cohesion of `members` after hypothetically appending `extra`
pub fn cohesion_with(members: &[NodeId], extra: NodeId, graph: &Graph) -> f64 {
    score(members.iter().copied().chain(iter::once(extra)), graph)
}

fn score(sequence: impl Iterator<Item = NodeId>, graph: &Graph) -> f64 {
    let mut len = 0usize;
    let mut distinct = HashSet::new();
    for node in sequence {
        len += 1;
        distinct.insert(node);
    }

    let counts = edge_counts(&distinct, graph);
    if counts.external == 0 {
        return DEGENERATE_COHESION;
    }

    let ratio = counts.internal as f64 / counts.external as f64;
    ratio * distinct.len() as f64 / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_tail() -> Graph {
        Graph::from_adjacency(vec![
            (1, vec![2, 3]),
            (2, vec![1, 3]),
            (3, vec![1, 2]),
            (4, vec![3]),
        ])
    }

    #[test]
    fn test_triangle_with_tail() {
        let graph = triangle_with_tail();
        let members: HashSet<NodeId> = [1, 2, 3].into_iter().collect();

        assert_eq!(
            edge_counts(&members, &graph),
            EdgeCounts {
                internal: 3,
                external: 1
            }
        );
        assert!((cohesion(&[1, 2, 3], &graph) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_subset_is_degenerate() {
        let graph = triangle_with_tail();

        assert_eq!(cohesion(&[1, 2, 3, 4], &graph), DEGENERATE_COHESION);
        assert_eq!(cohesion(&[], &graph), DEGENERATE_COHESION);

        let isolated = Graph::from_parts(vec![7], Vec::new());
        assert_eq!(cohesion(&[7], &isolated), DEGENERATE_COHESION);
    }

    #[test]
    fn test_repeats_are_penalised() {
        let graph = triangle_with_tail();

        let plain = cohesion(&[1, 2, 3], &graph);
        let repeated = cohesion(&[1, 2, 3, 3], &graph);
        assert!((repeated - plain * 3.0 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_cohesion_with_matches_appended_sequence() {
        let graph = triangle_with_tail();

        assert_eq!(cohesion_with(&[1, 2], 3, &graph), cohesion(&[1, 2, 3], &graph));
        // {1}: ein 0, eout 2
        assert_eq!(cohesion(&[1], &graph), 0.0);
        // {1,2}: ein 1, eout 2
        assert!((cohesion(&[1, 2], &graph) - 0.5).abs() < 1e-12);
    }
}
