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

//! Candidate generation around a community
//!
//! Frontiers are returned in ascending id order. Rankings sort by projected
//! cohesion, highest first, and break ties by ascending node id.

use std::collections::{BTreeSet, HashSet};

use crate::cohesion::{cohesion, cohesion_with};
use crate::community::Community;
use crate::graph::{Graph, NodeId};

/// A frontier node with the cohesion the community would have after adding it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub node: NodeId,
    pub score: f64,
}

/// Nodes adjacent to any member, members excluded
pub fn first_order_neighbors(community: &Community, graph: &Graph) -> Vec<NodeId> {
    let members = community.unique_members();
    frontier(members.iter().copied(), &members, graph)
}

/// Neighbors of the first-order frontier, members excluded
pub fn second_order_neighbors(community: &Community, graph: &Graph) -> Vec<NodeId> {
    let members = community.unique_members();
    let first = first_order_neighbors(community, graph);
    frontier(first.into_iter(), &members, graph)
}

fn frontier(
    sources: impl Iterator<Item = NodeId>,
    excluded: &HashSet<NodeId>,
    graph: &Graph,
) -> Vec<NodeId> {
    let mut reached = BTreeSet::new();
    for node in sources {
        reached.extend(
            graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(|neighbor| !excluded.contains(neighbor)),
        );
    }
    reached.into_iter().collect()
}

/// Score every first-order neighbor, best first
pub fn score_candidates(community: &Community, graph: &Graph) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = first_order_neighbors(community, graph)
        .into_iter()
        .map(|node| ScoredCandidate {
            node,
            score: cohesion_with(community.members(), node, graph),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.node.cmp(&b.node)));
    scored
}

/// Top `limit` candidates whose addition strictly raises cohesion
pub fn rank_candidates(community: &Community, graph: &Graph, limit: usize) -> Vec<NodeId> {
    let current = cohesion(community.members(), graph);
    score_candidates(community, graph)
        .into_iter()
        .filter(|candidate| candidate.score > current)
        .take(limit)
        .map(|candidate| candidate.node)
        .collect()
}

/// Top `limit` candidates regardless of gain, used by the backfill phase
pub fn rank_all_candidates(community: &Community, graph: &Graph, limit: usize) -> Vec<NodeId> {
    score_candidates(community, graph)
        .into_iter()
        .take(limit)
        .map(|candidate| candidate.node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{barbell, ring_plus_hub};

    #[test]
    fn test_frontiers_exclude_members() {
        let graph = barbell();
        let community = Community::from_members(vec![1, 2]);

        let first = first_order_neighbors(&community, &graph);
        assert_eq!(first, vec![3, 6]);

        let second = second_order_neighbors(&community, &graph);
        assert_eq!(second, vec![4]);

        for node in first.iter().chain(second.iter()) {
            assert!(!community.contains(*node));
        }
    }

    #[test]
    fn test_frontiers_are_idempotent() {
        let graph = barbell();
        let community = Community::from_members(vec![3, 4]);

        assert_eq!(
            first_order_neighbors(&community, &graph),
            first_order_neighbors(&community, &graph)
        );
        assert_eq!(
            second_order_neighbors(&community, &graph),
            second_order_neighbors(&community, &graph)
        );
    }

    #[test]
    fn test_rank_candidates_only_keeps_positive_gain() {
        let graph = barbell();
        let community = Community::from_members(vec![1, 2, 3]);
        let current = cohesion(community.members(), &graph);

        // {1,2,3,6}: ein 4, eout 1 -> 4.0; {1,2,3,4}: ein 4, eout 3 -> 1.33 < 1.5
        let ranked = rank_candidates(&community, &graph, 10);
        assert_eq!(ranked, vec![6]);
        for node in ranked {
            assert!(cohesion_with(community.members(), node, &graph) > current);
        }
    }

    #[test]
    fn test_ranked_candidates_always_gain() {
        let fixtures = vec![
            (
                barbell(),
                vec![vec![1], vec![1, 2], vec![3, 4], vec![4, 5, 7], vec![1, 2, 3, 4], vec![2, 2, 3]],
            ),
            (
                ring_plus_hub(),
                vec![vec![1], vec![6], vec![1, 6], vec![1, 2, 3], vec![1, 6, 2, 3], vec![2, 4]],
            ),
        ];

        for (graph, communities) in fixtures {
            for members in communities {
                let community = Community::from_members(members);
                let current = cohesion(community.members(), &graph);

                for node in rank_candidates(&community, &graph, 10) {
                    assert!(!community.contains(node));
                    assert!(
                        cohesion_with(community.members(), node, &graph) > current,
                        "node {} does not raise cohesion of {:?}",
                        node,
                        community.members()
                    );
                }
            }
        }
    }

    #[test]
    fn test_rank_all_candidates_keeps_negative_gain() {
        let graph = barbell();
        let community = Community::from_members(vec![1, 2, 3]);

        assert_eq!(rank_all_candidates(&community, &graph, 10), vec![6, 4]);
        assert_eq!(rank_all_candidates(&community, &graph, 1), vec![6]);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let graph = Graph::from_edges(vec![(1, 9), (1, 5), (1, 7)]);
        let community = Community::seed(1);

        let scored = score_candidates(&community, &graph);
        let order: Vec<NodeId> = scored.iter().map(|c| c.node).collect();
        assert_eq!(order, vec![5, 7, 9]);
    }

    #[test]
    fn test_isolated_seed_has_no_candidates() {
        let graph = Graph::from_parts(vec![1], vec![(2, 3)]);
        let community = Community::seed(1);

        assert!(first_order_neighbors(&community, &graph).is_empty());
        assert!(rank_candidates(&community, &graph, 5).is_empty());
        assert!(rank_all_candidates(&community, &graph, 5).is_empty());
    }
}
