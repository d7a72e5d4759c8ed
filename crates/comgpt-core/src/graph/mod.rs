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

//! Immutable undirected graph store
//!
//! The store is built once per dataset and shared read-only by every run.
//! Construction normalises the input: both directions of every edge are
//! present, self-loops are dropped and repeated entries collapse into a single
//! simple edge. Neighbor lists are kept in ascending id order.

pub mod loader;

use std::collections::{BTreeMap, BTreeSet};

/// Node identifier as it appears in the dataset files
pub type NodeId = u64;

/// Adjacency-list view of an undirected simple graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from an edge list. Nodes are created on first mention.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        Self::from_parts(std::iter::empty(), edges)
    }

    /// Build a graph from an explicit node list plus an edge list.
    ///
    /// Listed nodes exist even when no edge touches them.
    pub fn from_parts<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut sets: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for node in nodes {
            sets.entry(node).or_default();
        }
        for (u, v) in edges {
            sets.entry(u).or_default();
            sets.entry(v).or_default();
            if u == v {
                continue;
            }
            sets.entry(u).or_default().insert(v);
            sets.entry(v).or_default().insert(u);
        }

        let edge_count = sets.values().map(BTreeSet::len).sum::<usize>() / 2;
        let adjacency = sets
            .into_iter()
            .map(|(node, neighbors)| (node, neighbors.into_iter().collect()))
            .collect();

        Self {
            adjacency,
            edge_count,
        }
    }

    /// Build a graph from an adjacency mapping, which need not be symmetric.
    pub fn from_adjacency<I, L>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, L)>,
        L: IntoIterator<Item = NodeId>,
    {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (node, neighbors) in adjacency {
            nodes.push(node);
            edges.extend(neighbors.into_iter().map(|neighbor| (node, neighbor)));
        }
        Self::from_parts(nodes, edges)
    }

    /// Neighbors of `node`; empty for unknown nodes
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// All node ids in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Summary statistics used for logging a freshly loaded dataset
    pub fn stats(&self) -> GraphStats {
        let node_count = self.node_count();
        let max_degree = self.adjacency.values().map(Vec::len).max().unwrap_or(0);
        let avg_degree = if node_count > 0 {
            (2 * self.edge_count) as f64 / node_count as f64
        } else {
            0.0
        };
        let density = if node_count > 1 {
            (2 * self.edge_count) as f64 / (node_count * (node_count - 1)) as f64
        } else {
            0.0
        };

        GraphStats {
            node_count,
            edge_count: self.edge_count,
            avg_degree,
            max_degree,
            density,
        }
    }
}

/// Graph statistics
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}
