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

//! Dataset readers for edge-list and node-list text files

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Graph, NodeId};
use crate::errors::{ComGptError, ComGptResult};

/// Parse an edge list: one whitespace-separated pair per line.
///
/// Blank lines and `#` comment lines are skipped.
pub fn parse_edge_list(text: &str) -> ComGptResult<Vec<(NodeId, NodeId)>> {
    let mut edges = Vec::new();
    for (index, line) in data_lines(text) {
        let mut tokens = line.split_whitespace();
        let (Some(u), Some(v), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ComGptError::Parse {
                line: index + 1,
                message: format!("expected two node ids, found '{}'", line),
            });
        };
        edges.push((parse_node(u, index)?, parse_node(v, index)?));
    }
    Ok(edges)
}

/// Parse a node list: one id per line.
pub fn parse_node_list(text: &str) -> ComGptResult<Vec<NodeId>> {
    data_lines(text)
        .map(|(index, line)| parse_node(line, index))
        .collect()
}

/// Load a graph from a single edge-list file (large datasets)
pub fn load_edge_list(path: impl AsRef<Path>) -> ComGptResult<Graph> {
    let text = fs::read_to_string(path.as_ref())?;
    let graph = Graph::from_edges(parse_edge_list(&text)?);
    debug!(
        "Loaded {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.as_ref().display()
    );
    Ok(graph)
}

/// Load a graph from a node-list file plus an edge-list file (small datasets)
pub fn load_graph(nodes_path: impl AsRef<Path>, edges_path: impl AsRef<Path>) -> ComGptResult<Graph> {
    let nodes = parse_node_list(&fs::read_to_string(nodes_path.as_ref())?)?;
    let edges = parse_edge_list(&fs::read_to_string(edges_path.as_ref())?)?;
    let graph = Graph::from_parts(nodes, edges);
    debug!(
        "Loaded {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        edges_path.as_ref().display()
    );
    Ok(graph)
}

fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

pub(crate) fn parse_node(token: &str, index: usize) -> ComGptResult<NodeId> {
    token.parse().map_err(|_| ComGptError::Parse {
        line: index + 1,
        message: format!("invalid node id '{}'", token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_edge_list() {
        let text = "# comment\n1 2\n\n2\t3\n";
        let edges = parse_edge_list(text).unwrap();
        assert_eq!(edges, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_parse_edge_list_rejects_malformed_line() {
        let err = parse_edge_list("1 2\n3\n").unwrap_err();
        match err {
            ComGptError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_edge_list("1 x\n").is_err());
        assert!(parse_edge_list("1 2 3\n").is_err());
    }

    #[test]
    fn test_parse_node_list() {
        assert_eq!(parse_node_list("5\n 6 \n\n7").unwrap(), vec![5, 6, 7]);
        assert!(parse_node_list("-1").is_err());
    }

    #[test]
    fn test_load_graph_from_files() {
        let mut nodes = tempfile::NamedTempFile::new().unwrap();
        writeln!(nodes, "1\n2\n3\n4").unwrap();
        let mut edges = tempfile::NamedTempFile::new().unwrap();
        writeln!(edges, "1 2\n2 3").unwrap();

        let graph = load_graph(nodes.path(), edges.path()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(2), &[1, 3]);
        assert_eq!(graph.degree(4), 0);

        let graph = load_edge_list(edges.path()).unwrap();
        assert_eq!(graph.node_count(), 3);
    }
}
