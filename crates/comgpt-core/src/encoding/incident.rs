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

//! Incident encoding: every node followed by the nodes it is connected to

use super::LocalGraph;
use crate::graph::NodeId;

/// Write out the induced adjacency of a region.
///
/// Every node and every induced edge appears, in the region's node order.
pub fn incident_text(local: &LocalGraph) -> String {
    let mut text = format!(
        "G describes a graph among nodes {}. In this graph:",
        join_ids(local.nodes())
    );

    for &node in local.nodes() {
        let neighbors = local.neighbors(node);
        if neighbors.is_empty() {
            text.push_str(&format!(" Node {} is not connected to any other node.", node));
        } else {
            text.push_str(&format!(
                " Node {} is connected to nodes {}.",
                node,
                join_ids(neighbors)
            ));
        }
    }

    text
}

pub(crate) fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bracketed list, e.g. `[1, 2, 3]`
pub(crate) fn list_ids(ids: &[NodeId]) -> String {
    format!("[{}]", join_ids(ids))
}
