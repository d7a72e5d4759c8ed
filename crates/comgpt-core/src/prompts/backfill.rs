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

//! Backfill prompts
//!
//! A backfill request asks whether any low-scoring frontier node still belongs
//! in the community. The wording leans toward refusal.

use crate::encoding::incident::list_ids;
use crate::graph::NodeId;

pub const BACKFILL_GUIDANCE: &str = "Definition of community: nodes in the same community are tightly connected, \
    while the nodes in different communities are sparsely connected. The more a node connects with nodes within a community, \
    the more it can increase the community's cohesion. Conversely, the more it connects with nodes outside the community, \
    the more it can decrease the community's cohesion. If you choose to add a node to the community, \
    it should make the connections within the community tighter.";

/// Assemble the request for one backfill step
pub fn backfill_request(description: &str, members: &[NodeId], candidates: &[NodeId]) -> String {
    let candidates = list_ids(candidates);
    let community = list_ids(members);

    format!(
        r#"(1) Graph data: {description}
(2) Prompt: {BACKFILL_GUIDANCE}
(3) Question: Please analyze whether these nodes {candidates} should be added to the community {community}. The probability of not adding nodes is higher, but it doesn't mean you always refuse to add nodes. If you think there is a suitable node, please output its node number."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backfill_request_mentions_both_sets() {
        let request = backfill_request("G describes a graph", &[1, 2], &[5, 8]);

        assert!(request.contains("these nodes [5, 8]"));
        assert!(request.contains("to the community [1, 2]"));
        assert!(request.contains("The probability of not adding nodes is higher"));
        assert!(request.contains(BACKFILL_GUIDANCE));
    }
}
