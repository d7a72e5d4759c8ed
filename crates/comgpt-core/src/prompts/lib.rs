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

//! Prompt builder implementation

use crate::community::Community;
use crate::encoding::GraphEncoding;
use crate::graph::{Graph, NodeId};
use crate::prompts::{backfill::backfill_request, select_node::selection_request, PromptStrategy};

/// Builds the oracle requests for the two expansion phases
pub trait PromptBuilder: Send + Sync {
    /// Request for choosing the next node among positive-gain candidates
    fn selection_prompt(&self, graph: &Graph, community: &Community, candidates: &[NodeId]) -> String;

    /// Request for reconsidering frontier nodes regardless of gain
    fn backfill_prompt(&self, graph: &Graph, community: &Community, candidates: &[NodeId]) -> String;
}

/// Default builder: a region encoding plus a selection guidance strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextPromptBuilder {
    pub encoding: GraphEncoding,
    pub strategy: PromptStrategy,
}

impl TextPromptBuilder {
    pub fn new(encoding: GraphEncoding, strategy: PromptStrategy) -> Self {
        Self { encoding, strategy }
    }
}

impl PromptBuilder for TextPromptBuilder {
    fn selection_prompt(&self, graph: &Graph, community: &Community, candidates: &[NodeId]) -> String {
        let description = self.encoding.describe_selection(graph, community, candidates);
        selection_request(&description, self.strategy, &community.distinct(), candidates)
    }

    fn backfill_prompt(&self, graph: &Graph, community: &Community, candidates: &[NodeId]) -> String {
        let description = self.encoding.describe_backfill(graph, community, candidates);
        backfill_request(&description, &community.distinct(), candidates)
    }
}
