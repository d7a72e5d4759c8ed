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

//! Node selection prompts

use serde::{Deserialize, Serialize};

use crate::encoding::incident::list_ids;
use crate::graph::NodeId;

const FEW_SHOT_EXAMPLES: &str = r#"Here are some examples for your reference.
Example 1:
(1) Graph data: G describes a graph among nodes a, b, c, d, f, g, h, j. In this graph: Node a is connected to nodes b, d, g. Node b is connected to nodes a, c, d, f, h, j. Node c is connected to nodes b, d. Node d is connected to nodes a, b, c, f, g. Node f is connected to nodes b, d, j. Node g is connected to nodes a, d. Node h is connected to nodes b. Node j is connected to nodes b, f. Supplementary knowledge: Nodes in the current community: [a, b]. The outside nodes contain: [c, d, f, g, h, j]. Node d is connected to nodes within the community: a, b. Node d is connected to nodes outside community: c, f, g. Node h is connected to nodes within the community: b. Node h is connected to nodes outside community: null.
(2) Question: You're doing local community detection. Based on the graph data, please select a node that you think is most likely to belong to the current community [a, b] for community expansion.
(3) Answer: Node d.
Example 2:
(1) Graph data: G describes a graph among nodes a, b, c, d, e, f. In this graph: Node a is connected to nodes b, c, d, e. Node b is connected to nodes a, c. Node c is connected to nodes a, b, d, f. Node d is connected to nodes a, c. Node e is connected to nodes a, f. Node f is connected to nodes c, e. Supplementary knowledge: Nodes in the current community: [a, b, c]. The outside nodes contain: [d, e, f]. Node d is connected to nodes within the community: a, c. Node d is connected to nodes outside community: null. Node e is connected to nodes within the community: a. Node e is connected to nodes outside community: f.
(2) Question: You're doing local community detection. Based on the graph data, please select a node that you think is most likely to belong to the current community [a, b, c] for community expansion.
(3) Answer: Node d."#;

/// Guidance attached to a node selection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromptStrategy {
    #[serde(rename = "zero_shot")]
    ZeroShot,
    #[serde(rename = "few_shot")]
    FewShot,
    #[serde(rename = "chain_of_thought")]
    ChainOfThought,
    #[serde(rename = "build_a_graph")]
    BuildAGraph,
    /// Two structural guides for picking among the outside nodes
    #[default]
    #[serde(rename = "node_selection_guides")]
    NodeSelectionGuides,
}

impl PromptStrategy {
    pub fn guidance(&self, candidates: &[NodeId]) -> String {
        match self {
            PromptStrategy::ZeroShot => "null".to_string(),
            PromptStrategy::FewShot => FEW_SHOT_EXAMPLES.to_string(),
            PromptStrategy::ChainOfThought => "Let's think step by step.".to_string(),
            PromptStrategy::BuildAGraph => {
                "Let's construct a graph with the nodes and edges first.".to_string()
            }
            PromptStrategy::NodeSelectionGuides => format!(
                "Please find the node that best meets these two guides from the outside nodes {} to answer the question. \
                 Guide 1: The more an outside node is connected to other outside nodes, the higher the likelihood of its selection. \
                 Guide 2: Prioritize selecting outside nodes that are connected to multiple nodes within the community.",
                list_ids(candidates)
            ),
        }
    }
}

impl std::str::FromStr for PromptStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero_shot" | "zeroshot" => Ok(PromptStrategy::ZeroShot),
            "few_shot" | "fewshot" => Ok(PromptStrategy::FewShot),
            "chain_of_thought" | "cot" => Ok(PromptStrategy::ChainOfThought),
            "build_a_graph" | "bag" => Ok(PromptStrategy::BuildAGraph),
            "node_selection_guides" | "nsg" => Ok(PromptStrategy::NodeSelectionGuides),
            _ => Err(format!("Invalid prompt strategy: {}", s)),
        }
    }
}

/// Assemble the request for one selection step
pub fn selection_request(
    description: &str,
    strategy: PromptStrategy,
    members: &[NodeId],
    candidates: &[NodeId],
) -> String {
    let guidance = strategy.guidance(candidates);
    let community = list_ids(members);

    format!(
        r#"(1) Graph data: {description}
(2) Prompt: {guidance}
(3) Question: You're doing local community detection. Based on the graph data and prompt, please select a node that you think is most likely to belong to the current community {community} for community expansion. Provide a detailed explanation."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("nsg".parse::<PromptStrategy>().unwrap(), PromptStrategy::NodeSelectionGuides);
        assert_eq!("CoT".parse::<PromptStrategy>().unwrap(), PromptStrategy::ChainOfThought);
        assert_eq!("few_shot".parse::<PromptStrategy>().unwrap(), PromptStrategy::FewShot);
        assert!("unknown".parse::<PromptStrategy>().is_err());
    }

    #[test]
    fn test_guides_name_the_candidates() {
        let guidance = PromptStrategy::NodeSelectionGuides.guidance(&[7, 9]);
        assert!(guidance.contains("[7, 9]"));
        assert_eq!(PromptStrategy::ZeroShot.guidance(&[7]), "null");
    }

    #[test]
    fn test_selection_request_layout() {
        let request = selection_request("G describes a graph", PromptStrategy::ChainOfThought, &[1, 2], &[3]);

        assert!(request.starts_with("(1) Graph data: G describes a graph\n(2) Prompt: Let's think step by step.\n(3) Question:"));
        assert!(request.contains("current community [1, 2]"));
    }
}
