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

//! Scripted collaborators for controller-level tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::community::Community;
use crate::errors::LlmResult;
use crate::graph::{Graph, NodeId};
use crate::oracle::DecisionOracle;
use crate::prompts::{PromptBuilder, CONSTRAINED_ANSWER_INSTRUCTION};

const SELECT_PREFIX: &str = "select:";
const BACKFILL_PREFIX: &str = "backfill:";

/// Writes bare candidate lists so scripted oracles can read them back
pub struct ListPrompts;

impl PromptBuilder for ListPrompts {
    fn selection_prompt(&self, _graph: &Graph, _community: &Community, candidates: &[NodeId]) -> String {
        format!("{}{}", SELECT_PREFIX, space_separated(candidates))
    }

    fn backfill_prompt(&self, _graph: &Graph, _community: &Community, candidates: &[NodeId]) -> String {
        format!("{}{}", BACKFILL_PREFIX, space_separated(candidates))
    }
}

fn space_separated(ids: &[NodeId]) -> String {
    ids.iter().map(|id| format!(" {}", id)).collect()
}

fn parse_ids(list: &str) -> Vec<NodeId> {
    list.split_whitespace().filter_map(|id| id.parse().ok()).collect()
}

/// Picks the highest-degree selection candidate (lowest id on ties) and
/// answers backfill requests from a script. Follow-up requests echo the
/// judgment back so the first integer in it becomes the answer.
pub struct HighestDegreeOracle {
    graph: Arc<Graph>,
    backfill_replies: Mutex<VecDeque<String>>,
    pub selections: AtomicUsize,
    pub backfills: AtomicUsize,
}

impl HighestDegreeOracle {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self {
            graph,
            backfill_replies: Mutex::new(VecDeque::new()),
            selections: AtomicUsize::new(0),
            backfills: AtomicUsize::new(0),
        }
    }

    pub fn with_backfill_replies(self, replies: &[&str]) -> Self {
        *self.backfill_replies.lock().unwrap() = replies.iter().map(|r| r.to_string()).collect();
        self
    }
}

#[async_trait]
impl DecisionOracle for HighestDegreeOracle {
    async fn decide(&self, request: &str) -> LlmResult<String> {
        if let Some(list) = request.strip_prefix(SELECT_PREFIX) {
            self.selections.fetch_add(1, Ordering::SeqCst);
            let chosen = parse_ids(list)
                .into_iter()
                .max_by(|a, b| {
                    self.graph
                        .degree(*a)
                        .cmp(&self.graph.degree(*b))
                        .then(b.cmp(a))
                })
                .map(|node| format!("Node {} has the most connections", node))
                .unwrap_or_else(|| "null".to_string());
            return Ok(chosen);
        }

        if request.starts_with(BACKFILL_PREFIX) {
            self.backfills.fetch_add(1, Ordering::SeqCst);
            let reply = self.backfill_replies.lock().unwrap().pop_front();
            return Ok(reply.unwrap_or_else(|| "null".to_string()));
        }

        Ok(echo(request))
    }
}

/// Answers every first-stage request with the next scripted reply, `null`
/// once the script runs out
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<String>>,
    pub requests: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn decide(&self, request: &str) -> LlmResult<String> {
        if request.ends_with(CONSTRAINED_ANSWER_INSTRUCTION) {
            return Ok(echo(request));
        }
        self.requests.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| "null".to_string()))
    }
}

fn echo(request: &str) -> String {
    request
        .trim_end_matches(CONSTRAINED_ANSWER_INSTRUCTION)
        .trim()
        .to_string()
}

/// Five-node ring 1..=5 with hub 6 attached to every ring node
pub fn ring_plus_hub() -> Graph {
    Graph::from_edges(vec![
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 1),
        (6, 1),
        (6, 2),
        (6, 3),
        (6, 4),
        (6, 5),
    ])
}

/// Two triangles joined by the bridge 3-4, plus a pendant 6 on node 1
pub fn barbell() -> Graph {
    Graph::from_edges(vec![
        (1, 2),
        (2, 3),
        (3, 1),
        (3, 4),
        (4, 5),
        (5, 7),
        (7, 4),
        (1, 6),
    ])
}
