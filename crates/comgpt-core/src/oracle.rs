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

//! Decision oracle contract and reply parsing
//!
//! The oracle is an opaque text-in, text-out capability. Each decision uses a
//! two-stage exchange: the first reply is a free-form judgment, which is sent
//! back with an instruction that forces a bare node number or `null`. The
//! node id is read from the second reply. Whether that id is acceptable is for
//! the caller to decide.

use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::errors::LlmResult;
use crate::graph::NodeId;
use crate::llm_client::LlmClient;
use crate::prompts::CONSTRAINED_ANSWER_INSTRUCTION;

const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an assistant that analyses graph structure to grow tightly connected communities.";

lazy_static! {
    static ref RE_THINK_TAGS: Regex = Regex::new(r"(?s)<think>.*?</think>").unwrap();
    static ref RE_NODE_ID: Regex = Regex::new(r"\d+").unwrap();
}

/// External decision capability consulted by the expansion controller
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    /// Answer one request. Transport failures are errors; any text is a reply.
    async fn decide(&self, request: &str) -> LlmResult<String>;
}

/// Oracle backed by a chat-completion client
pub struct LlmOracle {
    client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl LlmOracle {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

#[async_trait]
impl DecisionOracle for LlmOracle {
    async fn decide(&self, request: &str) -> LlmResult<String> {
        self.client.generate_text(&self.system_prompt, request).await
    }
}

/// First integer in a reply, reasoning blocks ignored. `None` means no action.
pub fn extract_node_id(reply: &str) -> Option<NodeId> {
    let visible = RE_THINK_TAGS.replace_all(reply, "");
    RE_NODE_ID
        .find(&visible)
        .and_then(|found| found.as_str().parse().ok())
}

/// Run the two-stage exchange for one request and extract the chosen node.
pub async fn consult(oracle: &dyn DecisionOracle, request: &str) -> LlmResult<Option<NodeId>> {
    let judgment = oracle.decide(request).await?;
    let follow_up = format!("{} {}", judgment, CONSTRAINED_ANSWER_INSTRUCTION);
    let answer = oracle.decide(&follow_up).await?;

    let node = extract_node_id(&answer);
    debug!("Oracle answered {:?} -> {:?}", answer, node);
    Ok(node)
}
