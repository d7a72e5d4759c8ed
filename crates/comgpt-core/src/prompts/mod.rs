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

//! Prompt library for oracle interactions
//!
//! This module contains the requests sent to the decision oracle: node
//! selection with its guidance strategies, backfill, and the instruction that
//! turns a free-form judgment into a terse answer.

pub mod backfill;
pub mod lib;
pub mod select_node;

pub use lib::{PromptBuilder, TextPromptBuilder};
pub use select_node::PromptStrategy;

/// Appended to a first-stage reply to force a node number or `null`
pub const CONSTRAINED_ANSWER_INSTRUCTION: &str = "The above paragraph is used to determine if a node should be added \
    to the community and which one. If this paragraph determines that nodes can be added, please output nodes directly, \
    otherwise output null. The scope of your answer is limited to nodes or null. Please do not output anything other \
    than nodes or null.";
