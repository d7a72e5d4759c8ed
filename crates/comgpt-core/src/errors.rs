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

use thiserror::Error;

use crate::graph::NodeId;

/// Base error type for community detection operations
#[derive(Debug, Error)]
pub enum ComGptError {
    #[error("Oracle transport error: {0}")]
    Llm(#[from] LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Seed node {node} is not part of the graph")]
    UnknownSeed { node: NodeId },

    #[error("Cannot evaluate an empty predicted community")]
    EmptyPrediction,

    #[error("Cannot evaluate against an empty ground-truth community")]
    EmptyGroundTruth,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// LLM-specific error types
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("LLM refused to generate a response: {message}")]
    Refusal { message: String },

    #[error("LLM returned an empty response: {message}")]
    EmptyResponse { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Invalid model configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Timeout error: {message}")]
    Timeout { message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },
}

/// Result type alias for community detection operations
pub type ComGptResult<T> = Result<T, ComGptError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;
