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

//! Chat-completion clients used behind the decision oracle

pub mod client;
pub mod config;
pub mod models;
pub mod openai_client;

pub use client::{BaseLlmClient, LlmClient};
pub use config::LlmConfig;
pub use models::Message;
pub use openai_client::OpenAiClient;
