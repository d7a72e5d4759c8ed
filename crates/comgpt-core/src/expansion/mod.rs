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

//! Expansion of one community from a seed node
//!
//! A run alternates two phases. SELECT grows the community one node at a time
//! from the positive-gain candidates, asking the oracle whenever more than one
//! candidate is available. BACKFILL offers the whole first-order frontier to
//! the oracle once, biased toward refusal, and hands control back to SELECT
//! when a node is accepted. Every time SELECT ends in backfill mode the
//! community is snapshotted, and the run returns the most cohesive snapshot.

pub mod controller;
pub mod state;

pub use controller::ExpansionController;
pub use state::{BackfillOutcome, Phase, Rejection, RunState};
