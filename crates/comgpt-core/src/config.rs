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

//! Expansion configuration
//!
//! Every tunable of the engine lives here and is passed in at construction.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::ComGptResult;

pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;
pub const DEFAULT_ITERATIONS: usize = 2;
pub const DEFAULT_MAX_ORACLE_RETRIES: usize = 5;
pub const DEFAULT_DUPLICATE_FRACTION: f64 = 1.0 / 3.0;
pub const DEFAULT_PAUSE_EVERY: usize = 10;
pub const DEFAULT_PAUSE_DURATION: Duration = Duration::from_secs(10);

/// Configuration of the expansion controller and the run selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ExpansionConfig {
    /// Maximum number of ranked candidates shown to the oracle
    #[validate(range(min = 1))]
    pub candidate_limit: usize,
    /// Independent runs per seed
    #[validate(range(min = 1))]
    pub iterations: usize,
    /// Alternate selection with backfill phases
    pub backfill: bool,
    /// Attempts at obtaining a valid selection before giving up on the phase
    #[validate(range(min = 1))]
    pub max_oracle_retries: usize,
    /// Selection continues while `duplicates < len * duplicate_fraction`
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub duplicate_fraction: f64,
    /// Pause after this many oracle selections within a run. Retried
    /// attempts within one selection are not counted; `0` disables pausing.
    pub pause_every: usize,
    pub pause_duration: Duration,
    /// Runs executed at the same time; 1 runs them one after another
    #[validate(range(min = 1))]
    pub max_concurrent_runs: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            iterations: DEFAULT_ITERATIONS,
            backfill: true,
            max_oracle_retries: DEFAULT_MAX_ORACLE_RETRIES,
            duplicate_fraction: DEFAULT_DUPLICATE_FRACTION,
            pause_every: DEFAULT_PAUSE_EVERY,
            pause_duration: DEFAULT_PAUSE_DURATION,
            max_concurrent_runs: 1,
        }
    }
}

impl ExpansionConfig {
    /// Read `COMGPT_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            candidate_limit: env_or("COMGPT_CANDIDATE_LIMIT", defaults.candidate_limit),
            iterations: env_or("COMGPT_ITERATIONS", defaults.iterations),
            backfill: env_or("COMGPT_BACKFILL", defaults.backfill),
            max_oracle_retries: env_or("COMGPT_MAX_ORACLE_RETRIES", defaults.max_oracle_retries),
            duplicate_fraction: env_or("COMGPT_DUPLICATE_FRACTION", defaults.duplicate_fraction),
            pause_every: env_or("COMGPT_PAUSE_EVERY", defaults.pause_every),
            pause_duration: Duration::from_secs(env_or(
                "COMGPT_PAUSE_SECS",
                defaults.pause_duration.as_secs(),
            )),
            max_concurrent_runs: env_or("COMGPT_MAX_CONCURRENT_RUNS", defaults.max_concurrent_runs),
        }
    }

    pub fn with_candidate_limit(mut self, candidate_limit: usize) -> Self {
        self.candidate_limit = candidate_limit;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_backfill(mut self, backfill: bool) -> Self {
        self.backfill = backfill;
        self
    }

    pub fn with_max_oracle_retries(mut self, max_oracle_retries: usize) -> Self {
        self.max_oracle_retries = max_oracle_retries;
        self
    }

    pub fn with_pause(mut self, every: usize, duration: Duration) -> Self {
        self.pause_every = every;
        self.pause_duration = duration;
        self
    }

    pub fn with_max_concurrent_runs(mut self, max_concurrent_runs: usize) -> Self {
        self.max_concurrent_runs = max_concurrent_runs;
        self
    }

    /// Validate and return the configuration
    pub fn validated(self) -> ComGptResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
