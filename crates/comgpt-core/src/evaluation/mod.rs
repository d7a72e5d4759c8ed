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

//! Scoring of detected communities against ground truth

pub mod ground_truth;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ComGptError, ComGptResult};
use crate::graph::NodeId;
use crate::helpers::round_to;

pub use ground_truth::{GroundTruth, TruthFormat, TruthResolution};

/// Guards F1 when precision and recall are both zero
const F1_EPSILON: f64 = 1e-9;
const SCORE_DECIMALS: i32 = 4;

/// Precision, recall, F1 and Jaccard, each rounded to four decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub jaccard: f64,
}

/// Compare a predicted community with a ground-truth community.
///
/// Both sides are reduced to their distinct members first.
pub fn evaluate(predicted: &[NodeId], truth: &[NodeId]) -> ComGptResult<Scores> {
    if predicted.is_empty() {
        return Err(ComGptError::EmptyPrediction);
    }
    if truth.is_empty() {
        return Err(ComGptError::EmptyGroundTruth);
    }

    let predicted: HashSet<NodeId> = predicted.iter().copied().collect();
    let truth: HashSet<NodeId> = truth.iter().copied().collect();
    let overlap = predicted.intersection(&truth).count() as f64;
    let union = predicted.union(&truth).count() as f64;

    let precision = overlap / predicted.len() as f64;
    let recall = overlap / truth.len() as f64;
    let f1 = 2.0 * precision * recall / (precision + recall + F1_EPSILON);
    let jaccard = overlap / union;

    Ok(Scores {
        precision: round_to(precision, SCORE_DECIMALS),
        recall: round_to(recall, SCORE_DECIMALS),
        f1: round_to(f1, SCORE_DECIMALS),
        jaccard: round_to(jaccard, SCORE_DECIMALS),
    })
}
