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

//! Community membership owned by a single expansion run

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// Ordered membership of a growing community.
///
/// The sequence may hold repeated ids: growth that keeps re-selecting members
/// is how a run detects that it is looping. Membership itself is the set of
/// distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    members: Vec<NodeId>,
}

impl Community {
    /// Single-node community around `seed`
    pub fn seed(seed: NodeId) -> Self {
        Self {
            members: vec![seed],
        }
    }

    pub fn from_members(members: Vec<NodeId>) -> Self {
        Self { members }
    }

    /// Append a node; the only mutation a run performs
    pub fn push(&mut self, node: NodeId) {
        self.members.push(node);
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// Length of the sequence, repeats included
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn unique_members(&self) -> HashSet<NodeId> {
        self.members.iter().copied().collect()
    }

    pub fn unique_count(&self) -> usize {
        self.unique_members().len()
    }

    /// Number of repeated entries in the sequence
    pub fn duplicates(&self) -> usize {
        self.len() - self.unique_count()
    }

    /// True while `duplicates < len * fraction`
    pub fn within_duplicate_budget(&self, fraction: f64) -> bool {
        (self.duplicates() as f64) < self.len() as f64 * fraction
    }

    /// Distinct members in first-seen order
    pub fn distinct(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.members
            .iter()
            .copied()
            .filter(|node| seen.insert(*node))
            .collect()
    }

    pub fn into_members(self) -> Vec<NodeId> {
        self.members
    }
}

/// A finalized community together with its cohesion score.
///
/// Records are produced at the end of a run (or as in-run snapshots) and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub community: Community,
    pub cohesion: f64,
}

impl RunRecord {
    pub fn new(community: Community, cohesion: f64) -> Self {
        Self {
            community,
            cohesion,
        }
    }
}

/// Pick the record with the highest cohesion; ties keep the first one seen.
pub fn best_record(records: impl IntoIterator<Item = RunRecord>) -> Option<RunRecord> {
    records.into_iter().fold(None, |best, record| match best {
        Some(current) if record.cohesion <= current.cohesion => Some(current),
        _ => Some(record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tracking() {
        let mut community = Community::seed(1);
        assert_eq!(community.duplicates(), 0);
        assert!(community.within_duplicate_budget(1.0 / 3.0));

        community.push(2);
        community.push(1);
        assert_eq!(community.len(), 3);
        assert_eq!(community.unique_count(), 2);
        assert_eq!(community.duplicates(), 1);
        // 1 < 3 / 3 is false
        assert!(!community.within_duplicate_budget(1.0 / 3.0));
        assert_eq!(community.distinct(), vec![1, 2]);
    }

    #[test]
    fn test_best_record_keeps_first_maximum() {
        let records = vec![
            RunRecord::new(Community::from_members(vec![1]), 0.5),
            RunRecord::new(Community::from_members(vec![1, 2]), 2.0),
            RunRecord::new(Community::from_members(vec![1, 3]), 2.0),
            RunRecord::new(Community::from_members(vec![1, 4]), -1.0),
        ];

        let best = best_record(records).unwrap();
        assert_eq!(best.community.members(), &[1, 2]);
        assert!(best_record(Vec::new()).is_none());
    }
}
