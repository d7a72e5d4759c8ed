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

//! Ground-truth community files
//!
//! Two layouts are supported. The line format holds one community per line as
//! whitespace-separated ids. The CSV format holds comma-separated membership
//! rows that alternate with separator rows, so only odd-numbered lines
//! (first, third, ...) carry communities.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ComGptError, ComGptResult};
use crate::graph::loader::parse_node;
use crate::graph::NodeId;

/// On-disk layout of a ground-truth file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruthFormat {
    Lines,
    Csv,
}

impl FromStr for TruthFormat {
    type Err = ComGptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" | "txt" => Ok(TruthFormat::Lines),
            "csv" => Ok(TruthFormat::Csv),
            other => Err(ComGptError::Config {
                message: format!("unknown ground-truth format '{}'", other),
            }),
        }
    }
}

/// How the reference community of a seed is chosen when several contain it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruthResolution {
    /// The first community that contains the seed
    #[default]
    FirstMatch,
    /// Union of every community that contains the seed
    Union,
}

impl FromStr for TruthResolution {
    type Err = ComGptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "first_match" => Ok(TruthResolution::FirstMatch),
            "union" => Ok(TruthResolution::Union),
            other => Err(ComGptError::Config {
                message: format!("unknown ground-truth resolution '{}'", other),
            }),
        }
    }
}

/// Reference communities of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub communities: Vec<Vec<NodeId>>,
}

impl GroundTruth {
    pub fn new(communities: Vec<Vec<NodeId>>) -> Self {
        Self { communities }
    }

    /// Parse the line format; blank lines are skipped
    pub fn parse_lines(text: &str) -> ComGptResult<Self> {
        let mut communities = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let community = line
                .split_whitespace()
                .map(|token| parse_node(token, index))
                .collect::<ComGptResult<Vec<_>>>()?;
            communities.push(community);
        }
        Ok(Self { communities })
    }

    /// Parse the alternating-row CSV format
    pub fn parse_csv(text: &str) -> ComGptResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut communities = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(1);
            if line % 2 == 0 {
                continue;
            }

            let community = record
                .iter()
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(|field| parse_node(field, line - 1))
                .collect::<ComGptResult<Vec<_>>>()?;
            if !community.is_empty() {
                communities.push(community);
            }
        }
        Ok(Self { communities })
    }

    pub fn load(path: impl AsRef<Path>, format: TruthFormat) -> ComGptResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let truth = match format {
            TruthFormat::Lines => Self::parse_lines(&text)?,
            TruthFormat::Csv => Self::parse_csv(&text)?,
        };
        debug!(
            "Loaded {} ground-truth communities from {}",
            truth.communities.len(),
            path.as_ref().display()
        );
        Ok(truth)
    }

    /// Reference community for `seed`
    pub fn resolve(&self, seed: NodeId, resolution: TruthResolution) -> ComGptResult<Vec<NodeId>> {
        let mut containing = self
            .communities
            .iter()
            .filter(|community| community.contains(&seed));

        let resolved = match resolution {
            TruthResolution::FirstMatch => containing.next().cloned().unwrap_or_default(),
            TruthResolution::Union => containing
                .flatten()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        if resolved.is_empty() {
            return Err(ComGptError::EmptyGroundTruth);
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_lines() {
        let truth = GroundTruth::parse_lines("1 2 3\n\n4\t5\n").unwrap();
        assert_eq!(truth.communities, vec![vec![1, 2, 3], vec![4, 5]]);
        assert!(GroundTruth::parse_lines("1 x").is_err());
    }

    #[test]
    fn test_parse_csv_skips_separator_rows() {
        let text = "1,2,3\n-\n4,5\n-\n6,7,8,9\n";
        let truth = GroundTruth::parse_csv(text).unwrap();
        assert_eq!(
            truth.communities,
            vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8, 9]]
        );
    }

    #[test]
    fn test_resolve_first_match_and_union() {
        let truth = GroundTruth::new(vec![vec![1, 2], vec![3, 1, 4], vec![5]]);

        assert_eq!(truth.resolve(1, TruthResolution::FirstMatch).unwrap(), vec![1, 2]);
        assert_eq!(truth.resolve(1, TruthResolution::Union).unwrap(), vec![1, 2, 3, 4]);
        assert!(matches!(
            truth.resolve(9, TruthResolution::Union),
            Err(ComGptError::EmptyGroundTruth)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10,11\n,\n12,13").unwrap();

        let truth = GroundTruth::load(file.path(), TruthFormat::Csv).unwrap();
        assert_eq!(truth.communities, vec![vec![10, 11], vec![12, 13]]);
        assert_eq!("union".parse::<TruthResolution>().unwrap(), TruthResolution::Union);
        assert_eq!("csv".parse::<TruthFormat>().unwrap(), TruthFormat::Csv);
    }
}
