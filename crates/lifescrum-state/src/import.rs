//! Import modes and story merging.

use lifescrum_core::ScrumError;
use lifescrum_domain::Story;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Replace every collection present in the payload.
    #[default]
    Overwrite,
    /// Merge stories by id, replace everything else.
    Merge,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Overwrite => f.write_str("overwrite"),
            ImportMode::Merge => f.write_str("merge"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(ImportMode::Overwrite),
            "merge" => Ok(ImportMode::Merge),
            _ => Err(ScrumError::Validation(format!(
                "Invalid import mode '{}'. Valid values: overwrite, merge",
                s
            ))),
        }
    }
}

/// Counts reported back after an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub mode: ImportMode,
    /// Stories that are not tombstoned after the import.
    pub stories: usize,
    pub roles: usize,
    pub labels: usize,
    pub visions: usize,
}

/// Decides which side of an id collision survives a merge.
pub trait ConflictResolver: Send + Sync {
    fn prefer_imported(&self, existing: &Story, imported: &Story) -> bool;

    fn explain_resolution(&self, existing: &Story, imported: &Story) -> String;
}

/// Newer `updatedAt` (then `createdAt`, then the epoch) wins; ties go to the import.
pub struct LastWriteWinsResolver;

impl ConflictResolver for LastWriteWinsResolver {
    fn prefer_imported(&self, existing: &Story, imported: &Story) -> bool {
        imported.last_modified() >= existing.last_modified()
    }

    fn explain_resolution(&self, existing: &Story, imported: &Story) -> String {
        let (ours, theirs) = (existing.last_modified(), imported.last_modified());
        if theirs > ours {
            format!("Imported story is newer ({} vs {}) - using import", theirs, ours)
        } else if theirs < ours {
            format!("Existing story is newer ({} vs {}) - keeping it", ours, theirs)
        } else {
            "Timestamps are equal - using import".to_string()
        }
    }
}

/// Union of both sides keyed by id.
///
/// Existing stories keep their position; stories only in the import are
/// appended in import order.
pub fn merge_stories(
    existing: &[Story],
    imported: Vec<Story>,
    resolver: &dyn ConflictResolver,
) -> Vec<Story> {
    let mut merged: Vec<Story> = existing.to_vec();
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();

    for story in imported {
        match index.get(&story.id) {
            Some(&i) => {
                tracing::debug!(
                    "Merge conflict on {}: {}",
                    story.id,
                    resolver.explain_resolution(&merged[i], &story)
                );
                if resolver.prefer_imported(&merged[i], &story) {
                    merged[i] = story;
                }
            }
            None => {
                index.insert(story.id.clone(), merged.len());
                merged.push(story);
            }
        }
    }

    merged
}
