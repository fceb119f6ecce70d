//! Parses backup files.
//!
//! Parsing is all-or-nothing: a payload either decodes completely or is
//! rejected with `ScrumError::Format`.

use lifescrum_core::{ScrumError, ScrumResult};
use serde_json::Value;

use super::models::ImportPayload;
use crate::Story;

pub struct BackupImporter;

impl BackupImporter {
    /// Accepts a bare array of stories or an object with a `stories` array.
    pub fn parse(json: &str) -> ScrumResult<ImportPayload> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ScrumError::Format(format!("Invalid JSON: {}", e)))?;

        match value {
            Value::Array(_) => {
                let stories: Vec<Story> = serde_json::from_value(value)
                    .map_err(|e| ScrumError::Format(format!("Invalid story: {}", e)))?;
                Ok(ImportPayload::stories_only(stories))
            }
            Value::Object(_) => {
                if !value.get("stories").is_some_and(Value::is_array) {
                    return Err(ScrumError::Format(
                        "Backup object has no stories array".to_string(),
                    ));
                }
                serde_json::from_value(value)
                    .map_err(|e| ScrumError::Format(format!("Invalid backup: {}", e)))
            }
            _ => Err(ScrumError::Format(
                "Backup must be an array or an object".to_string(),
            )),
        }
    }
}

pub fn parse_backup(json: &str) -> ScrumResult<ImportPayload> {
    BackupImporter::parse(json)
}
