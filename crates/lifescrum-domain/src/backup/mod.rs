//! Backup import/export.
//!
//! A backup is a pretty-printed JSON object holding every collection and the
//! settings. Older backups are a bare array of stories.

pub mod exporter;
pub mod importer;
pub mod models;

pub use exporter::BackupExporter;
pub use importer::{parse_backup, BackupImporter};
pub use models::{Backup, ImportPayload};
