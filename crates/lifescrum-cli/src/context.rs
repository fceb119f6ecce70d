use anyhow::{anyhow, bail};
use lifescrum_core::AppConfig;
use lifescrum_domain::{ColumnId, LabelId, RoleId, SprintId, Story, VisionId};
use lifescrum_persistence::JsonDirStore;
use lifescrum_state::Store;
use std::path::{Path, PathBuf};

pub struct CliContext {
    pub store: Store,
    data_dir: PathBuf,
}

impl CliContext {
    /// Opens the store in `data_dir`, or the configured directory when `None`.
    pub fn open(data_dir: Option<PathBuf>) -> Self {
        let mut config = AppConfig::load();
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        let dir = config.effective_data_dir();
        tracing::debug!("Using data directory {}", dir.display());

        let store = Store::open(Box::new(JsonDirStore::new(&dir)), config);
        Self {
            store,
            data_dir: dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Story by exact id or unique id prefix, tombstones included.
    pub fn story(&self, key: &str) -> anyhow::Result<&Story> {
        let stories = self.store.stories();
        if let Some(story) = stories.iter().find(|s| s.id == key) {
            return Ok(story);
        }

        let mut matches = stories.iter().filter(|s| s.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(story), None) if !key.is_empty() => Ok(story),
            (Some(_), Some(_)) => bail!("Story id prefix '{}' is ambiguous", key),
            _ => bail!("Story not found: {}", key),
        }
    }

    pub fn resolve_story_id(&self, key: &str) -> anyhow::Result<String> {
        Ok(self.story(key)?.id.clone())
    }

    /// Role by id, then by name ignoring case.
    pub fn resolve_role(&self, key: &str) -> anyhow::Result<RoleId> {
        let roles = self.store.roles();
        roles
            .iter()
            .find(|r| r.id == key)
            .or_else(|| roles.iter().find(|r| r.name.eq_ignore_ascii_case(key)))
            .map(|r| r.id.clone())
            .ok_or_else(|| anyhow!("Role not found: {}", key))
    }

    pub fn resolve_label(&self, key: &str) -> anyhow::Result<LabelId> {
        let labels = self.store.labels();
        labels
            .iter()
            .find(|l| l.id == key)
            .or_else(|| labels.iter().find(|l| l.name.eq_ignore_ascii_case(key)))
            .map(|l| l.id.clone())
            .ok_or_else(|| anyhow!("Label not found: {}", key))
    }

    pub fn resolve_vision(&self, key: &str) -> anyhow::Result<VisionId> {
        let visions = self.store.visions();
        visions
            .iter()
            .find(|v| v.id == key)
            .or_else(|| visions.iter().find(|v| v.title.eq_ignore_ascii_case(key)))
            .map(|v| v.id.clone())
            .ok_or_else(|| anyhow!("Vision not found: {}", key))
    }

    /// Column by id, then by display name ("In Progress", "to do", ...).
    pub fn resolve_column(&self, key: &str) -> anyhow::Result<ColumnId> {
        let columns = self.store.columns();
        columns
            .iter()
            .find(|c| c.id == key)
            .or_else(|| columns.iter().find(|c| c.name.as_str().eq_ignore_ascii_case(key)))
            .map(|c| c.id.clone())
            .ok_or_else(|| anyhow!("Column not found: {}", key))
    }

    pub fn resolve_sprint(&self, key: &str) -> anyhow::Result<SprintId> {
        self.store
            .sprints()
            .iter()
            .find(|s| s.id.eq_ignore_ascii_case(key))
            .map(|s| s.id.clone())
            .ok_or_else(|| anyhow!("Sprint not found: {}", key))
    }
}
