use serde::{Deserialize, Serialize};

pub type RoleId = String;

pub const DEFAULT_ROLE_COLOR: &str = "#3B82F6";

/// A life role a story is done in (student, friend, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct RoleDraft {
    pub id: Option<RoleId>,
    pub name: String,
    pub color: Option<String>,
}

impl RoleDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl Role {
    pub fn new(draft: RoleDraft) -> Self {
        Self {
            id: draft.id.unwrap_or_else(crate::new_id),
            name: draft.name,
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_ROLE_COLOR.to_string()),
        }
    }

    pub fn update(&mut self, updates: RoleUpdate) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(color) = updates.color {
            self.color = color;
        }
    }

    pub(crate) fn seeded(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_role_gets_id_and_default_color() {
        let role = Role::new(RoleDraft::new("Student"));
        assert!(!role.id.is_empty());
        assert_eq!(role.color, "#3B82F6");
    }

    #[test]
    fn test_update_role() {
        let mut role = Role::new(RoleDraft::new("Friend"));
        role.update(RoleUpdate {
            color: Some("#10B981".to_string()),
            ..Default::default()
        });
        assert_eq!(role.name, "Friend");
        assert_eq!(role.color, "#10B981");
    }
}
