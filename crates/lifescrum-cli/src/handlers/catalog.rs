//! Roles and labels share a shape: add, list, update, delete. Deleting one
//! leaves stories that reference it untouched.

use crate::cli::{LabelAction, RoleAction};
use crate::context::CliContext;
use crate::output;
use anyhow::anyhow;
use lifescrum_domain::{LabelDraft, LabelUpdate, RoleDraft, RoleUpdate};

pub async fn handle_role(ctx: &mut CliContext, action: RoleAction) -> anyhow::Result<()> {
    match action {
        RoleAction::Add { name, color } => {
            let role = ctx.store.add_role(RoleDraft {
                id: None,
                name,
                color,
            });
            output::output_success(&role);
        }
        RoleAction::List => {
            output::output_list(ctx.store.roles().iter().collect::<Vec<_>>());
        }
        RoleAction::Update { id, name, color } => {
            let id = ctx.resolve_role(&id)?;
            let role = ctx
                .store
                .update_role(&id, RoleUpdate { name, color })
                .ok_or_else(|| anyhow!("Role not found: {}", id))?;
            output::output_success(role);
        }
        RoleAction::Delete { id } => {
            let id = ctx.resolve_role(&id)?;
            ctx.store.delete_role(&id);
            output::output_success(serde_json::json!({"deleted": id}));
        }
    }
    Ok(())
}

pub async fn handle_label(ctx: &mut CliContext, action: LabelAction) -> anyhow::Result<()> {
    match action {
        LabelAction::Add { name, color } => {
            let label = ctx.store.add_label(LabelDraft {
                id: None,
                name,
                color,
            });
            output::output_success(&label);
        }
        LabelAction::List => {
            output::output_list(ctx.store.labels().iter().collect::<Vec<_>>());
        }
        LabelAction::Update { id, name, color } => {
            let id = ctx.resolve_label(&id)?;
            let label = ctx
                .store
                .update_label(&id, LabelUpdate { name, color })
                .ok_or_else(|| anyhow!("Label not found: {}", id))?;
            output::output_success(label);
        }
        LabelAction::Delete { id } => {
            let id = ctx.resolve_label(&id)?;
            ctx.store.delete_label(&id);
            output::output_success(serde_json::json!({"deleted": id}));
        }
    }
    Ok(())
}
