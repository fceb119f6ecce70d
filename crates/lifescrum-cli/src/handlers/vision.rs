use crate::cli::{VisionAction, VisionUpdateArgs};
use crate::context::CliContext;
use crate::output;
use anyhow::anyhow;
use lifescrum_domain::{FieldUpdate, VisionDraft, VisionUpdate};

pub async fn handle(ctx: &mut CliContext, action: VisionAction) -> anyhow::Result<()> {
    match action {
        VisionAction::Add {
            title,
            description,
            vision_type,
            order,
        } => {
            let vision = ctx.store.add_vision(VisionDraft {
                title,
                description,
                vision_type,
                order,
            });
            output::output_success(&vision);
        }
        VisionAction::List => {
            output::output_list(ctx.store.visions_by_order());
        }
        VisionAction::Update(args) => handle_update(ctx, args)?,
        VisionAction::Delete { id } => {
            let id = ctx.resolve_vision(&id)?;
            ctx.store.delete_vision(&id);
            output::output_success(serde_json::json!({"deleted": id}));
        }
        VisionAction::Reorder { ids } => {
            let ids = ids
                .iter()
                .map(|id| ctx.resolve_vision(id))
                .collect::<anyhow::Result<Vec<_>>>()?;
            ctx.store.reorder_visions(&ids);
            output::output_list(ctx.store.visions_by_order());
        }
    }
    Ok(())
}

fn handle_update(ctx: &mut CliContext, args: VisionUpdateArgs) -> anyhow::Result<()> {
    let id = ctx.resolve_vision(&args.id)?;
    let description = if args.clear_description {
        FieldUpdate::Clear
    } else {
        args.description
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange)
    };

    let update = VisionUpdate {
        title: args.title,
        description,
        vision_type: args.vision_type,
        order: args.order,
    };
    let vision = ctx
        .store
        .update_vision(&id, update)
        .ok_or_else(|| anyhow!("Vision not found: {}", id))?;
    output::output_success(vision);
    Ok(())
}
