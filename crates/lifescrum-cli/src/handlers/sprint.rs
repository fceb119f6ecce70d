use crate::cli::SprintAction;
use crate::context::CliContext;
use crate::output;
use anyhow::anyhow;

pub async fn handle(ctx: &mut CliContext, action: SprintAction) -> anyhow::Result<()> {
    match action {
        SprintAction::List => {
            output::output_list(ctx.store.sprints().iter().collect::<Vec<_>>());
        }
        SprintAction::Current => output_current(ctx)?,
        SprintAction::Select { id, clear } => {
            let selection = if clear {
                None
            } else {
                let id = id.ok_or_else(|| anyhow!("--id or --clear is required"))?;
                Some(ctx.resolve_sprint(&id)?)
            };
            ctx.store.select_sprint(selection);
            output_current(ctx)?;
        }
    }
    Ok(())
}

fn output_current(ctx: &CliContext) -> anyhow::Result<()> {
    let sprint = ctx
        .store
        .current_sprint()
        .ok_or_else(|| anyhow!("No sprints available"))?;
    let stories = ctx
        .store
        .active_stories()
        .filter(|s| s.is_in_sprint(&sprint.id))
        .count();

    output::output_success(serde_json::json!({
        "sprint": sprint,
        "selected": ctx.store.preferences().selected_sprint_id.is_some(),
        "stories": stories,
    }));
    Ok(())
}
