use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show => {
            let sprint = ctx.store.current_sprint();
            let columns = ctx.store.stories_by_column();
            output::output_success(serde_json::json!({
                "sprint": sprint,
                "columns": columns,
            }));
        }
        BoardAction::List => {
            output::output_list(ctx.store.boards().iter().collect::<Vec<_>>());
        }
    }
    Ok(())
}
