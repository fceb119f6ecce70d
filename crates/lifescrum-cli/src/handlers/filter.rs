use crate::cli::FilterAction;
use crate::context::CliContext;
use crate::output;
use lifescrum_domain::parse_filter_keywords;

pub async fn handle(ctx: &mut CliContext, action: FilterAction) -> anyhow::Result<()> {
    match action {
        FilterAction::Set {
            text,
            keywords,
            due_soon,
        } => {
            if let Some(text) = text {
                ctx.store.set_filter_text(text);
            }
            if let Some(keywords) = keywords {
                ctx.store.set_filter_keywords(keywords);
            }
            if let Some(due_soon) = due_soon {
                ctx.store.set_filter_due_soon(due_soon);
            }
        }
        FilterAction::Clear => ctx.store.clear_filters(),
        FilterAction::Show => {}
    }

    let filter = &ctx.store.preferences().filter;
    output::output_success(serde_json::json!({
        "filter": filter,
        "keywords": parse_filter_keywords(&filter.keywords),
        "active": filter.has_active_filters(),
        "matches": ctx.store.filtered_stories().len(),
    }));
    Ok(())
}
