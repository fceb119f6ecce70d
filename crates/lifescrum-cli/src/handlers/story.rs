use crate::cli::{StoryAction, StoryAddArgs, StoryListArgs, StoryUpdateArgs};
use crate::context::CliContext;
use crate::handlers::checked_date;
use crate::output;
use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use lifescrum_domain::{
    ChecklistItem, FieldUpdate, Priority, Repeat, RepeatCadence, Size, Story, StoryDraft,
    StoryUpdate, Weight,
};
use lifescrum_state::views::column_of;

pub async fn handle(ctx: &mut CliContext, action: StoryAction) -> anyhow::Result<()> {
    match action {
        StoryAction::Add(args) => {
            let column = args
                .column
                .as_deref()
                .map(|c| ctx.resolve_column(c))
                .transpose()?;
            let until = args.until.as_deref().map(parse_day).transpose()?;
            let repeat = args.repeat;
            let draft = build_draft(ctx, args)?;

            if repeat {
                let stories = ctx.store.add_repeating_story(draft, column.as_deref(), until);
                output::output_list(stories);
            } else {
                let story = ctx.store.add_story(draft, column.as_deref());
                output::output_success(&story);
            }
        }
        StoryAction::List(args) => {
            output::output_list(list_stories(ctx, &args));
        }
        StoryAction::Get { id } => {
            output::output_success(ctx.story(&id)?);
        }
        StoryAction::Update(args) => {
            let id = ctx.resolve_story_id(&args.id)?;
            let update = build_update(ctx, args)?;
            let story = ctx
                .store
                .update_story(&id, update)
                .ok_or_else(|| anyhow!("Story not found: {}", id))?;
            output::output_success(story);
        }
        StoryAction::Delete { id } => {
            let id = ctx.resolve_story_id(&id)?;
            ctx.store.delete_story(&id);
            output::output_success(serde_json::json!({"deleted": id}));
        }
        StoryAction::Restore { id } => {
            let id = ctx.resolve_story_id(&id)?;
            ctx.store.restore_story(&id);
            output::output_success(ctx.story(&id)?);
        }
        StoryAction::Move {
            id,
            column,
            position,
        } => {
            let id = ctx.resolve_story_id(&id)?;
            let to = ctx.resolve_column(&column)?;
            let from = column_of(ctx.store.columns(), &id)
                .map(|c| c.id.clone())
                .unwrap_or_else(|| to.clone());

            ctx.store.move_story(&id, &from, &to, position);

            let position = ctx
                .store
                .columns()
                .iter()
                .find(|c| c.id == to)
                .and_then(|c| c.position_of(&id));
            output::output_success(serde_json::json!({
                "id": id,
                "from": from,
                "to": to,
                "position": position
            }));
        }
    }
    Ok(())
}

fn list_stories<'a>(ctx: &'a CliContext, args: &StoryListArgs) -> Vec<&'a Story> {
    let store = &ctx.store;
    if args.deleted {
        return store.stories().iter().filter(|s| s.deleted).collect();
    }
    if args.all {
        return store.active_stories().collect();
    }
    if args.text.is_none() && args.keywords.is_none() && !args.due_soon {
        return store.filtered_stories();
    }

    let mut params = store.preferences().filter.clone();
    if let Some(text) = &args.text {
        params.text = text.clone();
    }
    if let Some(keywords) = &args.keywords {
        params.keywords = keywords.clone();
    }
    params.due_soon |= args.due_soon;
    store.stories_matching(&params, Utc::now())
}

fn build_draft(ctx: &CliContext, args: StoryAddArgs) -> anyhow::Result<StoryDraft> {
    let sprint_id = if args.no_sprint {
        FieldUpdate::Clear
    } else {
        match args.sprint {
            Some(sprint) => FieldUpdate::Set(ctx.resolve_sprint(&sprint)?),
            None => FieldUpdate::NoChange,
        }
    };
    let labels = args
        .labels
        .iter()
        .map(|label| ctx.resolve_label(label))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(StoryDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        labels,
        priority: args.priority.as_deref().map(str::parse::<Priority>).transpose()?,
        weight: args.weight.as_deref().map(str::parse::<Weight>).transpose()?,
        size: args.size.as_deref().map(str::parse::<Size>).transpose()?,
        story_type: args.story_type,
        role_id: args.role.as_deref().map(|r| ctx.resolve_role(r)).transpose()?,
        vision_id: args.vision.as_deref().map(|v| ctx.resolve_vision(v)).transpose()?,
        due_date: args.due_date.map(checked_date).transpose()?,
        sprint_id,
        scheduled: args.scheduled.map(checked_date).transpose()?,
        checklist: args.checklist.into_iter().map(ChecklistItem::new).collect(),
        repeat: args.repeat.then_some(Repeat {
            cadence: RepeatCadence::Weekly,
            count: None,
        }),
        subtasks: None,
    })
}

fn build_update(ctx: &CliContext, args: StoryUpdateArgs) -> anyhow::Result<StoryUpdate> {
    let labels = match &args.labels {
        Some(labels) => Some(
            labels
                .iter()
                .map(|label| ctx.resolve_label(label))
                .collect::<anyhow::Result<Vec<_>>>()?,
        ),
        None => None,
    };

    Ok(StoryUpdate {
        title: args.title,
        description: args.description,
        labels,
        priority: args.priority.as_deref().map(str::parse::<Priority>).transpose()?,
        weight: args.weight.as_deref().map(str::parse::<Weight>).transpose()?,
        size: args.size.as_deref().map(str::parse::<Size>).transpose()?,
        story_type: args.story_type,
        role_id: field(args.clear_role, args.role, |r| ctx.resolve_role(&r))?,
        vision_id: field(args.clear_vision, args.vision, |v| ctx.resolve_vision(&v))?,
        due_date: field(args.clear_due_date, args.due_date, checked_date)?,
        sprint_id: field(args.clear_sprint, args.sprint, |s| ctx.resolve_sprint(&s))?,
        scheduled: field(args.clear_scheduled, args.scheduled, checked_date)?,
        ..StoryUpdate::default()
    })
}

/// Maps a `--x` / `--clear-x` flag pair onto a three-state update.
fn field<T, F>(clear: bool, value: Option<String>, resolve: F) -> anyhow::Result<FieldUpdate<T>>
where
    F: FnOnce(String) -> anyhow::Result<T>,
{
    if clear {
        return Ok(FieldUpdate::Clear);
    }
    Ok(match value {
        Some(value) => FieldUpdate::Set(resolve(value)?),
        None => FieldUpdate::NoChange,
    })
}

fn parse_day(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", value))
}
