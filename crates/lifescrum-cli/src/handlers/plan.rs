use crate::cli::PlanArgs;
use crate::context::CliContext;
use crate::output;
use lifescrum_domain::{BrainLevel, Size};

pub async fn handle(ctx: &mut CliContext, args: PlanArgs) -> anyhow::Result<()> {
    let level: BrainLevel = args.level.parse()?;
    let size: Size = args.size.parse()?;
    tracing::debug!("Planning for {} focus, size {}", level, size);

    output::output_list(ctx.store.planned_stories(level, size));
    Ok(())
}
