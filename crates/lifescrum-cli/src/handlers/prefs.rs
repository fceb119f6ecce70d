use crate::cli::PrefsAction;
use crate::context::CliContext;
use crate::output;
use lifescrum_state::{RoadmapPosition, Section, ViewType};

pub async fn handle(ctx: &mut CliContext, action: PrefsAction) -> anyhow::Result<()> {
    match action {
        PrefsAction::Show => {}
        PrefsAction::View { name } => {
            let view: ViewType = name.parse()?;
            ctx.store.set_current_view(view);
        }
        PrefsAction::Section { name, collapsed } => {
            let section: Section = name.parse()?;
            ctx.store.set_section_collapsed(section, collapsed);
        }
        PrefsAction::Layout {
            chart_above_board,
            roadmap_position,
        } => {
            let position = roadmap_position
                .as_deref()
                .map(str::parse::<RoadmapPosition>)
                .transpose()?;
            if let Some(above) = chart_above_board {
                ctx.store.set_chart_above_board(above);
            }
            if let Some(position) = position {
                ctx.store.set_roadmap_position(position);
            }
        }
    }

    output::output_success(ctx.store.preferences());
    Ok(())
}
