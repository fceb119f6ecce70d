use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use lifescrum_persistence::AtomicWriter;
use lifescrum_state::ImportMode;

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let json = ctx.store.export_json()?;

    match args.output {
        Some(path) => {
            AtomicWriter::write_atomic(&path, json.as_bytes())?;
            tracing::info!(
                "Exported {} to {}",
                ctx.data_dir().display(),
                path.display()
            );
            output::output_success(serde_json::json!({
                "path": path,
                "stories": ctx.store.active_stories().count(),
            }));
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let mode: ImportMode = args.mode.parse()?;
    let summary = ctx
        .store
        .import_file(&args.file, mode)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to import {}: {}", args.file.display(), e))?;
    output::output_success(&summary);
    Ok(())
}
