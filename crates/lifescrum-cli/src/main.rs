mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("LIFESCRUM_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "lifescrum", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = CliContext::open(cli.data_dir);
    if let Err(e) = run(&mut ctx, cli.command).await {
        tracing::debug!("Command failed: {:#}", e);
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(ctx: &mut CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Story(cmd) => handlers::story::handle(ctx, cmd.action).await,
        Commands::Board(cmd) => handlers::board::handle(ctx, cmd.action).await,
        Commands::Sprint(cmd) => handlers::sprint::handle(ctx, cmd.action).await,
        Commands::Role(cmd) => handlers::catalog::handle_role(ctx, cmd.action).await,
        Commands::Label(cmd) => handlers::catalog::handle_label(ctx, cmd.action).await,
        Commands::Vision(cmd) => handlers::vision::handle(ctx, cmd.action).await,
        Commands::Filter(cmd) => handlers::filter::handle(ctx, cmd.action).await,
        Commands::Plan(args) => handlers::plan::handle(ctx, args).await,
        Commands::Prefs(cmd) => handlers::prefs::handle(ctx, cmd.action).await,
        Commands::Export(args) => handlers::backup::handle_export(ctx, args).await,
        Commands::Import(args) => handlers::backup::handle_import(ctx, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
