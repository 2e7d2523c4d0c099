use fb_config::FeedbackConfig;
use fb_db::store::FeedbackStore;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler.
///
/// `serve` owns its database for the server's lifetime. Every other command
/// opens the database, runs once, and closes it.
pub async fn dispatch(
    command: Commands,
    config: FeedbackConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::run(&args, config).await,
        command => {
            let ctx = AppContext::init(config).await?;
            let result = execute(command, &ctx, flags).await;
            ctx.close();
            result
        }
    }
}

/// Run a workflow command against an open context.
pub async fn execute<S: FeedbackStore>(
    command: Commands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(_) => anyhow::bail!("fb serve cannot run against an already open store"),
        Commands::Create(args) => commands::create::run(&args, ctx, flags).await,
        Commands::List(args) => commands::list::run(&args, ctx, flags).await,
        Commands::Get { id } => commands::get::run(&id, ctx, flags).await,
        Commands::Status { id, status } => commands::status::run(&id, &status, ctx, flags).await,
        Commands::BulkStatus { updates } => commands::bulk::run(&updates, ctx, flags).await,
        Commands::Delete { id } => commands::delete::run(&id, ctx, flags).await,
        Commands::Stats => commands::stats::run(ctx, flags).await,
    }
}
