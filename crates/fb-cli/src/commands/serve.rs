use fb_config::FeedbackConfig;

use crate::cli::root_commands::ServeArgs;

/// Handle `fb serve`: apply bind overrides and run until shutdown.
pub async fn run(args: &ServeArgs, mut config: FeedbackConfig) -> anyhow::Result<()> {
    apply_bind_overrides(args, &mut config);
    config.validate()?;
    fb_server::run(&config).await?;
    Ok(())
}

fn apply_bind_overrides(args: &ServeArgs, config: &mut FeedbackConfig) {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}
