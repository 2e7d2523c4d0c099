use anyhow::Context;
use fb_config::FeedbackConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FeedbackConfig> {
    let mut config =
        FeedbackConfig::load_with_dotenv().context("failed to load feedback configuration")?;
    apply_overrides(&mut config, flags);
    config
        .validate()
        .context("invalid feedback configuration")?;
    Ok(config)
}

fn apply_overrides(config: &mut FeedbackConfig, flags: &GlobalFlags) {
    if let Some(path) = &flags.db {
        config.database.path.clone_from(path);
    }
}

/// Filter directive used when `FEEDBACK_LOG` is unset.
///
/// `--quiet` and `--verbose` win over the configured level.
pub fn log_level<'a>(flags: &GlobalFlags, configured: &'a str) -> &'a str {
    if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        configured
    }
}
