use fb_db::store::FeedbackStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse_update;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fb bulk-status`.
///
/// Every pair must parse before anything is written. After that, each entry
/// succeeds or fails on its own and the command reports both lists.
pub async fn run<S: FeedbackStore>(
    raw: &[String],
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let max = ctx.config.server.max_bulk_items;
    if raw.len() > max {
        anyhow::bail!("too many updates: {} given, at most {max} allowed", raw.len());
    }
    let updates = raw
        .iter()
        .map(String::as_str)
        .map(parse_update)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let result = ctx.service.bulk_update_status(&updates).await;
    if result.is_partial() {
        tracing::warn!(
            updated = result.updated.len(),
            failed = result.failed.len(),
            "some status updates were not applied"
        );
    }
    output(&result, flags.format)
}
