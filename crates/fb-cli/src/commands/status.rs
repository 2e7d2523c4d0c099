use fb_db::store::FeedbackStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::{parse_id, parse_status};
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: FeedbackStore>(
    id: &str,
    status: &str,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_status(status)?;
    let id = parse_id(id)?;
    let item = ctx.service.update_status(&id, status).await?;
    output(&item, flags.format)
}
