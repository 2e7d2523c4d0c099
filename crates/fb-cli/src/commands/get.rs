use fb_db::store::FeedbackStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse_id;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: FeedbackStore>(
    id: &str,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    let item = ctx.service.get_by_id(&id).await?;
    output(&item, flags.format)
}
