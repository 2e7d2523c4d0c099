use fb_db::store::FeedbackStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::list_query;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: FeedbackStore>(
    args: &ListArgs,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = list_query(args, &ctx.config.listing)?;
    let page = ctx.service.get_all(&query).await?;
    output(&page, flags.format)
}
