use fb_db::store::FeedbackStore;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: FeedbackStore>(ctx: &AppContext<S>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx.service.stats().await?;
    output(&stats, flags.format)
}
