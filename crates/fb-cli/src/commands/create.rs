use fb_core::entities::NewFeedback;
use fb_db::store::FeedbackStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: FeedbackStore>(
    args: &CreateArgs,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = NewFeedback::new(&args.title, &args.description)?;
    let item = ctx.service.create(input).await?;
    output(&item, flags.format)
}
