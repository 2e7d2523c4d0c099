use fb_db::store::FeedbackStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse_id;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

pub async fn run<S: FeedbackStore>(
    id: &str,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    ctx.service.delete(&id).await?;
    output(
        &DeleteResponse {
            id: &id,
            deleted: true,
        },
        flags.format,
    )
}
