use fb_config::ListingConfig;
use fb_core::enums::{FeedbackStatus, SortField, SortOrder};
use fb_core::query::{DEFAULT_PAGE, FeedbackQuery};
use fb_core::responses::StatusUpdate;
use fb_server::validate;

use crate::cli::root_commands::ListArgs;

/// Parse a status in its wire form (`open`, `in-progress`, `done`).
pub fn parse_status(raw: &str) -> anyhow::Result<FeedbackStatus> {
    raw.trim()
        .parse()
        .map_err(|error| anyhow::anyhow!("invalid status '{raw}': {error}"))
}

/// Check an id's shape and return it in the store's lowercase spelling.
pub fn parse_id(raw: &str) -> anyhow::Result<String> {
    validate::feedback_id(raw.trim())
        .map_err(|error| anyhow::anyhow!("invalid id '{raw}': {error}"))
}

/// Parse one `ID=STATUS` pair of `fb bulk-status`.
pub fn parse_update(raw: &str) -> anyhow::Result<StatusUpdate> {
    let Some((id, status)) = raw.split_once('=') else {
        anyhow::bail!("invalid update '{raw}': expected ID=STATUS");
    };
    if id.trim().is_empty() {
        anyhow::bail!("invalid update '{raw}': missing id");
    }
    Ok(StatusUpdate::new(parse_id(id)?, parse_status(status)?))
}

/// Build a listing query from `fb list` flags.
///
/// Unknown status or sort values are errors. Page and limit are clamped the
/// same way the HTTP listing does it.
pub fn list_query(args: &ListArgs, listing: &ListingConfig) -> anyhow::Result<FeedbackQuery> {
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let sort_by = args
        .sort_by
        .as_deref()
        .map(str::parse::<SortField>)
        .transpose()
        .map_err(|error| anyhow::anyhow!("invalid --sort-by: {error}"))?
        .unwrap_or_default();
    let sort_order = args
        .sort_order
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()
        .map_err(|error| anyhow::anyhow!("invalid --sort-order: {error}"))?
        .unwrap_or_default();
    let search = args
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(FeedbackQuery {
        status,
        search,
        page: args.page.filter(|page| *page >= 1).unwrap_or(DEFAULT_PAGE),
        limit: listing.normalize_limit(args.limit),
        sort_by,
        sort_order,
    })
}
