//! `search QUERY`

use super::issues::issue_row;
use super::{list_envelope, page_request, CommandResult};
use crate::api::{Filter, LinearApi};
use crate::cli::SearchArgs;
use serde_json::json;

const DEFAULT_PAGE_SIZE: u32 = 20;

pub async fn search(api: &dyn LinearApi, args: &SearchArgs) -> CommandResult {
    let filter = args.team.as_ref().map(|team| {
        let mut filter = Filter::new();
        filter.insert("team".to_string(), json!({ "key": { "eq": team } }));
        filter
    });
    let page = page_request(&args.page, DEFAULT_PAGE_SIZE);
    let results = api.search_issues(&args.query, filter, &page).await?;
    Ok(list_envelope(results, issue_row))
}
