use kotoba_core::model::Entry;
use kotoba_search::{Resolver, SearchCondition, SearchRequest};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SearchResponse {
    query: String,
    /// The cascade step that produced the matches.
    condition: Option<SearchCondition>,
    ent_seqs: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<Entry>>,
}

/// Handle `kotoba search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, ctx, flags).await?;
    output(&response, flags.format)
}

fn request(args: &SearchArgs, limit: u32) -> SearchRequest {
    let mut request = SearchRequest::new(args.query.as_str())
        .regex(args.regex)
        .frequent_only(args.frequent)
        .limit(limit);
    request.field = args.field.field();
    request.extent = args.extent.extent();
    request.case_sensitive = args.case_sensitivity();
    request
}

async fn run(
    args: &SearchArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<SearchResponse> {
    let request = request(args, ctx.limit(flags));
    let resolver = Resolver::new(ctx.open_store().await?);
    let resolution = resolver.resolve(&request).await?;

    let entries = if args.ids_only {
        None
    } else {
        Some(resolver.db().fetch_entries(&resolution.ent_seqs).await?)
    };

    Ok(SearchResponse {
        query: args.query.clone(),
        condition: resolution.condition,
        ent_seqs: resolution.ent_seqs,
        entries,
    })
}
