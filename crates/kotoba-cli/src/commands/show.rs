use kotoba_core::model::Entry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ShowResponse {
    entries: Vec<Entry>,
    /// Requested sequence numbers with no entry in the store.
    missing: Vec<i64>,
}

/// Handle `kotoba show`.
pub async fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, ctx).await?;
    output(&response, flags.format)
}

async fn run(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<ShowResponse> {
    let db = ctx.open_store().await?;
    let entries = db.fetch_entries(&args.ent_seqs).await?;
    let missing = args
        .ent_seqs
        .iter()
        .copied()
        .filter(|ent_seq| !entries.iter().any(|entry| entry.ent_seq == *ent_seq))
        .collect();
    Ok(ShowResponse { entries, missing })
}
