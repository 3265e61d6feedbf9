use std::path::PathBuf;

use kotoba_db::reader::{StoreCounts, StoreVersion};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InfoResponse {
    store: PathBuf,
    version: Option<StoreVersion>,
    counts: StoreCounts,
}

/// Handle `kotoba info`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(ctx).await?;
    output(&response, flags.format)
}

async fn run(ctx: &AppContext) -> anyhow::Result<InfoResponse> {
    let db = ctx.open_store().await?;
    Ok(InfoResponse {
        store: ctx.store.clone(),
        version: db.version().await?,
        counts: db.counts().await?,
    })
}
