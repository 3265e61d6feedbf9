use kotoba_core::abbrev::Abbreviation;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AbbrevsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `kotoba abbrevs`.
pub async fn handle(
    args: &AbbrevsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let abbreviations = run(args, ctx).await?;
    output(&abbreviations, flags.format)
}

async fn run(args: &AbbrevsArgs, ctx: &AppContext) -> anyhow::Result<Vec<Abbreviation>> {
    let mut abbreviations = ctx.open_store().await?.abbreviations().await?;
    if args.provisional {
        abbreviations.retain(|abbreviation| abbreviation.provisional);
    }
    Ok(abbreviations)
}
