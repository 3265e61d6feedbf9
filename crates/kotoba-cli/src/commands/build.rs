use std::path::PathBuf;

use anyhow::{Context, bail};
use kotoba_ingest::{BuildOptions, BuildReport, ProgressObserver, build_store};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BuildArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::BuildProgress;

/// Source, target and options after applying config defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildPlan {
    source: PathBuf,
    target: PathBuf,
    options: BuildOptions,
}

impl BuildPlan {
    fn resolve(args: &BuildArgs, ctx: &AppContext) -> Self {
        Self {
            source: args
                .source
                .clone()
                .unwrap_or_else(|| ctx.config.store.source.clone()),
            target: args.target.clone().unwrap_or_else(|| ctx.store.clone()),
            options: BuildOptions {
                batch_size: args.batch_size.unwrap_or(ctx.config.ingest.batch_size),
            },
        }
    }
}

/// Handle `kotoba build`.
pub async fn handle(args: &BuildArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plan = BuildPlan::resolve(args, ctx);
    let progress = BuildProgress::start();

    let report = run_until(&plan, &progress, shutdown_signal()).await;
    if report.is_err() {
        progress.failed();
    }
    output(&report?, flags.format)
}

/// Run the build unless `shutdown` completes first. Dropping the build
/// future releases the lock and removes the staging store, so the
/// published store is never touched by an interrupted build.
async fn run_until(
    plan: &BuildPlan,
    observer: &dyn ProgressObserver,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<BuildReport> {
    tokio::select! {
        biased;
        () = shutdown => {
            tracing::warn!(target = %plan.target.display(), "build interrupted");
            bail!(
                "build interrupted; {} was left unchanged",
                plan.target.display()
            )
        }
        result = build_store(&plan.source, &plan.target, &plan.options, observer) => {
            result.with_context(|| {
                format!(
                    "failed to build {} from {}",
                    plan.target.display(),
                    plan.source.display()
                )
            })
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
