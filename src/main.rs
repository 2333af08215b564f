//! gobump - Go module dependency bumper CLI tool
//!
//! Bumps every direct dependency in go.mod to the newest version that keeps
//! the required Go version and passes the configured verification commands.

use clap::Parser;
use gobump::changelog::{publish_changelog, GitHubClient};
use gobump::cli::{detect_ci, CliArgs};
use gobump::command::SystemCommandRunner;
use gobump::error::AppError;
use gobump::manifest::GoModFile;
use gobump::orchestrator::{Orchestrator, UpgradeConfig};
use gobump::output::{create_output, OutputFormat};
use gobump::registry::{GoProxyAdapter, HttpClient};
use gobump::telemetry::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let ci = detect_ci();
    init_tracing(args.is_verbose(ci));

    match run(args, ci).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Main application logic
async fn run(args: CliArgs, ci: bool) -> anyhow::Result<()> {
    let format = args.output_format(ci);
    let config = UpgradeConfig::from_cli(&args, ci);
    tracing::debug!(?format, dry_run = config.dry_run, retries = config.retries, "starting");

    let client = HttpClient::new()?;
    let goproxy = std::env::var("GOPROXY").ok();
    let proxy = GoProxyAdapter::from_goproxy(client.clone(), goproxy.as_deref())?;
    tracing::debug!(proxy = proxy.base_url(), "using module proxy");

    // Let console users watch go and the hooks live in verbose mode
    let runner = if config.verbose && format == OutputFormat::Console {
        SystemCommandRunner::inheriting()
    } else {
        SystemCommandRunner::new()
    };
    let store = GoModFile::new(&args.src_go_mod, &args.dst_go_mod);

    let mut out = create_output(format, config.dry_run);
    out.begin();

    let orchestrator = Orchestrator::new(&proxy, &runner, &store, config);
    let run = match orchestrator.execute(out.as_mut()).await {
        Ok(run) => run,
        Err(e) => {
            out.end();
            return Err(e.into());
        }
    };

    out.summary(&run.results);

    if args.changelog {
        let github = GitHubClient::new(client, std::env::var("GITHUB_TOKEN").ok());
        if let Err(e) =
            publish_changelog(&github, &run.results, &args.changelog_dest, out.as_mut()).await
        {
            tracing::warn!(error = %e, "changelog failed");
            out.error(&format!("failed to publish changelog: {}", e));
        }
    }

    out.end();
    Ok(())
}
