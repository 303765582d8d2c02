mod cli;

use std::process::ExitCode;
use anyhow::Result;
use clap::Parser;
use setup_inspequte::*;
use crate::cli::CLI;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = CLI::parse();
    init_tracing(cli.verbose);

    let mut runner = ActionsRunner::new(cli.github_output.clone(), cli.github_path.clone())
        .with_input("version", &cli.tool_version);

    if let Err(err) = execute(&cli, &mut runner) {
        runner.set_failed(&format!("{err:#}"));
    }
    if runner.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn execute(cli: &CLI, runner: &mut ActionsRunner) -> Result<()> {
    let current = Host::current();
    let host = Host::new(
        cli.platform.as_deref().unwrap_or(&current.platform),
        cli.arch.as_deref().unwrap_or(&current.arch),
    );

    let registry = RegistryConfig::new(&cli.api_url, cli.token.clone());
    let token = registry.token.clone();
    let source = GitHubReleases::new(registry)?;

    let root = match &cli.tool_cache {
        Some(root) => root.clone(),
        None => RunnerToolCache::default_root()?,
    };
    let temp = cli.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
    let cache = RunnerToolCache::new(root, temp, token)?;

    run(runner, &host, &source, &cache);
    Ok(())
}

/// Filter used when `RUST_LOG` is unset: info, then debug, then trace per `-v`.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "setup_inspequte=info",
        1 => "setup_inspequte=debug",
        _ => "setup_inspequte=trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
