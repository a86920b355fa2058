use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use semantic_versioner::cli::{ReleaseMode, ReleaseOrchestrator, ReleaseRequest};
use semantic_versioner::config::{self, Config};
use semantic_versioner::git::Git2Repository;
use semantic_versioner::hooks::HookExecutor;
use semantic_versioner::store::FsReleaseStore;
use semantic_versioner::ui;

#[derive(clap::Parser)]
#[command(
    name = "semantic-versioner",
    version,
    about = "Compute the next semantic version from conventional commits and update the changelog"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Branch whose release policy applies (default: current branch)")]
    branch: Option<String>,

    #[arg(long, help = "Show the next version and changelog without writing anything")]
    dry_run: bool,

    #[arg(long, help = "Commit the release files and create an annotated tag")]
    release: bool,

    #[arg(long, requires = "release", help = "Run the post_release hook after tagging")]
    publish: bool,

    #[arg(long, help = "Show configured branch policies and exit")]
    list: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl Args {
    fn mode(&self) -> ReleaseMode {
        if self.dry_run {
            ReleaseMode::DryRun
        } else if self.release {
            ReleaseMode::Release {
                publish: self.publish,
            }
        } else {
            ReleaseMode::Update
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    if args.list {
        ui::display_branch_policies(&config.branches);
        return Ok(());
    }

    let repo = Git2Repository::open(".").context("Git repository error")?;
    let branch = match args.branch.clone() {
        Some(branch) => branch,
        None => repo
            .current_branch()
            .context("Cannot determine the current branch, pass --branch")?,
    };

    release(&args, &config, &repo, branch)
}

fn release(args: &Args, config: &Config, repo: &Git2Repository, branch: String) -> Result<()> {
    let store = FsReleaseStore::new(&config.files.version_file, &config.files.changelog_file);
    let hook = config.hooks.post_release.as_ref().map(HookExecutor::new);

    let mut orchestrator = ReleaseOrchestrator::new(repo, &store, repo, &config.branches);
    if let Some(hook) = hook.as_ref() {
        orchestrator = orchestrator.with_publisher(hook);
    }

    ui::display_status(&format!("Preparing release for branch '{}'", branch));
    let request = ReleaseRequest::new(branch, args.mode())
        .with_build_number_from_env(&config.build.build_number_env);
    let outcome = orchestrator.run(&request)?;

    ui::report_outcome(&outcome);
    Ok(())
}
