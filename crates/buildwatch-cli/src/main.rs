//! buildwatch - wait for an uploaded build to finish processing
//!
//! ## Commands
//!
//! - `watch`: poll the build catalog until the build is ready, then print it
//! - `normalize`: print the canonical form of a version string
//!
//! ## Exit codes
//!
//! - `0`: build ready
//! - `1`: catalog or other error
//! - `2`: no app version to watch
//! - `3`: more than one build matched
//! - `4`: timed out

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use buildwatch_client::{BuildCatalogClient, ClientConfig};
use buildwatch_core::{
    watch_build, LegacyWatchOptions, NormalizedVersion, Platform, WatchConfig, WatchError,
    WatchErrorKind,
};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "buildwatch")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wait for an uploaded build to finish remote processing", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll until the build finished processing and print it as JSON
    Watch(WatchArgs),

    /// Print the normalized form of a version or build number
    Normalize {
        /// Version string, e.g. 1.2
        version: String,
    },
}

#[derive(Args, Debug)]
struct WatchArgs {
    /// App identifier on the distribution platform
    #[arg(long, env = "BUILDWATCH_APP_ID")]
    app_id: String,

    /// Platform (IOS, MAC_OS, TV_OS, VISION_OS)
    #[arg(long)]
    platform: Option<Platform>,

    /// App version to watch, e.g. 1.2.0
    #[arg(long)]
    app_version: Option<String>,

    /// Build number to watch
    #[arg(long)]
    build_number: Option<String>,

    /// Seconds between status checks
    #[arg(long, default_value = "10")]
    poll_interval: u64,

    /// Give up after this many seconds (default: wait forever)
    #[arg(long)]
    timeout: Option<u64>,

    /// Return as soon as the build is listed, even if still processing
    #[arg(long)]
    return_when_build_appears: bool,

    /// Also wait for beta detail processing
    #[arg(long)]
    require_beta_detail: bool,

    /// Pick the newest build instead of failing when several match
    #[arg(long)]
    select_latest: bool,

    /// Print only the build summary
    #[arg(long)]
    summary: bool,

    /// Build catalog base URL
    #[arg(long, env = "BUILDWATCH_API_URL")]
    api_url: String,

    /// Build catalog bearer token
    #[arg(long, env = "BUILDWATCH_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Deprecated: use --app-version
    #[arg(long, hide = true)]
    train_version: Option<String>,

    /// Deprecated: use --require-beta-detail
    #[arg(long, hide = true)]
    strict_build_watch: bool,
}

impl WatchArgs {
    fn into_configs(self) -> (WatchConfig, ClientConfig) {
        let mut config = WatchConfig::new(self.app_id)
            .with_poll_interval(Duration::from_secs(self.poll_interval))
            .with_return_when_build_appears(self.return_when_build_appears)
            .with_require_beta_detail(self.require_beta_detail)
            .with_select_latest(self.select_latest)
            .with_return_summary(self.summary);
        config.query.platform = self.platform;
        config.query.app_version = self.app_version;
        config.query.build_number = self.build_number;
        config.timeout = self.timeout.map(Duration::from_secs);

        config.apply_legacy(LegacyWatchOptions {
            train_version: self.train_version,
            strict_build_watch: self.strict_build_watch.then_some(true),
        });

        let mut client = ClientConfig::new(&self.api_url);
        client.token = self.api_token;
        (config, client)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    buildwatch_core::init_tracing(cli.json, level);

    let result = match cli.command {
        Commands::Watch(args) => cmd_watch(args).await,
        Commands::Normalize { version } => cmd_normalize(&version),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Watch a build and print it once it qualifies
async fn cmd_watch(args: WatchArgs) -> Result<()> {
    let (config, client_config) = args.into_configs();
    let client =
        BuildCatalogClient::new(client_config).context("Failed to create catalog client")?;

    info!(app_id = %config.query.app_id, "Watching for build");
    let build = watch_build(&client, &config).await?;

    println!("{}", serde_json::to_string_pretty(&build)?);
    Ok(())
}

/// Print the normalized version
fn cmd_normalize(version: &str) -> Result<()> {
    println!("{}", NormalizedVersion::parse(version));
    Ok(())
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<WatchError>().map(WatchError::kind) {
        Some(WatchErrorKind::NoVersionToWatch) => 2,
        Some(WatchErrorKind::AmbiguousMatch) => 3,
        Some(WatchErrorKind::TimeoutExceeded) => 4,
        Some(WatchErrorKind::Source) | None => 1,
    }
}
