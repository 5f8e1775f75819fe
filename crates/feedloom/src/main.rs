//! feedloom: show and post to a node's merged feed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use feedloom::client::HttpBackend;
use feedloom::{
    logging, Aggregator, FeedConfig, FeedError, HtmlFileSurface, Surface, TerminalSurface,
    TimestampUnit,
};

#[derive(Parser)]
#[command(name = "feedloom", version)]
#[command(about = "Merge every author's log on a node into one feed")]
struct Cli {
    /// Base URL of the node
    #[arg(long, env = "FEEDLOOM_URL", default_value = "http://localhost:8000")]
    url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "FEEDLOOM_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Unit of post timestamps (seconds or millis)
    #[arg(long, env = "FEEDLOOM_TIMESTAMP_UNIT", default_value_t = TimestampUnit::Seconds)]
    timestamp_unit: TimestampUnit,

    /// Log level or filter directive; RUST_LOG is used if this does not parse
    #[arg(long, env = "FEEDLOOM_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the feed to the terminal
    Show {
        /// Disable truecolor avatars
        #[arg(long)]
        no_color: bool,
    },
    /// Write the feed as an HTML page
    Page {
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Publish a post, then show the reloaded feed
    Post {
        body: String,
        /// Write the reloaded feed as HTML instead of printing it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, true)?;

    let config = FeedConfig::default()
        .with_request_timeout(Duration::from_secs(cli.timeout_secs))
        .with_timestamp_unit(cli.timestamp_unit);
    let backend = HttpBackend::new(&cli.url, config.request_timeout)
        .with_context(|| format!("cannot use node at {}", cli.url))?;
    debug!(url = backend.base_url(), "node backend ready");

    let outcome = match cli.command {
        Command::Show { no_color } => {
            let surface = TerminalSurface::new(!no_color);
            run(Aggregator::new(backend, surface, config), None).await
        }
        Command::Page { out } => {
            let surface = HtmlFileSurface::new(out);
            run(Aggregator::new(backend, surface, config), None).await
        }
        Command::Post { body, out: Some(out) } => {
            let surface = HtmlFileSurface::new(out);
            run(Aggregator::new(backend, surface, config), Some(body)).await
        }
        Command::Post { body, out: None } => {
            let surface = TerminalSurface::new(true);
            run(Aggregator::new(backend, surface, config), Some(body)).await
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(FeedError::Surface(e)) => Err(e).context("cannot update output"),
        // Already shown on the surface.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

async fn run<S: Surface>(
    aggregator: Aggregator<HttpBackend, S>,
    post: Option<String>,
) -> feedloom::Result<()> {
    match post {
        Some(body) => aggregator.submit_post(&body).await.map(drop),
        None => aggregator.load().await.map(drop),
    }
}
