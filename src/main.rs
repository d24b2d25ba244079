use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use negotiatex::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "negotiatex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer offline with canned advice instead of calling the API
    #[arg(long, global = true)]
    mock: bool,

    /// Chat-completion base URL (overrides AIML_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model identifier (overrides AIML_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Request timeout; the HTTP client default applies when omitted
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Extra attempts after a network failure
    #[arg(long, global = true, default_value = "0")]
    max_retries: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        mock: cli.mock,
        base_url: cli.base_url,
        model: cli.model,
        timeout_secs: cli.timeout_secs,
        max_retries: cli.max_retries,
    });

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
