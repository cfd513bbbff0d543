use anyhow::Result;
use clap::Parser;
use goto::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link forwarder: redirects short names to URLs from a JSON file.
///
/// Flags override the corresponding environment variables.
#[derive(Parser)]
#[command(name = "goto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON file with link definitions [env: GOTO_CONFIG]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on: host:port, unix:<path>, or - for a socket on stdin [env: LISTEN]
    #[arg(long)]
    listen: Option<String>,

    /// Public base URL, used by the OpenSearch description [env: BASE_URL]
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.config {
        config.links_path = path;
    }
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    init_tracing(&config);

    config.validate()?;
    config.print_summary();

    goto::server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
