//! Terminal front-end for the book API.

use clap::Parser;

use book_view::terminal::Shell;
use book_view::{BookListView, Document, RestBookApi, Result, ViewConfig};

/// Browse and edit the book library from a terminal
#[derive(Parser, Debug)]
#[command(name = "book-view", version, about)]
struct Cli {
    /// Book API root URL (overrides BOOK_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// How long success and error messages stay visible, in milliseconds
    #[arg(long)]
    message_ms: Option<u64>,

    /// Request timeout in milliseconds, 0 for none
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ViewConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.set_base_url(url)?;
    }
    if let Some(ms) = cli.message_ms {
        config.message_duration = std::time::Duration::from_millis(ms);
    }
    if let Some(ms) = cli.timeout_ms {
        config.set_timeout_ms(ms);
    }
    log::info!("using book API at {}", config.base_url);

    let api = RestBookApi::from_config(&config)?;
    let view =
        BookListView::new(api, Document::new()).with_message_duration(config.message_duration);
    let shell = Shell::new(view);

    let stdin = std::io::stdin();
    shell.run(stdin.lock(), std::io::stdout()).await
}
