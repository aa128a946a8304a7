use anyhow::Result;
use clap::Parser;
use sheet_redirect::config::{self, ConfigOverrides};
use sheet_redirect::{logging, server};

/// Short link redirect service backed by a Google Sheets table.
#[derive(Parser)]
#[command(name = "sheet-redirect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load(&cli.overrides)?;

    logging::init(&config.log_level, &config.log_format)?;
    config.print_summary();

    server::run(config).await
}
