use clap::Parser;
use homeloan::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "homeloan", about = "Housing-loan consultation assistant")]
struct Args {
    /// Base URL of the chat service (overrides HOMELOAN_API_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// File to write logs to
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config();
    let file_config = loaded.as_ref().map(|(config, _)| config);
    let resolved = config::resolve(
        file_config.unwrap_or(&Default::default()),
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            log_file: args.log_file.as_deref(),
        },
    );

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // Loading ran before the logger existed; report its outcome now
    match &loaded {
        Ok((_, source)) => source.log(),
        Err(e) => log::warn!("Ignoring config file: {}", e),
    }
    log::info!("Homeloan starting up with base URL: {}", resolved.base_url);

    homeloan::tui::run(resolved)
}
