use clap::Parser;
use playground::core::config::{CliOverrides, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "playground", about = "Clearwater code playground for the terminal")]
struct Args {
    /// Playground server root (overrides config and PLAYGROUND_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Use the plain editor instead of the rich one
    #[arg(long)]
    plain: bool,

    /// Path to open, e.g. /playgrounds/42 or /playgrounds
    path: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to playground.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("playground.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Err(std::io::Error::other(e));
        }
    };
    let resolved = resolve(
        &config,
        &CliOverrides {
            api_url: args.api_url,
            plain: args.plain,
            path: args.path,
        },
    );

    log::info!(
        "Playground starting up at {} against {}",
        resolved.start_path,
        resolved.api_base_url
    );

    playground::tui::run(resolved)
}
