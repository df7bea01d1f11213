use anyhow::Result;
use clap::Parser;
use thalis_scaffold::cli::{self, Cli};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("thalis-scaffold: error: {e:#}");
            std::process::exit(2);
        }
    };

    // Routes all log::info!() etc. to /tmp/thalis_scaffold_debug.log.
    // When RUST_LOG is set, also mirrors to stderr.
    thalis_scaffold::debug::init_log_bridge(cli.effective_log_level(&config));
    log::info!("Starting thalis-scaffold {}", thalis_scaffold::VERSION);

    let runtime = Runtime::new()?;
    let result = runtime.block_on(cli::run(cli, config));

    log::info!("Shutting down runtime");
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));

    if let Err(ref e) = result {
        eprintln!("thalis-scaffold: error: {e:#}");
    }
    result
}
