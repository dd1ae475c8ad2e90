use clap::Parser;

use catalog_browser_lib::bootstrap::tracing::init_tracing_subscriber;
use catalog_browser_lib::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so command output stays pipeable.
    if let Err(err) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    run(cli).await
}
