use clap::Parser;

use pagepointer_lib::cli::Cli;

#[tokio::main]
async fn main() {
    if let Err(e) = pagepointer_lib::run(Cli::parse()).await {
        tracing::error!(error = %e, "pagepointer failed");
        std::process::exit(1);
    }
}
