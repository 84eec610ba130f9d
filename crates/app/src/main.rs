//! Canteen CLI

use std::process;

use canteen_app::observability::init_logging;
use clap::Parser;

mod cli;

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = init_logging(cli.logging()) {
        eprintln!("failed to initialize logging: {error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
