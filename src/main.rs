mod charts;
mod cli;
mod db;
mod fetch;
mod record;
mod stats;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let database_url = cli.database.url()?;

    match &cli.command {
        Commands::Load { start, end } => match command::load(&database_url, *start, *end).await {
            Ok(message) => println!("{}", message),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Summarize => match command::summarize(&database_url).await {
            Ok(message) => println!("{}", message),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Charts { out_dir } => match command::charts(&database_url, out_dir).await {
            Ok(message) => println!("{}", message),
            Err(e) => eprintln!("Error: {}", e),
        },
    }

    Ok(())
}
