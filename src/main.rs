use clap::Parser;
use sftide::cli::{run, Cli};
use sftide::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
