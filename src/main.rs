use anyhow::Result;
use bookbot::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
