use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Chat with the booking agent from the terminal
    Chat {},
}

#[derive(Parser)]
#[command(about = "Conversational calendar booking agent", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            serve::run(host, port).await;
        }
        Command::Chat {} => {
            chat::run().await?;
        }
    }

    Ok(())
}
