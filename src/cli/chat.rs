use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::agent::BookingAgent;
use crate::core::AppConfig;
use crate::google::GcalClient;

/// Interactive booking session in the terminal. Each line goes through
/// the same pipeline as the HTTP chat endpoint.
pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();
    let agent = BookingAgent::new(config.timezone, GcalClient::from_config(&config));

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let resp = agent.handle(&line).await;
                println!("{resp}");
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
