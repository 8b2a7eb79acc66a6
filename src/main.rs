use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use hr_chat_relay::config::DeliverySettings;
use hr_chat_relay::credentials::MemoryCredentials;
use hr_chat_relay::session::ChatClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = DeliverySettings::new()?;
    info!(base_url = %settings.base_url, "Starting HR chat relay");

    let mut credentials = MemoryCredentials::new();
    if let Some(token) = &settings.token {
        credentials = credentials.with_token(token.clone());
    }
    if let Some(email) = &settings.user_email {
        credentials = credentials.with_user_email(email.clone());
    }

    let client = ChatClient::new(&settings, Arc::new(credentials));
    let session_id = client.start_local_session().await;
    println!("Session {session_id}. Type a message, Ctrl-D to quit.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        let result = client.send_message(&session_id, message).await;
        println!("{}", result.assistant().content);
    }

    info!(session_id = %session_id, "Session ended");
    Ok(())
}
