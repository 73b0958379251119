//! Basic usage example
//!
//! Sends one question with a system prompt and prints the first content
//! block, or the resolved error message.
//!
//! API key is read from the environment:
//! - ANTHROPIC_API_KEY (required)
//! - ANTHROPIC_BASE_URL (optional, defaults to https://api.anthropic.com/v1)
//!
//! Usage:
//!   ANTHROPIC_API_KEY=sk-ant-... RUST_LOG=anthropic_messages=debug cargo run --example basic_usage

use anthropic_messages::{
    ConversationMessage, GenerationRequest, MessagesClientBuilder, OperationResult,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = MessagesClientBuilder::from_env()?.build()?;

    let request = GenerationRequest::new("claude-3-sonnet-20240229", 500)
        .message(ConversationMessage::user(
            "Explain the concept of photosynthesis in a concise paragraph \
             returned in lines of 80 characters.",
        ))
        .system("You are a helpful and excited scientist respond with enthusiasm");

    match client.create_message(&request).await {
        OperationResult::Success(resp) => {
            println!("Response: {}", resp.text().unwrap_or_default());
            if let Some(usage) = resp.usage {
                println!(
                    "\nUsage: {} input / {} output tokens",
                    usage.input_tokens.unwrap_or(0),
                    usage.output_tokens.unwrap_or(0)
                );
            }
        }
        OperationResult::Failure(err) => println!("Error: {}", err.resolved_message()),
    }

    client.close();
    Ok(())
}
