//! ReAct agent entry point.
//!
//! Builds the client and tool registry from the environment, runs one
//! hard-coded question through the loop, and prints the result.

use std::io::Write;
use std::sync::Arc;

use pocket_agent::agent::ReActAgent;
use pocket_agent::config::Config;
use pocket_agent::llm::OpenAiClient;
use pocket_agent::tools::{SerpSearch, ToolRegistry};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pocket_agent=info,react=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(model = %config.model, "Loaded configuration");

    let llm = OpenAiClient::from_config(&config)?.with_token_observer(Box::new(|fragment| {
        print!("{}", fragment);
        let _ = std::io::stdout().flush();
    }));

    let mut tools = ToolRegistry::new();
    tools.register(Box::new(SerpSearch));

    let mut agent = ReActAgent::new(Arc::new(llm), tools, config.max_steps);

    let question = "What is Huawei's latest phone model, and what are its main selling points?";
    let answer = agent.run(question).await;

    println!("\n=== Agent result ===");
    match answer {
        Some(answer) => println!("{}", answer),
        None => println!("(no answer)"),
    }

    Ok(())
}
