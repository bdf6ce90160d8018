//! Plan-and-Solve agent entry point.
//!
//! Builds the client from the environment, runs one hard-coded multi-step
//! question, and prints the result.

use std::io::Write;
use std::sync::Arc;

use pocket_agent::agent::PlanAndSolveAgent;
use pocket_agent::config::Config;
use pocket_agent::llm::OpenAiClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pocket_agent=info,plan_solve=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(model = %config.model, "Loaded configuration");

    let llm = OpenAiClient::from_config(&config)?.with_token_observer(Box::new(|fragment| {
        print!("{}", fragment);
        let _ = std::io::stdout().flush();
    }));

    let agent = PlanAndSolveAgent::new(Arc::new(llm));

    let question = "A fruit shop sold 15 apples on Monday. On Tuesday it sold twice as many as \
                    on Monday. On Wednesday it sold 5 fewer than on Tuesday. How many apples \
                    did it sell over the three days?";
    let answer = agent.run(question).await;

    println!("\n=== Agent result ===");
    match answer {
        Some(answer) => println!("{}", answer),
        None => println!("(no answer)"),
    }

    Ok(())
}
