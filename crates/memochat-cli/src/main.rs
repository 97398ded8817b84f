use anyhow::Result;
use clap::Parser;
use memochat_cli::app;
use memochat_core::{LlmProvider, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memochat")]
#[command(about = "Memochat - stateful chatbot with user profiles and auto-persistence")]
#[command(version)]
struct Cli {
    /// Run a single chat turn and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// LLM model to use
    #[arg(short, long)]
    model: Option<String>,

    /// LLM provider (gemini, openai, claude)
    #[arg(long)]
    provider: Option<String>,

    /// Session file to load and save
    #[arg(long)]
    session: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = Settings::load();

    if let Some(ref provider) = cli.provider {
        let provider = LlmProvider::from_name(provider)
            .ok_or_else(|| anyhow::anyhow!("Unknown provider: {provider}"))?;
        settings.set_provider(provider);
    }
    if let Some(ref model) = cli.model {
        settings.llm.model = model.clone();
    }
    if let Some(session) = cli.session {
        settings.session.path = Some(session);
    }

    tracing::debug!(
        provider = ?settings.llm.provider,
        model = %settings.llm.model,
        "Starting"
    );

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&settings, &prompt).await?;
    } else {
        app::run_repl(&settings).await?;
    }

    Ok(())
}
