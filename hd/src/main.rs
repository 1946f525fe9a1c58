//! HouseDesign - conversational floorplan and budget assistant
//!
//! CLI entry point for interactive sessions and one-shot turns.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use housedesign::cli::{Cli, Command, OutputFormat, get_log_path};
use housedesign::config::Config;
use housedesign::llm::create_client;
use housedesign::prompts::{PromptLoader, TEMPLATE_NAMES};
use housedesign::repl;
use housedesign::workflow::Orchestrator;

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model(), "HouseDesign loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Ask { messages, format }) => cmd_ask(&config, &messages, format).await,
        Some(Command::Prompts) => cmd_prompts(&config),
        Some(Command::Repl) | None => cmd_repl(&config).await,
    }
}

/// Build a session from config, failing fast on a missing API key
fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    config.validate()?;
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let prompts = PromptLoader::new(&config.prompts.dir);
    let orchestrator = Orchestrator::new(llm, prompts).context("Failed to build workflow graph")?;
    Ok(orchestrator.with_max_tokens(config.llm.max_tokens))
}

async fn cmd_repl(config: &Config) -> Result<()> {
    debug!("cmd_repl: called");
    let orchestrator = build_orchestrator(config)?;
    repl::run_interactive(orchestrator).await
}

async fn cmd_ask(config: &Config, messages: &[String], format: OutputFormat) -> Result<()> {
    debug!(count = messages.len(), %format, "cmd_ask: called");
    let mut orchestrator = build_orchestrator(config)?;

    let mut outcomes = Vec::with_capacity(messages.len());
    for message in messages {
        let outcome = orchestrator.submit(message).await;
        if format == OutputFormat::Text {
            println!("👤 {}\n", message);
            println!("🤖 {}\n", outcome.reply);
        }
        outcomes.push(outcome);
    }

    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&outcomes).context("Failed to serialize turn outcomes")?;
        println!("{}", json);
    }
    Ok(())
}

fn cmd_prompts(config: &Config) -> Result<()> {
    debug!("cmd_prompts: called");
    let loader = PromptLoader::new(&config.prompts.dir);
    for name in TEMPLATE_NAMES {
        println!("{:12} {}", name, loader.source_of(name));
    }
    Ok(())
}
