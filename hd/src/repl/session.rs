//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::domain::summary::{budget_status, cost_breakdown, summarize_floorplan};
use crate::workflow::Orchestrator;

/// Bare words that end the session, as well as `/quit`
const EXIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

/// Interactive design session
pub struct ReplSession {
    orchestrator: Orchestrator,
}

impl ReplSession {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", "👤 You:".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
                        break;
                    }

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("👋 Goodbye! Thanks for designing with HouseDesign.");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "🏠 HouseDesign - Ready!".bright_cyan().bold());
        println!("You can:");
        println!("- Modify floorplans (add/remove/change rooms)");
        println!("- Ask design questions and get building advice");
        println!("- Set your budget and get cost analysis");
        println!("- Get cost reduction ideas when over budget");
        println!();
        println!(
            "Examples: {}, {}, {}",
            "'Add a master bedroom'".dimmed(),
            "'What's the best flooring?'".dimmed(),
            "'My budget is $500,000'".dimmed()
        );
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        debug!(%cmd, "handle_slash_command: called");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/reset" => {
                self.orchestrator.reset();
                println!("{}", "Session reset. Floorplan, budget and history cleared.".dimmed());
                SlashResult::Continue
            }
            "/floorplan" | "/plan" => {
                self.print_floorplan();
                SlashResult::Continue
            }
            "/budget" => {
                let state = self.orchestrator.state();
                println!();
                println!("{}", budget_status(state.estimated_cost, state.user_budget));
                println!();
                SlashResult::Continue
            }
            "/cost" => {
                println!();
                println!("{}", cost_breakdown(&self.orchestrator.state().floorplan));
                println!();
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit the session", "/quit".yellow());
        println!("  {:14} Start over with an empty floorplan", "/reset".yellow());
        println!("  {:14} Show the current floorplan", "/floorplan".yellow());
        println!("  {:14} Show budget status", "/budget".yellow());
        println!("  {:14} Show per-room cost breakdown", "/cost".yellow());
        println!("  {:14} Show conversation history", "/history".yellow());
        println!();
    }

    fn print_floorplan(&self) {
        let state = self.orchestrator.state();
        println!();
        if state.floorplan.is_empty() {
            println!("{}", "No rooms yet. Try 'Add a kitchen 12x14 feet'.".dimmed());
        } else {
            let total_area = state.floorplan.total_area();
            println!(
                "{}",
                summarize_floorplan(
                    &state.floorplan,
                    total_area,
                    crate::domain::estimate_cost(total_area),
                    state.user_budget
                )
            );
        }
        println!();
    }

    fn print_history(&self) {
        let history = &self.orchestrator.state().history;
        if history.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for (i, line) in history.iter().enumerate() {
            let first_line = line.lines().next().unwrap_or_default();
            let preview: String = first_line.chars().take(70).collect();
            let preview = if first_line.chars().count() > 70 || line.contains('\n') {
                format!("{}...", preview)
            } else {
                preview
            };
            let preview = if line.starts_with("User:") {
                preview.as_str().bright_green()
            } else {
                preview.as_str().bright_blue()
            };
            println!("  {}. {}", i + 1, preview);
        }
        println!();
    }

    async fn process_user_input(&mut self, input: &str) {
        let outcome = self.orchestrator.submit(input).await;
        println!();
        println!("{} {}", "🤖 Agent:".bright_blue(), outcome.reply);
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
