//! Interactive REPL for HouseDesign
//!
//! One orchestrator session per REPL run, with slash commands to inspect the
//! floorplan, budget and transcript between turns.

mod session;

pub use session::ReplSession;

use eyre::Result;

use crate::workflow::Orchestrator;

/// Run the interactive REPL
///
/// This is the main entry point for `hd repl`.
pub async fn run_interactive(orchestrator: Orchestrator) -> Result<()> {
    let mut session = ReplSession::new(orchestrator);
    session.run().await
}
