//! HouseDesign - conversational floorplan and budget workflow
//!
//! Each user message is routed through a small graph of stages that keep a
//! floorplan and a budget comparison up to date and produce one reply per
//! turn. Stages that need judgment call out to a text-completion service
//! (the Reasoner); everything else is deterministic.
//!
//! # Modules
//!
//! - [`domain`] - Rooms, the copy-on-write floorplan, budget math and summaries
//! - [`intent`] - Budget amount extraction and intent categories
//! - [`interpreter`] - Turns Reasoner replies into floorplan mutations
//! - [`workflow`] - Graph, stages, per-turn state and the session orchestrator
//! - [`llm`] - Reasoner client trait and provider implementations
//! - [`prompts`] - Prompt templates and loader
//! - [`config`] - Configuration types and loading
//! - [`cli`] / [`repl`] - Command-line and interactive front ends

pub mod cli;
pub mod config;
pub mod domain;
pub mod intent;
pub mod interpreter;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod workflow;

pub use config::Config;
pub use domain::{Floorplan, Room, RoomId, RoomType};
pub use intent::Intent;
pub use llm::{LlmClient, LlmError};
pub use workflow::{ConversationState, Orchestrator, TurnOutcome};
