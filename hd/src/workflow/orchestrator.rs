//! Session orchestrator
//!
//! Owns one conversation and drives the workflow graph once per submitted
//! message. A turn runs against a working copy of the state; the copy only
//! replaces the session state when the whole graph succeeds.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::graph::{Graph, GraphError};
use super::node::{NodeContext, NodeId};
use super::state::ConversationState;
use crate::domain::Floorplan;
use crate::llm::LlmClient;
use crate::prompts::PromptLoader;

/// Reply used when a turn ends without any stage producing one
pub const PENDING_REPLY: &str = "I'm processing your request...";

const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Result of one turn, as presented to a caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub floorplan: Floorplan,
    pub total_area: f64,
    pub estimated_cost: Option<f64>,
    pub user_budget: Option<f64>,
    /// Stages visited; empty when the turn failed or was skipped
    pub stages: Vec<NodeId>,
}

/// One design session
pub struct Orchestrator {
    session_id: Uuid,
    graph: Graph,
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
    state: ConversationState,
    /// Non-empty messages submitted since the session started
    turns: u64,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader) -> Result<Self, GraphError> {
        let session_id = Uuid::now_v7();
        info!(%session_id, "Orchestrator::new: starting session");
        Ok(Self {
            session_id,
            graph: Graph::house_design()?,
            llm,
            prompts,
            max_tokens: DEFAULT_MAX_TOKENS,
            state: ConversationState::new(),
            turns: 0,
        })
    }

    /// Cap on tokens per Reasoner reply
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Turns run so far, failed ones included
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Discard the conversation and start over with a fresh session id
    pub fn reset(&mut self) {
        self.session_id = Uuid::now_v7();
        info!(session_id = %self.session_id, "reset: session cleared");
        self.state = ConversationState::new();
        self.turns = 0;
    }

    /// Run one turn for `message`
    ///
    /// Never fails: errors inside the workflow become an apology reply and
    /// leave the session state exactly as it was before the turn.
    pub async fn submit(&mut self, message: &str) -> TurnOutcome {
        let message = message.trim();
        if message.is_empty() {
            debug!("submit: empty message ignored");
            return self.outcome(String::new(), Vec::new());
        }

        self.turns += 1;
        info!(session_id = %self.session_id, turn = self.turns, "submit: turn started");
        let mut working = self.state.clone();
        working.begin_turn(message);

        let ctx = NodeContext {
            llm: self.llm.as_ref(),
            prompts: &self.prompts,
            max_tokens: self.max_tokens,
        };

        match self.graph.run(&mut working, &ctx).await {
            Ok(stages) => {
                let reply = match working.final_response.clone() {
                    Some(reply) => {
                        working.record_reply(&reply);
                        reply
                    }
                    None => PENDING_REPLY.to_string(),
                };
                self.state = working;
                info!(session_id = %self.session_id, ?stages, "submit: turn completed");
                self.outcome(reply, stages)
            }
            Err(e) => {
                let detail = format!("{:#}", e);
                error!(session_id = %self.session_id, error = %detail, "submit: turn failed");
                let reply = format!(
                    "❌ Error processing your request: {}\nPlease try rephrasing your request.",
                    detail
                );
                self.outcome(reply, Vec::new())
            }
        }
    }

    fn outcome(&self, reply: String, stages: Vec<NodeId>) -> TurnOutcome {
        TurnOutcome {
            reply,
            floorplan: self.state.floorplan.clone(),
            total_area: self.state.total_area,
            estimated_cost: self.state.estimated_cost,
            user_budget: self.state.user_budget,
            stages,
        }
    }
}
