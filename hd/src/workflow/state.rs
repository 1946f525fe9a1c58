//! Conversation state and the partial patches stages return

use serde::Serialize;
use tracing::debug;

use crate::domain::{Floorplan, budget, format_currency};
use crate::intent::Intent;

/// Per-session state threaded through every stage of a turn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationState {
    /// Append-only transcript of `User: ...` and `Agent: ...` lines
    pub history: Vec<String>,
    pub floorplan: Floorplan,
    pub total_area: f64,
    pub estimated_cost: Option<f64>,
    pub user_budget: Option<f64>,
    /// Reply produced this turn, cleared when a turn begins
    pub final_response: Option<String>,
    pub last_message: String,
    pub next_action: Option<Intent>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the incoming message and clear per-turn fields
    pub fn begin_turn(&mut self, message: &str) {
        debug!(message_len = message.len(), "begin_turn: called");
        self.history.push(format!("User: {}", message));
        self.last_message = message.to_string();
        self.final_response = None;
        self.next_action = None;
    }

    /// Record the agent's reply in the transcript
    pub fn record_reply(&mut self, reply: &str) {
        self.history.push(format!("Agent: {}", reply));
    }

    /// Merge a patch; present fields overwrite, absent fields leave state untouched
    pub fn merge(&mut self, patch: StatePatch) {
        debug!(?patch, "merge: called");
        if let Some(floorplan) = patch.floorplan {
            self.floorplan = floorplan;
        }
        if let Some(total_area) = patch.total_area {
            self.total_area = total_area;
        }
        if let Some(cost) = patch.estimated_cost {
            self.estimated_cost = Some(cost);
        }
        if let Some(budget) = patch.user_budget {
            self.user_budget = Some(budget);
        }
        if let Some(response) = patch.final_response {
            self.final_response = Some(response);
        }
        if let Some(action) = patch.next_action {
            self.next_action = Some(action);
        }
    }

    /// Transcript as newline-separated text for prompts
    pub fn history_text(&self) -> String {
        self.history.join("\n")
    }

    /// Budget as currency, or "Not set"
    pub fn budget_display(&self) -> String {
        budget::active_budget(self.user_budget)
            .map(format_currency)
            .unwrap_or_else(|| "Not set".to_string())
    }
}

/// Partial state produced by one stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub floorplan: Option<Floorplan>,
    pub total_area: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub user_budget: Option<f64>,
    pub final_response: Option<String>,
    pub next_action: Option<Intent>,
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floorplan(mut self, floorplan: Floorplan) -> Self {
        self.floorplan = Some(floorplan);
        self
    }

    pub fn with_total_area(mut self, total_area: f64) -> Self {
        self.total_area = Some(total_area);
        self
    }

    pub fn with_estimated_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    pub fn with_user_budget(mut self, budget: f64) -> Self {
        self.user_budget = Some(budget);
        self
    }

    pub fn with_final_response(mut self, response: impl Into<String>) -> Self {
        self.final_response = Some(response.into());
        self
    }

    pub fn with_next_action(mut self, action: Intent) -> Self {
        self.next_action = Some(action);
        self
    }

    /// Compose two patches as if merged in order: `later` wins where both are present
    pub fn then(self, later: StatePatch) -> Self {
        Self {
            floorplan: later.floorplan.or(self.floorplan),
            total_area: later.total_area.or(self.total_area),
            estimated_cost: later.estimated_cost.or(self.estimated_cost),
            user_budget: later.user_budget.or(self.user_budget),
            final_response: later.final_response.or(self.final_response),
            next_action: later.next_action.or(self.next_action),
        }
    }
}
