//! Over-budget advice stage

use async_trait::async_trait;
use eyre::{Context, Result};
use tracing::{debug, info};

use crate::domain::summary::summarize_floorplan;
use crate::domain::{budget, format_currency};
use crate::llm;
use crate::prompts::ConstraintContext;
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

pub const INSUFFICIENT_DATA: &str = "Insufficient budget data for constraint solving.";

/// Asks the Reasoner for cost reductions when the design exceeds the budget
pub struct ConstraintSolverNode;

#[async_trait]
impl Node for ConstraintSolverNode {
    fn id(&self) -> NodeId {
        NodeId::ConstraintSolver
    }

    async fn run(&self, state: &ConversationState, ctx: &NodeContext<'_>) -> Result<StatePatch> {
        debug!("ConstraintSolverNode::run: called");
        let cost = state.estimated_cost.filter(|c| *c > 0.0);
        let (Some(cost), Some(user_budget)) = (cost, budget::active_budget(state.user_budget)) else {
            debug!("ConstraintSolverNode::run: missing cost or budget");
            return Ok(StatePatch::new().with_final_response(INSUFFICIENT_DATA));
        };

        let comparison = budget::compare(cost, user_budget);
        info!(over_by = %comparison.amount, "ConstraintSolverNode::run: over budget");

        let total_area = state.floorplan.total_area();
        let prompt = ctx.prompts.render(
            "constraint",
            &ConstraintContext {
                estimated_cost: format_currency(cost),
                user_budget: format_currency(user_budget),
                deficit: format_currency(cost - user_budget),
                floorplan_summary: summarize_floorplan(&state.floorplan, total_area, cost, Some(user_budget)),
            },
        )?;

        let advice = llm::ask(ctx.llm, &prompt, ctx.max_tokens)
            .await
            .context("Failed to get cost reduction advice")?;
        Ok(StatePatch::new().with_final_response(advice))
    }
}
