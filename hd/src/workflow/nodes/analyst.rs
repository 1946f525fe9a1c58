//! Area and cost recompute

use async_trait::async_trait;
use eyre::Result;
use tracing::debug;

use crate::domain::estimate_cost;
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

/// Recomputes total area and estimated cost from the current floorplan
pub struct BudgetAnalystNode;

#[async_trait]
impl Node for BudgetAnalystNode {
    fn id(&self) -> NodeId {
        NodeId::BudgetAnalyst
    }

    async fn run(&self, state: &ConversationState, _ctx: &NodeContext<'_>) -> Result<StatePatch> {
        let total_area = state.floorplan.total_area();
        let cost = estimate_cost(total_area);
        debug!(%total_area, %cost, "BudgetAnalystNode::run: recomputed");
        Ok(StatePatch::new().with_total_area(total_area).with_estimated_cost(cost))
    }
}
