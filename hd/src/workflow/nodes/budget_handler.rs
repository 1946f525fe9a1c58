//! Budget confirmation stage, composed without the Reasoner

use async_trait::async_trait;
use eyre::Result;
use tracing::debug;

use crate::domain::{budget, estimate_cost, format_currency};
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

pub struct BudgetHandlerNode;

fn compose_reply(state: &ConversationState) -> String {
    let Some(user_budget) = budget::active_budget(state.user_budget) else {
        return format!(
            "I noticed you mentioned budget in: '{}'\n\n\
             Please specify your budget amount, for example:\n\
             • 'My budget is $650,000'\n\
             • 'I can spend up to $500k'\n\
             • 'Budget: $750,000'",
            state.last_message
        );
    };

    let mut reply = format!(
        "✅ **Budget Set Successfully!**\n\n💰 Your budget: {}\n\n",
        format_currency(user_budget)
    );

    if state.floorplan.is_empty() {
        reply.push_str("Now let's start designing your house! You can:\n");
        reply.push_str("• Tell me what rooms you need: 'I need 3 bedrooms and 2 bathrooms'\n");
        reply.push_str("• Ask for a complete design: 'Design me a 2000 sq ft house'\n");
        reply.push_str("• Add specific rooms: 'Add a master bedroom 14x16 feet'");
        return reply;
    }

    let cost = estimate_cost(state.floorplan.total_area());
    let comparison = budget::compare(cost, user_budget);
    if comparison.within {
        reply.push_str(&format!(
            "🎉 Great news! Your current floorplan ({}) fits within your budget with {} to spare.\n\n",
            format_currency(cost),
            format_currency(comparison.amount)
        ));
    } else {
        reply.push_str(&format!(
            "⚠️ Your current floorplan ({}) exceeds your budget by {}. \
             I can help you adjust the design to fit your budget.\n\n",
            format_currency(cost),
            format_currency(comparison.amount)
        ));
    }
    reply.push_str("What would you like to do next? You can:\n");
    reply.push_str("• Add or modify rooms\n");
    reply.push_str("• Ask for design suggestions\n");
    reply.push_str("• Request a complete redesign");
    reply
}

#[async_trait]
impl Node for BudgetHandlerNode {
    fn id(&self) -> NodeId {
        NodeId::BudgetHandler
    }

    async fn run(&self, state: &ConversationState, _ctx: &NodeContext<'_>) -> Result<StatePatch> {
        debug!(budget = ?state.user_budget, rooms = state.floorplan.len(), "BudgetHandlerNode::run: called");
        Ok(StatePatch::new().with_final_response(compose_reply(state)))
    }
}
