//! Entry stage: budget extraction and intent classification

use async_trait::async_trait;
use eyre::Result;
use tracing::{debug, info, warn};

use crate::intent::{self, Intent};
use crate::llm;
use crate::prompts::RouterContext;
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

/// Classification replies are a single token
const CLASSIFY_MAX_TOKENS: u32 = 16;

pub struct RouterNode;

#[async_trait]
impl Node for RouterNode {
    fn id(&self) -> NodeId {
        NodeId::Router
    }

    async fn run(&self, state: &ConversationState, ctx: &NodeContext<'_>) -> Result<StatePatch> {
        debug!(message = %state.last_message, "RouterNode::run: called");

        let extraction = match intent::extract_budget(&state.last_message).filter(|b| *b > 0.0) {
            Some(budget) => {
                info!(%budget, "RouterNode::run: budget extracted");
                StatePatch::new().with_user_budget(budget)
            }
            None => StatePatch::new(),
        };

        let prompt = ctx.prompts.render(
            "router",
            &RouterContext {
                message: state.last_message.clone(),
                room_count: state.floorplan.len(),
                budget_display: state.budget_display(),
            },
        )?;

        let max_tokens = ctx.max_tokens.min(CLASSIFY_MAX_TOKENS);
        let action = match llm::ask(ctx.llm, &prompt, max_tokens).await {
            Ok(reply) => Intent::from_reply(&reply),
            Err(e) => {
                warn!(error = %e, "RouterNode::run: classification failed, treating as other");
                Intent::Other
            }
        };
        info!(%action, "RouterNode::run: classified");

        Ok(extraction.then(StatePatch::new().with_next_action(action)))
    }
}
