//! Within-budget summary stage

use async_trait::async_trait;
use eyre::Result;
use tracing::debug;

use crate::domain::summary::summarize_floorplan;
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

pub const NO_FLOORPLAN: &str = "No floorplan available to summarize.";

pub struct ResponseGenerationNode;

#[async_trait]
impl Node for ResponseGenerationNode {
    fn id(&self) -> NodeId {
        NodeId::ResponseGeneration
    }

    async fn run(&self, state: &ConversationState, _ctx: &NodeContext<'_>) -> Result<StatePatch> {
        debug!(rooms = state.floorplan.len(), "ResponseGenerationNode::run: called");
        if state.floorplan.is_empty() {
            return Ok(StatePatch::new().with_final_response(NO_FLOORPLAN));
        }

        let summary = summarize_floorplan(
            &state.floorplan,
            state.total_area,
            state.estimated_cost.unwrap_or(0.0),
            state.user_budget,
        );
        Ok(StatePatch::new().with_final_response(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Floorplan, RoomType};
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;
    use crate::workflow::nodes::testing;

    #[tokio::test]
    async fn test_empty_floorplan() {
        let llm = MockLlmClient::new(vec![]);
        let prompts = PromptLoader::embedded_only();

        let patch = ResponseGenerationNode
            .run(&ConversationState::default(), &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert_eq!(patch.final_response.as_deref(), Some(NO_FLOORPLAN));
    }

    #[tokio::test]
    async fn test_summary_includes_budget_status() {
        let llm = MockLlmClient::new(vec![]);
        let prompts = PromptLoader::embedded_only();
        let state = ConversationState {
            floorplan: Floorplan::new().add_room("Kitchen", RoomType::Kitchen, 12.0, 14.0),
            total_area: 168.0,
            estimated_cost: Some(58_800.0),
            user_budget: Some(100_000.0),
            ..ConversationState::default()
        };

        let patch = ResponseGenerationNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        let reply = patch.final_response.unwrap();
        assert!(reply.contains("Kitchen: 12' × 14'"));
        assert!(reply.contains("Status: ✅ Within budget"));
    }
}
