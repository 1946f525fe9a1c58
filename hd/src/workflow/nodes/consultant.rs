//! General design advice stage

use async_trait::async_trait;
use eyre::{Context, Result};
use tracing::debug;

use crate::domain::summary::summarize_floorplan;
use crate::llm;
use crate::prompts::ConsultantContext;
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

pub struct DesignConsultantNode;

#[async_trait]
impl Node for DesignConsultantNode {
    fn id(&self) -> NodeId {
        NodeId::DesignConsultant
    }

    async fn run(&self, state: &ConversationState, ctx: &NodeContext<'_>) -> Result<StatePatch> {
        debug!(message = %state.last_message, "DesignConsultantNode::run: called");
        let floorplan_summary = (!state.floorplan.is_empty()).then(|| {
            summarize_floorplan(
                &state.floorplan,
                state.floorplan.total_area(),
                state.estimated_cost.unwrap_or(0.0),
                state.user_budget,
            )
        });

        let prompt = ctx.prompts.render(
            "consultant",
            &ConsultantContext {
                message: state.last_message.clone(),
                history: state.history_text(),
                floorplan_summary,
            },
        )?;

        let answer = llm::ask(ctx.llm, &prompt, ctx.max_tokens)
            .await
            .context("Failed to get design advice")?;
        Ok(StatePatch::new().with_final_response(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;
    use crate::workflow::nodes::testing;

    #[tokio::test]
    async fn test_answer_is_returned_verbatim() {
        let llm = MockLlmClient::new(vec!["Engineered hardwood handles Montreal winters well."]);
        let prompts = PromptLoader::embedded_only();
        let mut state = ConversationState::new();
        state.begin_turn("What's the best flooring?");

        let patch = DesignConsultantNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert_eq!(
            patch.final_response.as_deref(),
            Some("Engineered hardwood handles Montreal winters well.")
        );
        assert!(patch.floorplan.is_none());
        assert!(llm.prompts()[0].contains("User's Question: What's the best flooring?"));
    }

    #[tokio::test]
    async fn test_blank_answer_is_kept() {
        let llm = MockLlmClient::new(vec!["   "]);
        let prompts = PromptLoader::embedded_only();
        let mut state = ConversationState::new();
        state.begin_turn("Any tips?");

        let patch = DesignConsultantNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert_eq!(patch.final_response.as_deref(), Some("   "));
    }

    #[tokio::test]
    async fn test_reasoner_failure_is_an_error() {
        let llm = MockLlmClient::with_outcomes(vec![Err("down".to_string())]);
        let prompts = PromptLoader::embedded_only();
        let mut state = ConversationState::new();
        state.begin_turn("Any tips?");

        let err = DesignConsultantNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("down"));
    }
}
