//! Floorplan modification stage

use async_trait::async_trait;
use eyre::Result;
use tracing::{debug, info, warn};

use crate::domain::budget::format_area;
use crate::domain::summary::summarize_floorplan;
use crate::domain::{Floorplan, RoomType, estimate_cost};
use crate::interpreter::{self, Interpretation};
use crate::llm;
use crate::prompts::{ArchitectContext, ROOM_GUIDELINES};
use crate::workflow::node::{Node, NodeContext, NodeId};
use crate::workflow::state::{ConversationState, StatePatch};

pub struct FloorplanMutatorNode;

impl FloorplanMutatorNode {
    fn architect_context(state: &ConversationState) -> ArchitectContext {
        let current = &state.floorplan;
        let total_area = current.total_area();
        let floorplan_summary = if current.is_empty() {
            "Empty floorplan".to_string()
        } else {
            summarize_floorplan(current, total_area, 0.0, None)
        };

        ArchitectContext {
            history: state.history_text(),
            floorplan_summary,
            total_area: format_area(total_area),
            budget_display: state.budget_display(),
            message: state.last_message.clone(),
            room_types: RoomType::DISPLAY_ORDER
                .iter()
                .map(RoomType::as_str)
                .collect::<Vec<_>>()
                .join("|"),
            guidelines: ROOM_GUIDELINES.to_vec(),
        }
    }
}

/// Patch for a changed floorplan; non-empty plans also carry a terminal reply
fn confirm(floorplan: Floorplan, heading: &str, user_budget: Option<f64>) -> StatePatch {
    if floorplan.is_empty() {
        debug!("confirm: floorplan is empty, no reply");
        return StatePatch::new().with_floorplan(floorplan);
    }

    let total_area = floorplan.total_area();
    let cost = estimate_cost(total_area);
    let summary = summarize_floorplan(&floorplan, total_area, cost, user_budget);

    StatePatch::new()
        .with_total_area(total_area)
        .with_estimated_cost(cost)
        .with_final_response(format!("✅ **{}**\n\n{}", heading, summary))
        .with_floorplan(floorplan)
}

#[async_trait]
impl Node for FloorplanMutatorNode {
    fn id(&self) -> NodeId {
        NodeId::FloorplanMutator
    }

    async fn run(&self, state: &ConversationState, ctx: &NodeContext<'_>) -> Result<StatePatch> {
        debug!(rooms = state.floorplan.len(), "FloorplanMutatorNode::run: called");
        let prompt = ctx.prompts.render("architect", &Self::architect_context(state))?;

        let interpretation = match llm::ask(ctx.llm, &prompt, ctx.max_tokens).await {
            Ok(reply) => interpreter::interpret(&reply, &state.last_message, &state.floorplan),
            Err(e) => {
                warn!(error = %e, "FloorplanMutatorNode::run: Reasoner unavailable, trying fallback");
                interpreter::interpret_fallback(&state.last_message)
            }
        };

        Ok(match interpretation {
            Interpretation::Applied { command, floorplan } => {
                info!(action = command.action(), rooms = floorplan.len(), "FloorplanMutatorNode::run: applied");
                confirm(floorplan, "Floorplan Updated Successfully!", state.user_budget)
            }
            Interpretation::Fallback { floorplan } => {
                info!(rooms = floorplan.len(), "FloorplanMutatorNode::run: fallback plan");
                confirm(floorplan, "Floorplan Created Successfully!", state.user_budget)
            }
            Interpretation::Unchanged => {
                info!("FloorplanMutatorNode::run: floorplan unchanged");
                StatePatch::new().with_floorplan(state.floorplan.clone())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;
    use crate::workflow::nodes::testing;

    fn state_for(message: &str, floorplan: Floorplan) -> ConversationState {
        let mut state = ConversationState {
            floorplan,
            ..ConversationState::default()
        };
        state.begin_turn(message);
        state
    }

    #[tokio::test]
    async fn test_add_room_produces_confirmation() {
        let llm = MockLlmClient::new(vec![
            r#"Sure! {"action": "add_room", "room_name": "Master Bedroom", "room_type": "bedroom", "length_ft": 14, "width_ft": 16}"#,
        ]);
        let prompts = PromptLoader::embedded_only();
        let state = state_for("Add a master bedroom 14x16 feet", Floorplan::new());

        let patch = FloorplanMutatorNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert_eq!(patch.total_area, Some(224.0));
        assert_eq!(patch.estimated_cost, Some(78_400.0));
        let reply = patch.final_response.unwrap();
        assert!(reply.starts_with("✅ **Floorplan Updated Successfully!**\n\n"));
        assert!(reply.contains("Master Bedroom"));
        assert!(llm.prompts()[0].contains("Empty floorplan"));
    }

    #[tokio::test]
    async fn test_unusable_reply_leaves_floorplan() {
        let llm = MockLlmClient::new(vec!["I'm not sure what you mean."]);
        let prompts = PromptLoader::embedded_only();
        let plan = Floorplan::new().add_room("Kitchen", RoomType::Kitchen, 12.0, 14.0);
        let state = state_for("make it nicer", plan.clone());

        let patch = FloorplanMutatorNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert_eq!(patch, StatePatch::new().with_floorplan(plan));
    }

    #[tokio::test]
    async fn test_reasoner_failure_uses_fallback() {
        let llm = MockLlmClient::with_outcomes(vec![Err("timeout".to_string())]);
        let prompts = PromptLoader::embedded_only();
        let state = state_for("design a three floor house with 3 bedrooms", Floorplan::new());

        let patch = FloorplanMutatorNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert_eq!(patch.floorplan.as_ref().map(Floorplan::len), Some(9));
        assert_eq!(patch.total_area, Some(1772.0));
        assert!(
            patch
                .final_response
                .unwrap()
                .starts_with("✅ **Floorplan Created Successfully!**")
        );
    }

    #[tokio::test]
    async fn test_removing_last_room_has_no_reply() {
        let llm = MockLlmClient::new(vec![r#"{"action": "remove_room", "room_name": "Kitchen"}"#]);
        let prompts = PromptLoader::embedded_only();
        let plan = Floorplan::new().add_room("Kitchen", RoomType::Kitchen, 12.0, 14.0);
        let state = state_for("remove the kitchen", plan);

        let patch = FloorplanMutatorNode
            .run(&state, &testing::context(&llm, &prompts))
            .await
            .unwrap();

        assert!(patch.floorplan.unwrap().is_empty());
        assert!(patch.final_response.is_none());
        assert!(patch.total_area.is_none());
    }
}
