//! Conditional edge predicates

use super::graph::Next;
use super::node::NodeId;
use super::state::ConversationState;
use crate::domain::budget;
use crate::intent::Intent;

/// Dispatch on the classified intent; unclassified messages go to the consultant
pub fn route_from_router(state: &ConversationState) -> Next {
    match state.next_action {
        Some(Intent::ModifyFloorplan) => Next::Node(NodeId::FloorplanMutator),
        Some(Intent::SetBudget) => Next::Node(NodeId::BudgetHandler),
        Some(Intent::AskQuestion) | Some(Intent::Other) | None => Next::Node(NodeId::DesignConsultant),
    }
}

/// A mutator that already replied ends the turn
pub fn route_from_mutator(state: &ConversationState) -> Next {
    if state.final_response.is_some() {
        Next::End
    } else {
        Next::Node(NodeId::BudgetAnalyst)
    }
}

pub fn route_from_analyst(state: &ConversationState) -> Next {
    if budget::exceeds_budget(state.estimated_cost, state.user_budget) {
        Next::Node(NodeId::ConstraintSolver)
    } else {
        Next::Node(NodeId::ResponseGeneration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_action(action: Option<Intent>) -> ConversationState {
        ConversationState {
            next_action: action,
            ..ConversationState::default()
        }
    }

    #[test]
    fn test_route_from_router() {
        assert_eq!(
            route_from_router(&state_with_action(Some(Intent::ModifyFloorplan))),
            Next::Node(NodeId::FloorplanMutator)
        );
        assert_eq!(
            route_from_router(&state_with_action(Some(Intent::SetBudget))),
            Next::Node(NodeId::BudgetHandler)
        );
        for action in [Some(Intent::AskQuestion), Some(Intent::Other), None] {
            assert_eq!(
                route_from_router(&state_with_action(action)),
                Next::Node(NodeId::DesignConsultant)
            );
        }
    }

    #[test]
    fn test_route_from_mutator() {
        let mut state = ConversationState::default();
        assert_eq!(route_from_mutator(&state), Next::Node(NodeId::BudgetAnalyst));
        state.final_response = Some("done".to_string());
        assert_eq!(route_from_mutator(&state), Next::End);
    }

    #[test]
    fn test_route_from_analyst() {
        let mut state = ConversationState {
            estimated_cost: Some(700_000.0),
            ..ConversationState::default()
        };
        assert_eq!(route_from_analyst(&state), Next::Node(NodeId::ResponseGeneration));

        state.user_budget = Some(650_000.0);
        assert_eq!(route_from_analyst(&state), Next::Node(NodeId::ConstraintSolver));

        state.user_budget = Some(700_000.0);
        assert_eq!(route_from_analyst(&state), Next::Node(NodeId::ResponseGeneration));

        state.user_budget = Some(0.0);
        assert_eq!(route_from_analyst(&state), Next::Node(NodeId::ResponseGeneration));
    }
}
