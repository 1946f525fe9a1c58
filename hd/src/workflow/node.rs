//! Workflow stage trait

use std::fmt;

use async_trait::async_trait;
use eyre::Result;
use serde::Serialize;

use super::state::{ConversationState, StatePatch};
use crate::llm::LlmClient;
use crate::prompts::PromptLoader;

/// Identifies a stage in the workflow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    Router,
    FloorplanMutator,
    BudgetAnalyst,
    ConstraintSolver,
    DesignConsultant,
    BudgetHandler,
    ResponseGeneration,
}

impl NodeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::FloorplanMutator => "floorplan_mutator",
            Self::BudgetAnalyst => "budget_analyst",
            Self::ConstraintSolver => "constraint_solver",
            Self::DesignConsultant => "design_consultant",
            Self::BudgetHandler => "budget_handler",
            Self::ResponseGeneration => "response_generation",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Collaborators every stage may use during a turn
pub struct NodeContext<'a> {
    pub llm: &'a dyn LlmClient,
    pub prompts: &'a PromptLoader,
    pub max_tokens: u32,
}

/// A single stage of the workflow
///
/// Stages read the running state and return a patch; they never mutate state
/// directly. Returning an error aborts the turn.
#[async_trait]
pub trait Node: Send + Sync {
    fn id(&self) -> NodeId;

    async fn run(&self, state: &ConversationState, ctx: &NodeContext<'_>) -> Result<StatePatch>;
}
