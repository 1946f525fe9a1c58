//! Workflow stages

mod analyst;
mod budget_handler;
mod constraint;
mod consultant;
mod mutator;
mod response;
mod router;

pub use analyst::BudgetAnalystNode;
pub use budget_handler::BudgetHandlerNode;
pub use constraint::ConstraintSolverNode;
pub use consultant::DesignConsultantNode;
pub use mutator::FloorplanMutatorNode;
pub use response::ResponseGenerationNode;
pub use router::RouterNode;
