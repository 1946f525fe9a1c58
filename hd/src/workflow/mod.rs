//! Intent-routing workflow
//!
//! Each user message enters at the router and flows along conditional edges
//! through the stages until one of them produces the turn's reply.

mod graph;
mod node;
pub mod nodes;
mod orchestrator;
mod routing;
mod state;

pub use graph::{Edge, Graph, GraphBuilder, GraphError, Next, RouteFn};
pub use node::{Node, NodeContext, NodeId};
pub use orchestrator::{Orchestrator, PENDING_REPLY, TurnOutcome};
pub use routing::{route_from_analyst, route_from_mutator, route_from_router};
pub use state::{ConversationState, StatePatch};
