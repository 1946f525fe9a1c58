//! Workflow graph
//!
//! A fixed set of stages joined by an edge table. Each stage has exactly one
//! outgoing edge, either unconditional or decided by a routing function over
//! the merged state. Graphs are validated when built: every edge target must
//! be a registered stage and no path may revisit a stage.

use std::collections::{HashMap, HashSet};

use eyre::{Result, eyre};
use thiserror::Error;
use tracing::{debug, info};

use super::node::{Node, NodeContext, NodeId};
use super::nodes;
use super::routing;
use super::state::ConversationState;

/// Where control goes after a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Next {
    Node(NodeId),
    End,
}

/// Routing function for a conditional edge
pub type RouteFn = fn(&ConversationState) -> Next;

/// Outgoing edge of a stage
#[derive(Clone)]
pub enum Edge {
    Always(Next),
    /// `targets` lists every destination `route` may return
    Conditional { targets: Vec<Next>, route: RouteFn },
}

impl Edge {
    fn targets(&self) -> Vec<Next> {
        match self {
            Edge::Always(next) => vec![*next],
            Edge::Conditional { targets, .. } => targets.clone(),
        }
    }
}

/// Errors found while building a graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Entry stage {0} is not registered")]
    MissingEntry(NodeId),

    #[error("Stage {0} has no outgoing edge")]
    MissingEdge(NodeId),

    #[error("Edge from {from} targets unregistered stage {to}")]
    UnknownTarget { from: NodeId, to: NodeId },

    #[error("Cycle detected: {}", .0.iter().map(NodeId::as_str).collect::<Vec<_>>().join(" -> "))]
    Cycle(Vec<NodeId>),
}

/// Builder collecting stages and edges before validation
pub struct GraphBuilder {
    entry: NodeId,
    nodes: HashMap<NodeId, Box<dyn Node>>,
    edges: HashMap<NodeId, Edge>,
}

impl GraphBuilder {
    pub fn new(entry: NodeId) -> Self {
        Self {
            entry,
            nodes: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    pub fn node(mut self, node: Box<dyn Node>) -> Self {
        self.nodes.insert(node.id(), node);
        self
    }

    pub fn edge(mut self, from: NodeId, to: Next) -> Self {
        self.edges.insert(from, Edge::Always(to));
        self
    }

    pub fn conditional(mut self, from: NodeId, targets: Vec<Next>, route: RouteFn) -> Self {
        self.edges.insert(from, Edge::Conditional { targets, route });
        self
    }

    /// Validate and freeze the graph
    pub fn build(self) -> Result<Graph, GraphError> {
        debug!(nodes = self.nodes.len(), edges = self.edges.len(), "build: called");
        if !self.nodes.contains_key(&self.entry) {
            return Err(GraphError::MissingEntry(self.entry));
        }

        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort();

        for id in &ids {
            let edge = self.edges.get(id).ok_or(GraphError::MissingEdge(*id))?;
            for target in edge.targets() {
                if let Next::Node(to) = target
                    && !self.nodes.contains_key(&to)
                {
                    return Err(GraphError::UnknownTarget { from: *id, to });
                }
            }
        }

        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut cycle_path = Vec::new();
        for id in &ids {
            if !visited.contains(id) && has_cycle_dfs(*id, &self.edges, &mut visited, &mut rec_stack, &mut cycle_path) {
                debug!(?cycle_path, "build: cycle detected");
                return Err(GraphError::Cycle(cycle_path));
            }
        }

        debug!("build: graph is valid");
        Ok(Graph {
            entry: self.entry,
            nodes: self.nodes,
            edges: self.edges,
        })
    }
}

/// DFS helper for cycle detection
fn has_cycle_dfs(
    node: NodeId,
    edges: &HashMap<NodeId, Edge>,
    visited: &mut HashSet<NodeId>,
    rec_stack: &mut HashSet<NodeId>,
    cycle_path: &mut Vec<NodeId>,
) -> bool {
    visited.insert(node);
    rec_stack.insert(node);
    cycle_path.push(node);

    if let Some(edge) = edges.get(&node) {
        for target in edge.targets() {
            let Next::Node(next) = target else {
                continue;
            };
            if !visited.contains(&next) {
                if has_cycle_dfs(next, edges, visited, rec_stack, cycle_path) {
                    return true;
                }
            } else if rec_stack.contains(&next) {
                debug!(%node, %next, "has_cycle_dfs: back edge found");
                cycle_path.push(next);
                return true;
            }
        }
    }

    rec_stack.remove(&node);
    cycle_path.pop();
    false
}

/// A validated, acyclic workflow graph
pub struct Graph {
    entry: NodeId,
    nodes: HashMap<NodeId, Box<dyn Node>>,
    edges: HashMap<NodeId, Edge>,
}

impl Graph {
    /// The house design workflow
    pub fn house_design() -> Result<Self, GraphError> {
        use NodeId::*;

        GraphBuilder::new(Router)
            .node(Box::new(nodes::RouterNode))
            .node(Box::new(nodes::FloorplanMutatorNode))
            .node(Box::new(nodes::BudgetAnalystNode))
            .node(Box::new(nodes::ConstraintSolverNode))
            .node(Box::new(nodes::DesignConsultantNode))
            .node(Box::new(nodes::BudgetHandlerNode))
            .node(Box::new(nodes::ResponseGenerationNode))
            .conditional(
                Router,
                vec![
                    Next::Node(FloorplanMutator),
                    Next::Node(DesignConsultant),
                    Next::Node(BudgetHandler),
                ],
                routing::route_from_router,
            )
            .conditional(
                FloorplanMutator,
                vec![Next::Node(BudgetAnalyst), Next::End],
                routing::route_from_mutator,
            )
            .conditional(
                BudgetAnalyst,
                vec![Next::Node(ConstraintSolver), Next::Node(ResponseGeneration)],
                routing::route_from_analyst,
            )
            .edge(ConstraintSolver, Next::End)
            .edge(DesignConsultant, Next::End)
            .edge(BudgetHandler, Next::End)
            .edge(ResponseGeneration, Next::End)
            .build()
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drive the graph from the entry stage until it ends
    ///
    /// Each stage's patch is merged into `state` before the outgoing edge is
    /// evaluated. Returns the stages visited, in order.
    pub async fn run(&self, state: &mut ConversationState, ctx: &NodeContext<'_>) -> Result<Vec<NodeId>> {
        debug!(entry = %self.entry, "run: called");
        let mut visited = Vec::new();
        let mut current = Next::Node(self.entry);

        while let Next::Node(id) = current {
            if visited.len() >= self.nodes.len() {
                return Err(eyre!("Workflow exceeded {} stages without ending", self.nodes.len()));
            }

            let node = self.nodes.get(&id).ok_or_else(|| eyre!("Stage {} is not registered", id))?;
            info!(stage = %id, "run: entering stage");
            let patch = node.run(state, ctx).await?;
            state.merge(patch);
            visited.push(id);

            current = self.next_after(id, state)?;
            debug!(from = %id, next = ?current, "run: transition");
        }

        info!(stages = visited.len(), "run: workflow ended");
        Ok(visited)
    }

    fn next_after(&self, id: NodeId, state: &ConversationState) -> Result<Next> {
        match self.edges.get(&id) {
            Some(Edge::Always(next)) => Ok(*next),
            Some(Edge::Conditional { targets, route }) => {
                let next = route(state);
                if targets.contains(&next) {
                    Ok(next)
                } else {
                    Err(eyre!("Stage {} routed to undeclared target {:?}", id, next))
                }
            }
            None => Err(eyre!("Stage {} has no outgoing edge", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;
    use crate::workflow::state::StatePatch;
    use async_trait::async_trait;

    struct Stub(NodeId);

    #[async_trait]
    impl Node for Stub {
        fn id(&self) -> NodeId {
            self.0
        }

        async fn run(&self, _state: &ConversationState, _ctx: &NodeContext<'_>) -> Result<StatePatch> {
            Ok(StatePatch::new().with_final_response(self.0.as_str()))
        }
    }

    #[test]
    fn test_house_design_graph_is_valid() {
        let graph = Graph::house_design().unwrap();
        assert_eq!(graph.entry(), NodeId::Router);
        assert_eq!(graph.len(), 7);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let err = GraphBuilder::new(NodeId::Router)
            .node(Box::new(Stub(NodeId::Router)))
            .node(Box::new(Stub(NodeId::BudgetAnalyst)))
            .edge(NodeId::Router, Next::Node(NodeId::BudgetAnalyst))
            .edge(NodeId::BudgetAnalyst, Next::Node(NodeId::Router))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, GraphError::Cycle(_)));
        assert!(err.to_string().contains("router"));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let err = GraphBuilder::new(NodeId::Router)
            .node(Box::new(Stub(NodeId::Router)))
            .edge(NodeId::Router, Next::Node(NodeId::BudgetHandler))
            .build()
            .err()
            .unwrap();
        assert_eq!(
            err,
            GraphError::UnknownTarget {
                from: NodeId::Router,
                to: NodeId::BudgetHandler
            }
        );
    }

    #[test]
    fn test_missing_edge_is_rejected() {
        let err = GraphBuilder::new(NodeId::Router)
            .node(Box::new(Stub(NodeId::Router)))
            .build()
            .err()
            .unwrap();
        assert_eq!(err, GraphError::MissingEdge(NodeId::Router));
    }

    #[tokio::test]
    async fn test_run_follows_edges_and_merges() {
        let graph = GraphBuilder::new(NodeId::Router)
            .node(Box::new(Stub(NodeId::Router)))
            .node(Box::new(Stub(NodeId::ResponseGeneration)))
            .edge(NodeId::Router, Next::Node(NodeId::ResponseGeneration))
            .edge(NodeId::ResponseGeneration, Next::End)
            .build()
            .unwrap();

        let llm = MockLlmClient::new(vec![]);
        let prompts = PromptLoader::embedded_only();
        let ctx = NodeContext {
            llm: &llm,
            prompts: &prompts,
            max_tokens: 100,
        };
        let mut state = ConversationState::new();

        let stages = graph.run(&mut state, &ctx).await.unwrap();

        assert_eq!(stages, vec![NodeId::Router, NodeId::ResponseGeneration]);
        assert_eq!(state.final_response.as_deref(), Some("response_generation"));
        assert_eq!(llm.call_count(), 0);
    }
}
