//! Explicit weighted directed graph.

use crate::core::{HeuristicProblem, SearchError, SearchProblem, SearchResult, SearchRng};

/// Node index.
pub type NodeId = u32;

/// A small explicit graph with non-negative edge costs and an optional
/// per-node heuristic (zero by default).
///
/// Actions are target node ids, listed in edge insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<(NodeId, f64)>>,
    heuristic: Vec<f64>,
    start: NodeId,
    goal: NodeId,
}

impl WeightedGraph {
    /// A graph with `nodes` nodes and no edges.
    pub fn new(nodes: usize, start: NodeId, goal: NodeId) -> SearchResult<Self> {
        if nodes == 0 || NodeId::try_from(nodes).is_err() {
            return Err(SearchError::invalid("nodes", format!("unusable node count {nodes}")));
        }
        let graph = Self {
            adjacency: vec![Vec::new(); nodes],
            heuristic: vec![0.0; nodes],
            start,
            goal,
        };
        graph.check_node("start", start)?;
        graph.check_node("goal", goal)?;
        Ok(graph)
    }

    fn check_node(&self, name: &'static str, node: NodeId) -> SearchResult<()> {
        if (node as usize) < self.adjacency.len() {
            Ok(())
        } else {
            Err(SearchError::invalid(
                name,
                format!("node {node} outside 0..{}", self.adjacency.len()),
            ))
        }
    }

    /// Add a directed edge.
    pub fn with_edge(mut self, from: NodeId, to: NodeId, cost: f64) -> SearchResult<Self> {
        self.check_node("from", from)?;
        self.check_node("to", to)?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(SearchError::invalid(
                "cost",
                format!("edge {from}->{to} cost must be finite and non-negative, got {cost}"),
            ));
        }
        let edges = &mut self.adjacency[from as usize];
        match edges.iter_mut().find(|(t, _)| *t == to) {
            Some(edge) => edge.1 = cost,
            None => edges.push((to, cost)),
        }
        Ok(self)
    }

    /// Add edges in both directions.
    pub fn with_undirected_edge(self, a: NodeId, b: NodeId, cost: f64) -> SearchResult<Self> {
        self.with_edge(a, b, cost)?.with_edge(b, a, cost)
    }

    /// Set the heuristic estimate of every node.
    pub fn with_heuristic(mut self, estimates: Vec<f64>) -> SearchResult<Self> {
        if estimates.len() != self.adjacency.len() {
            return Err(SearchError::invalid(
                "heuristic",
                format!("{} estimates for {} nodes", estimates.len(), self.adjacency.len()),
            ));
        }
        self.heuristic = estimates;
        Ok(self)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing edges of `node` in insertion order.
    #[must_use]
    pub fn edges(&self, node: NodeId) -> &[(NodeId, f64)] {
        self.adjacency
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl SearchProblem for WeightedGraph {
    type State = NodeId;
    type Action = NodeId;

    fn initial_state(&self) -> NodeId {
        self.start
    }

    fn actions(&self, state: &NodeId) -> Vec<NodeId> {
        self.edges(*state).iter().map(|(to, _)| *to).collect()
    }

    fn result(&self, _state: &NodeId, action: &NodeId) -> NodeId {
        *action
    }

    fn is_goal(&self, state: &NodeId) -> bool {
        *state == self.goal
    }

    fn action_cost(&self, state: &NodeId, action: &NodeId) -> f64 {
        self.edges(*state)
            .iter()
            .find(|(to, _)| to == action)
            .map_or(f64::INFINITY, |(_, cost)| *cost)
    }
}

impl HeuristicProblem for WeightedGraph {
    fn heuristic(&self, state: &NodeId) -> f64 {
        self.heuristic.get(*state as usize).copied().unwrap_or(0.0)
    }

    fn sample_state(&self, rng: &mut SearchRng) -> NodeId {
        rng.gen_range(0..self.adjacency.len()) as NodeId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_query() {
        let g = WeightedGraph::new(3, 0, 2)
            .and_then(|g| g.with_edge(0, 1, 2.0))
            .and_then(|g| g.with_undirected_edge(1, 2, 3.0))
            .unwrap();

        assert_eq!(g.actions(&0), vec![1]);
        assert_eq!(g.actions(&2), vec![1]);
        assert_eq!(g.action_cost(&1, &2), 3.0);
        assert_eq!(g.action_cost(&2, &0), f64::INFINITY);
        assert_eq!(g.heuristic(&1), 0.0);
    }

    #[test]
    fn test_edge_replaces_cost() {
        let g = WeightedGraph::new(2, 0, 1)
            .and_then(|g| g.with_edge(0, 1, 5.0))
            .and_then(|g| g.with_edge(0, 1, 1.0))
            .unwrap();
        assert_eq!(g.edges(0), &[(1, 1.0)]);
    }

    #[test]
    fn test_validation() {
        assert!(WeightedGraph::new(0, 0, 0).is_err());
        assert!(WeightedGraph::new(2, 0, 5).is_err());

        let g = WeightedGraph::new(2, 0, 1).unwrap();
        assert!(g.clone().with_edge(0, 7, 1.0).is_err());
        assert!(g.clone().with_edge(0, 1, -1.0).is_err());
        assert!(g.clone().with_edge(0, 1, f64::NAN).is_err());
        assert!(g.with_heuristic(vec![1.0]).is_err());
    }
}
