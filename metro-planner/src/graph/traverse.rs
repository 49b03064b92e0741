//! Traversal strategies over [`Graph`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::{debug, trace};

use crate::graph::{Edge, Graph, GraphError, ParentMap};

/// A way of exploring a graph from a source vertex.
///
/// Implementations fill a [`ParentMap`] with, for every vertex they
/// reach, the edge it was discovered through. Passing `goal: Some(dst)`
/// lets the strategy stop early once `dst` is settled; `None` explores
/// everything reachable. The cost callback receives the cost already
/// accumulated at the edge's origin alongside the edge itself.
pub trait TraversalStrategy<V, E> {
    fn traverse(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        goal: Option<&V>,
        cost: &mut dyn FnMut(f64, &E) -> f64,
    ) -> Result<ParentMap<V, E>, GraphError>;
}

/// Depth-first exploration. Ignores edge costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl<V, E> TraversalStrategy<V, E> for DepthFirst
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn traverse(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        goal: Option<&V>,
        _cost: &mut dyn FnMut(f64, &E) -> f64,
    ) -> Result<ParentMap<V, E>, GraphError> {
        if !graph.contains(src) {
            return Err(GraphError::VertexNotFound);
        }

        let mut parents = ParentMap::new();
        if goal == Some(src) {
            return Ok(parents);
        }

        let mut visited = HashSet::new();
        visited.insert(src.clone());
        let mut stack = vec![src.clone()];

        while let Some(current) = stack.pop() {
            for edge in graph.outgoing_edges(&current)? {
                let next = edge.destination();
                if visited.contains(next) {
                    continue;
                }
                visited.insert(next.clone());
                parents.insert(next.clone(), edge.clone());
                if goal == Some(next) {
                    return Ok(parents);
                }
                stack.push(next.clone());
            }
        }
        Ok(parents)
    }
}

/// Cost-ordered exploration (Dijkstra).
///
/// Vertices are settled cheapest-first, so the first time the goal is
/// settled its parent chain is an optimal route. Because the callback
/// sees the accumulated cost at each edge's origin, edge costs may
/// depend on when the edge is taken; costs must still be non-negative
/// for the cheapest-first ordering to hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl<V, E> TraversalStrategy<V, E> for Dijkstra
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn traverse(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        goal: Option<&V>,
        cost: &mut dyn FnMut(f64, &E) -> f64,
    ) -> Result<ParentMap<V, E>, GraphError> {
        if !graph.contains(src) {
            return Err(GraphError::VertexNotFound);
        }
        debug!(
            vertices = graph.vertex_count(),
            "starting cost-ordered traversal"
        );

        let mut parents = ParentMap::new();
        let mut best: HashMap<V, f64> = HashMap::new();
        best.insert(src.clone(), 0.0);
        let mut frontier: HashSet<V> = graph.vertices().cloned().collect();

        while !frontier.is_empty() {
            let Some((current, current_cost)) = frontier
                .iter()
                .map(|vertex| {
                    let known = best.get(vertex).copied().unwrap_or(f64::INFINITY);
                    (vertex, known)
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(vertex, known)| (vertex.clone(), known))
            else {
                break;
            };

            if current_cost.is_infinite() {
                // Everything left in the frontier is unreachable.
                debug!(remaining = frontier.len(), "traversal frontier exhausted");
                break;
            }
            if goal == Some(&current) {
                debug!(cost = current_cost, "goal settled");
                return Ok(parents);
            }
            frontier.remove(&current);
            trace!(cost = current_cost, "settled vertex");

            for edge in graph.outgoing_edges(&current)? {
                let next = edge.destination();
                if !frontier.contains(next) {
                    continue;
                }
                let candidate = current_cost + cost(current_cost, edge);
                let known = best.get(next).copied().unwrap_or(f64::INFINITY);
                if candidate < known {
                    best.insert(next.clone(), candidate);
                    parents.insert(next.clone(), edge.clone());
                }
            }
        }
        Ok(parents)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::route_from_traversal;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Step {
        from: usize,
        to: usize,
        weight: f64,
    }

    impl Edge<usize> for Step {
        fn origin(&self) -> &usize {
            &self.from
        }

        fn destination(&self) -> &usize {
            &self.to
        }
    }

    fn chain(weights: &[f64]) -> Graph<usize, Step> {
        let mut graph = Graph::new();
        for (i, weight) in weights.iter().enumerate() {
            graph.add_edge(Step {
                from: i,
                to: i + 1,
                weight: *weight,
            });
        }
        graph
    }

    proptest! {
        /// A chain is traversed end to end, whatever the weights
        #[test]
        fn dijkstra_covers_chains(weights in proptest::collection::vec(0.1f64..100.0, 1..8)) {
            let graph = chain(&weights);
            let mut cost = |_: f64, step: &Step| step.weight;
            let parents = graph
                .traverse(&Dijkstra, &0, Some(&weights.len()), &mut cost)
                .unwrap();
            let route = route_from_traversal(&parents, &0, &weights.len()).unwrap();
            prop_assert_eq!(route.len(), weights.len());
        }

        /// Depth-first discovers every chain vertex when unconstrained
        #[test]
        fn depth_first_covers_chains(len in 1usize..10) {
            let graph = chain(&vec![1.0; len]);
            let mut cost = |_: f64, step: &Step| step.weight;
            let parents = graph.traverse(&DepthFirst, &0, None, &mut cost).unwrap();
            prop_assert_eq!(parents.len(), len);
        }
    }
}
