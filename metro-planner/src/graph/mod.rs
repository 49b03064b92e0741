//! A directed graph with pluggable traversal strategies.
//!
//! The graph is generic over vertex and edge types; edges know their own
//! endpoints through the [`Edge`] trait. Traversals produce a parent map
//! (each reached vertex paired with the edge that discovered it) from
//! which concrete routes are reconstructed.

mod traverse;

pub use traverse::{DepthFirst, Dijkstra, TraversalStrategy};

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Error returned by graph lookups and route reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("vertex is not part of the graph")]
    VertexNotFound,
    #[error("destination was not reached by the traversal")]
    DestinationNotReached,
    #[error("parent chain does not lead back to the source")]
    SourceNotReached,
}

/// A directed edge that knows its endpoints.
pub trait Edge<V> {
    fn origin(&self) -> &V;
    fn destination(&self) -> &V;
}

/// Map from reached vertex to the edge it was discovered through.
pub type ParentMap<V, E> = HashMap<V, E>;

/// Directed graph stored as per-vertex outgoing adjacency lists.
///
/// Vertices without outgoing edges still own an (empty) entry, so
/// membership checks and vertex iteration see every endpoint ever added.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    outgoing: HashMap<V, Vec<E>>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self {
            outgoing: HashMap::new(),
        }
    }
}

impl<V, E> Graph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex. Returns false when it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        match self.outgoing.entry(vertex) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Vec::new());
                true
            }
        }
    }

    /// Insert an edge, implicitly adding both endpoints.
    ///
    /// Returns false when an equal edge already leaves the same origin.
    pub fn add_edge(&mut self, edge: E) -> bool {
        self.add_vertex(edge.destination().clone());
        let out = self.outgoing.entry(edge.origin().clone()).or_default();
        if out.contains(&edge) {
            return false;
        }
        out.push(edge);
        true
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.outgoing.contains_key(vertex)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.outgoing.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = &E> {
        self.outgoing.values().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    pub fn outgoing_edges(&self, vertex: &V) -> Result<&[E], GraphError> {
        self.outgoing
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or(GraphError::VertexNotFound)
    }

    /// Remove one edge. Returns false when it was not present.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(out) = self.outgoing.get_mut(edge.origin()) else {
            return false;
        };
        let Some(index) = out.iter().position(|candidate| candidate == edge) else {
            return false;
        };
        out.remove(index);
        true
    }

    /// Remove a vertex together with every edge touching it.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        if self.outgoing.remove(vertex).is_none() {
            return false;
        }
        for out in self.outgoing.values_mut() {
            out.retain(|edge| edge.destination() != vertex);
        }
        true
    }

    /// Run a traversal strategy from `src`.
    ///
    /// With `goal: Some(dst)` the strategy may stop as soon as `dst` is
    /// settled; with `None` it explores everything reachable. The cost
    /// callback receives the cost accumulated up to the edge's origin,
    /// which is how time-dependent costs see the current clock.
    pub fn traverse<S>(
        &self,
        strategy: &S,
        src: &V,
        goal: Option<&V>,
        cost: &mut dyn FnMut(f64, &E) -> f64,
    ) -> Result<ParentMap<V, E>, GraphError>
    where
        S: TraversalStrategy<V, E> + ?Sized,
    {
        strategy.traverse(self, src, goal, cost)
    }
}

/// Rebuild the `src`-to-`dst` route from a traversal's parent map.
///
/// Returns the edges in travel order. An equal source and destination
/// yield an empty route.
pub fn route_from_traversal<V, E>(
    parents: &ParentMap<V, E>,
    src: &V,
    dst: &V,
) -> Result<Vec<E>, GraphError>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone,
{
    if src == dst {
        return Ok(Vec::new());
    }
    if !parents.contains_key(dst) {
        return Err(GraphError::DestinationNotReached);
    }

    let mut route = Vec::new();
    let mut current = dst.clone();
    while current != *src {
        let edge = parents.get(&current).ok_or(GraphError::SourceNotReached)?;
        current = edge.origin().clone();
        route.push(edge.clone());
    }
    route.reverse();
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Hop {
        from: &'static str,
        to: &'static str,
    }

    impl Edge<&'static str> for Hop {
        fn origin(&self) -> &&'static str {
            &self.from
        }

        fn destination(&self) -> &&'static str {
            &self.to
        }
    }

    fn hop(from: &'static str, to: &'static str) -> Hop {
        Hop { from, to }
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph: Graph<&'static str, Hop> = Graph::new();
        assert!(graph.add_vertex("a"));
        assert!(!graph.add_vertex("a"));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn add_edge_registers_endpoints() {
        let mut graph: Graph<&'static str, Hop> = Graph::new();
        assert!(graph.add_edge(hop("a", "b")));
        assert!(graph.contains(&"a"));
        assert!(graph.contains(&"b"));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn duplicate_edges_are_rejected() {
        let mut graph: Graph<&'static str, Hop> = Graph::new();
        assert!(graph.add_edge(hop("a", "b")));
        assert!(!graph.add_edge(hop("a", "b")));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn parallel_distinct_edges_are_kept() {
        #[derive(Debug, Clone, PartialEq)]
        struct Weighted(Hop, u32);

        impl Edge<&'static str> for Weighted {
            fn origin(&self) -> &&'static str {
                self.0.origin()
            }

            fn destination(&self) -> &&'static str {
                self.0.destination()
            }
        }

        let mut graph: Graph<&'static str, Weighted> = Graph::new();
        assert!(graph.add_edge(Weighted(hop("a", "b"), 1)));
        assert!(graph.add_edge(Weighted(hop("a", "b"), 2)));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn outgoing_edges_requires_membership() {
        let mut graph: Graph<&'static str, Hop> = Graph::new();
        graph.add_edge(hop("a", "b"));
        assert_eq!(graph.outgoing_edges(&"a").unwrap().len(), 1);
        assert_eq!(graph.outgoing_edges(&"b").unwrap().len(), 0);
        assert_eq!(graph.outgoing_edges(&"c"), Err(GraphError::VertexNotFound));
    }

    #[test]
    fn remove_edge_leaves_vertices() {
        let mut graph: Graph<&'static str, Hop> = Graph::new();
        graph.add_edge(hop("a", "b"));
        assert!(graph.remove_edge(&hop("a", "b")));
        assert!(!graph.remove_edge(&hop("a", "b")));
        assert!(graph.contains(&"a"));
        assert!(graph.contains(&"b"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let mut graph: Graph<&'static str, Hop> = Graph::new();
        graph.add_edge(hop("a", "b"));
        graph.add_edge(hop("c", "b"));
        graph.add_edge(hop("b", "d"));

        assert!(graph.remove_vertex(&"b"));
        assert!(!graph.contains(&"b"));
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.remove_vertex(&"b"));
    }

    #[test]
    fn route_reconstruction_walks_parents() {
        let mut parents: ParentMap<&'static str, Hop> = ParentMap::new();
        parents.insert("b", hop("a", "b"));
        parents.insert("c", hop("b", "c"));

        let route = route_from_traversal(&parents, &"a", &"c").unwrap();
        assert_eq!(route, vec![hop("a", "b"), hop("b", "c")]);
    }

    #[test]
    fn route_to_self_is_empty() {
        let parents: ParentMap<&'static str, Hop> = ParentMap::new();
        assert_eq!(route_from_traversal(&parents, &"a", &"a").unwrap(), vec![]);
    }

    #[test]
    fn route_to_unreached_destination_fails() {
        let parents: ParentMap<&'static str, Hop> = ParentMap::new();
        assert_eq!(
            route_from_traversal(&parents, &"a", &"b"),
            Err(GraphError::DestinationNotReached)
        );
    }

    #[test]
    fn broken_parent_chain_fails() {
        let mut parents: ParentMap<&'static str, Hop> = ParentMap::new();
        parents.insert("c", hop("b", "c"));
        assert_eq!(
            route_from_traversal(&parents, &"a", &"c"),
            Err(GraphError::SourceNotReached)
        );
    }
}
