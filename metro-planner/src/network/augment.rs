//! Temporary walking edges for off-network journeys.

use tracing::debug;

use crate::geo::{self, GeoPosition};
use crate::network::{Node, Segment, TransportNetwork, WalkSegment};

/// How far a walking graft may reach, in metres.
pub const WALK_GRAFT_RADIUS_M: f64 = 2_000.0;

/// How many neighbours a single endpoint is grafted to, at most.
pub const MAX_WALK_GRAFTS: usize = 5;

/// Whether a route search may walk between any two stops, or only at
/// the journey's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkPolicy {
    #[default]
    EndpointsOnly,
    AllStops,
}

/// A scoped batch of walking edges grafted onto the network.
///
/// Grafts exist only while the guard lives: on drop, every walking edge
/// and every anonymous waypoint is swept from the graph, whichever way
/// the scope unwinds. The static network never contains either, so the
/// sweep restores it exactly.
#[derive(Debug)]
pub struct Augmentation<'a> {
    network: &'a mut TransportNetwork,
}

#[derive(Clone, Copy)]
enum Direction {
    Outward,
    Inward,
}

impl<'a> Augmentation<'a> {
    pub fn begin(network: &'a mut TransportNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &TransportNetwork {
        self.network
    }

    /// Graft a journey origin at `position` onto the network, walking
    /// outward to its nearest neighbours.
    ///
    /// A position occupied by a stop resolves to that stop, no grafting
    /// needed. Otherwise neighbours within [`WALK_GRAFT_RADIUS_M`] are
    /// linked, capped at [`MAX_WALK_GRAFTS`]; when the radius is empty
    /// the single closest node is linked instead, however far away.
    pub fn attach_origin(&mut self, position: GeoPosition) -> Result<Node, geo::NoCandidates> {
        self.attach(position, Direction::Outward)
    }

    /// Graft a journey destination at `position`, with walking edges
    /// pointing inward from its nearest neighbours.
    pub fn attach_target(&mut self, position: GeoPosition) -> Result<Node, geo::NoCandidates> {
        self.attach(position, Direction::Inward)
    }

    fn attach(
        &mut self,
        position: GeoPosition,
        direction: Direction,
    ) -> Result<Node, geo::NoCandidates> {
        if let Some(stop) = self.network.stop_at_position(position) {
            return Ok(stop.clone());
        }

        let endpoint = Node::waypoint(position);
        let candidates: Vec<Node> = self.network.nodes().cloned().collect();
        let sorted = geo::distance_sorted(position, candidates);
        let neighbours =
            geo::closest_within_radius_or_nearest(sorted, MAX_WALK_GRAFTS, WALK_GRAFT_RADIUS_M)?;

        let mut added = 0usize;
        for neighbour in neighbours {
            let walk = match direction {
                Direction::Outward => WalkSegment::new(endpoint.clone(), neighbour),
                Direction::Inward => WalkSegment::new(neighbour, endpoint.clone()),
            };
            if self.network.graph.add_edge(Segment::Walk(walk)) {
                added += 1;
            }
        }
        debug!(walks = added, "grafted journey endpoint");
        Ok(endpoint)
    }

    /// Graft every stop to its walkable neighbours, enabling transfers
    /// on foot anywhere along a route.
    ///
    /// Unlike endpoint grafting there is no fallback: a stop with
    /// nothing inside the radius stays unlinked.
    pub fn link_all_stops(&mut self) {
        let stops: Vec<Node> = self.network.stops().cloned().collect();
        let mut added = 0usize;
        for stop in &stops {
            let candidates: Vec<Node> = self
                .network
                .nodes()
                .filter(|node| *node != stop)
                .cloned()
                .collect();
            let sorted = geo::distance_sorted(stop.position(), candidates);
            for neighbour in
                geo::closest_within_radius(sorted, MAX_WALK_GRAFTS, WALK_GRAFT_RADIUS_M)
            {
                let walk = WalkSegment::new(stop.clone(), neighbour);
                if self.network.graph.add_edge(Segment::Walk(walk)) {
                    added += 1;
                }
            }
        }
        debug!(
            walks = added,
            stops = stops.len(),
            "linked stops for walking transfers"
        );
    }
}

impl Drop for Augmentation<'_> {
    fn drop(&mut self) {
        let walks: Vec<Segment> = self
            .network
            .graph
            .edges()
            .filter(|segment| segment.is_walk())
            .cloned()
            .collect();
        for walk in &walks {
            self.network.graph.remove_edge(walk);
        }

        let waypoints: Vec<Node> = self
            .network
            .nodes()
            .filter(|node| !node.is_stop())
            .cloned()
            .collect();
        for waypoint in &waypoints {
            self.network.graph.remove_vertex(waypoint);
        }
        debug!(
            walks = walks.len(),
            waypoints = waypoints.len(),
            "swept augmentation"
        );
    }
}
