//! Network edges: scheduled transport hops and ad-hoc walks.

use std::sync::Arc;

use chrono::Duration;

use crate::graph;
use crate::network::Node;

/// Walking pace assumed for ad-hoc walks, in km/h.
pub const WALK_SPEED_KMH: f64 = 2.0;

/// Cost multiplier for walked distance in shortest-distance queries:
/// one walked kilometre counts as ten scheduled ones.
pub const WALK_DRUDGERY: f64 = 10.0;

/// One scheduled hop between consecutive stops of a line variant.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSegment {
    from: Node,
    to: Node,
    line: Arc<str>,
    variant: Arc<str>,
    duration: Duration,
    distance_km: f64,
}

impl TransportSegment {
    pub fn new(
        from: Node,
        to: Node,
        line: impl Into<Arc<str>>,
        variant: impl Into<Arc<str>>,
        duration: Duration,
        distance_km: f64,
    ) -> Self {
        Self {
            from,
            to,
            line: line.into(),
            variant: variant.into(),
            duration,
            distance_km,
        }
    }

    pub fn origin(&self) -> &Node {
        &self.from
    }

    pub fn destination(&self) -> &Node {
        &self.to
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

/// An ad-hoc walking connection between two nodes.
///
/// The length is fixed at construction as the spherical distance between
/// the two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkSegment {
    from: Node,
    to: Node,
    distance_m: f64,
}

impl WalkSegment {
    pub fn new(from: Node, to: Node) -> Self {
        let distance_m = from.position().distance_to(&to.position());
        Self {
            from,
            to,
            distance_m,
        }
    }

    pub fn origin(&self) -> &Node {
        &self.from
    }

    pub fn destination(&self) -> &Node {
        &self.to
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    /// Time to cover the walk at [`WALK_SPEED_KMH`], truncated to whole
    /// seconds.
    pub fn travel_duration(&self) -> Duration {
        Duration::seconds((self.distance_m / 1000.0 / WALK_SPEED_KMH * 3600.0) as i64)
    }
}

/// An edge of the transport network.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Transport(TransportSegment),
    Walk(WalkSegment),
}

impl Segment {
    pub fn origin(&self) -> &Node {
        match self {
            Segment::Transport(transport) => transport.origin(),
            Segment::Walk(walk) => walk.origin(),
        }
    }

    pub fn destination(&self) -> &Node {
        match self {
            Segment::Transport(transport) => transport.destination(),
            Segment::Walk(walk) => walk.destination(),
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, Segment::Walk(_))
    }

    pub fn as_transport(&self) -> Option<&TransportSegment> {
        match self {
            Segment::Transport(transport) => Some(transport),
            Segment::Walk(_) => None,
        }
    }

    pub fn as_walk(&self) -> Option<&WalkSegment> {
        match self {
            Segment::Transport(_) => None,
            Segment::Walk(walk) => Some(walk),
        }
    }
}

impl graph::Edge<Node> for Segment {
    fn origin(&self) -> &Node {
        Segment::origin(self)
    }

    fn destination(&self) -> &Node {
        Segment::destination(self)
    }
}
