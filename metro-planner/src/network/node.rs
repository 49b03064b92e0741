//! Network vertices: named stops and anonymous waypoints.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::geo::{GeoPosition, Positioned};

/// A vertex of the transport network.
///
/// Stops carry a passenger-facing name; waypoints are anonymous positions
/// introduced for walking, such as a journey's off-network start point.
///
/// Identity is the position plus whether the node is named. A stop and a
/// waypoint at the same coordinates are distinct vertices, while two stops
/// at the same coordinates coincide whatever they are called.
///
/// # Examples
///
/// ```
/// use metro_planner::geo::GeoPosition;
/// use metro_planner::network::Node;
///
/// let here = GeoPosition::new(48.85, 2.35).unwrap();
/// let stop = Node::stop("Chatelet", here);
/// let twin = Node::stop("Les Halles", here);
/// let point = Node::waypoint(here);
///
/// assert_eq!(stop, twin);
/// assert_ne!(stop, point);
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    position: GeoPosition,
    name: Option<Arc<str>>,
}

impl Node {
    pub fn stop(name: impl Into<Arc<str>>, position: GeoPosition) -> Self {
        Self {
            position,
            name: Some(name.into()),
        }
    }

    pub fn waypoint(position: GeoPosition) -> Self {
        Self {
            position,
            name: None,
        }
    }

    pub fn position(&self) -> GeoPosition {
        self.position
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_stop(&self) -> bool {
        self.name.is_some()
    }
}

impl Positioned for Node {
    fn position(&self) -> GeoPosition {
        self.position
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.name.is_some() == other.name.is_some()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.name.is_some().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.position),
        }
    }
}
