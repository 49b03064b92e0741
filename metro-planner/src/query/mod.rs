//! Journey queries over a transport network.

mod plan;

pub use plan::{passages_at, plan_route, route_between_stops};

use chrono::NaiveTime;

use crate::geo::{self, GeoPosition};
use crate::network::Segment;

/// What a route search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimization {
    /// Fewest scheduled kilometres travelled.
    Distance,
    /// Earliest arrival from the requested departure time.
    Time,
}

/// Where a journey starts or ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// An exact stop name.
    Stop(String),
    /// An arbitrary position, reached on foot.
    Position(GeoPosition),
}

/// A planned journey: its segments and the clock time each one begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub segments: Vec<Segment>,
    pub times: Vec<NaiveTime>,
}

impl Itinerary {
    /// When the journey's final segment ends. `None` for empty journeys.
    pub fn arrival(&self) -> Option<NaiveTime> {
        let last = self.segments.last()?;
        let start = *self.times.last()?;
        Some(match last {
            Segment::Transport(transport) => start + transport.duration(),
            Segment::Walk(walk) => start + walk.travel_duration(),
        })
    }
}

/// Error returned by journey queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no stop named {0:?}")]
    StopNotFound(String),
    #[error("journey starts and ends at the same place")]
    SameEndpoints,
    #[error("no route connects the requested endpoints")]
    NoRoute,
    #[error("the network has no nodes to route over")]
    EmptyNetwork,
}

impl From<geo::NoCandidates> for QueryError {
    fn from(_: geo::NoCandidates) -> Self {
        QueryError::EmptyNetwork
    }
}
