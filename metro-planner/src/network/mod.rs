//! The transport network: named stops, lines with scheduled variants,
//! and the directed graph that routing runs over.
//!
//! [`TransportNetwork`] keeps the graph and the line descriptions in
//! step: every scheduled segment is registered with its variant and
//! inserted as a graph edge. Timetables are derived on demand from the
//! variants' departure times and cumulative travel times.

mod augment;
mod cost;
mod line;
mod node;
mod passages;
mod segment;

pub use augment::{Augmentation, MAX_WALK_GRAFTS, WALK_GRAFT_RADIUS_M, WalkPolicy};
pub use cost::{distance_cost, travel_time_cost};
pub use line::{Line, Variant};
pub use node::Node;
pub use passages::{Passage, Passages};
pub use segment::{Segment, TransportSegment, WALK_DRUDGERY, WALK_SPEED_KMH, WalkSegment};

use chrono::NaiveTime;

use crate::geo::GeoPosition;
use crate::graph::Graph;
use crate::names;

/// Fuzzy stop lookups accept only names strictly closer than this many
/// edits.
const MAX_NAME_DISTANCE: usize = 3;

/// Error returned when registering or resolving network entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("unknown line {0:?}")]
    UnknownLine(String),
    #[error("line {line:?} has no variant {variant:?}")]
    UnknownVariant { line: String, variant: String },
    #[error("line {line:?} variant {variant:?} has no scheduled departures")]
    NoService { line: String, variant: String },
}

/// A city's transport network.
#[derive(Debug, Clone, Default)]
pub struct TransportNetwork {
    graph: Graph<Node, Segment>,
    lines: Vec<Line>,
}

impl TransportNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop, reusing the existing vertex when one already
    /// sits at the position.
    pub fn add_stop(&mut self, name: &str, position: GeoPosition) -> Node {
        if let Some(existing) = self.stop_at_position(position) {
            return existing.clone();
        }
        let stop = Node::stop(name, position);
        self.graph.add_vertex(stop.clone());
        stop
    }

    /// Register a line. Returns false when the name is already taken.
    pub fn add_line(&mut self, name: &str) -> bool {
        if self.lines.iter().any(|l| l.name() == name) {
            return false;
        }
        self.lines.push(Line::new(name));
        true
    }

    /// Register a variant on an existing line.
    pub fn add_variant(&mut self, line: &str, variant: &str) -> Result<bool, NetworkError> {
        let Some(entry) = self.line_mut(line) else {
            return Err(NetworkError::UnknownLine(line.to_owned()));
        };
        Ok(entry.add_variant(variant))
    }

    /// Insert one scheduled segment, registering it with its variant and
    /// adding the corresponding graph edge.
    pub fn add_segment(&mut self, segment: TransportSegment) -> Result<bool, NetworkError> {
        let line_name = segment.line().to_owned();
        let variant_name = segment.variant().to_owned();
        let Some(line) = self.line_mut(&line_name) else {
            return Err(NetworkError::UnknownLine(line_name));
        };
        let Some(variant) = line.variant_mut(&variant_name) else {
            return Err(NetworkError::UnknownVariant {
                line: line_name,
                variant: variant_name,
            });
        };
        let inserted = variant.add_segment(segment.clone());
        self.graph.add_edge(Segment::Transport(segment));
        Ok(inserted)
    }

    /// Record a departure time at a variant's start stop.
    pub fn add_departure(
        &mut self,
        line: &str,
        variant: &str,
        departure: NaiveTime,
    ) -> Result<bool, NetworkError> {
        let Some(entry) = self.line_mut(line) else {
            return Err(NetworkError::UnknownLine(line.to_owned()));
        };
        let Some(variant_entry) = entry.variant_mut(variant) else {
            return Err(NetworkError::UnknownVariant {
                line: line.to_owned(),
                variant: variant.to_owned(),
            });
        };
        Ok(variant_entry.add_departure(departure))
    }

    pub fn graph(&self) -> &Graph<Node, Segment> {
        &self.graph
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, name: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.name() == name)
    }

    fn line_mut(&mut self, name: &str) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.name() == name)
    }

    /// Every vertex, stops and waypoints alike.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.vertices()
    }

    pub fn stops(&self) -> impl Iterator<Item = &Node> {
        self.graph.vertices().filter(|node| node.is_stop())
    }

    pub fn stop_by_name(&self, name: &str) -> Option<&Node> {
        self.stops().find(|stop| stop.name() == Some(name))
    }

    pub fn stop_at_position(&self, position: GeoPosition) -> Option<&Node> {
        self.stops().find(|stop| stop.position() == position)
    }

    /// Best fuzzy match for a stop name.
    ///
    /// Matching is case-insensitive edit distance; candidates at
    /// [`MAX_NAME_DISTANCE`] or more edits are rejected, so gibberish
    /// resolves to nothing rather than to the least-bad stop.
    pub fn stop_by_inexact_name(&self, name: &str) -> Option<&Node> {
        self.stops()
            .filter_map(|stop| {
                let candidate = stop.name()?;
                Some((names::distance_ignore_case(name, candidate), stop))
            })
            .min_by_key(|(distance, _)| *distance)
            .and_then(|(distance, stop)| (distance < MAX_NAME_DISTANCE).then_some(stop))
    }

    /// Closest stop-name matches, best first. Unlike
    /// [`TransportNetwork::stop_by_inexact_name`] this applies no cutoff;
    /// it feeds suggestion lists.
    pub fn stops_by_inexact_name(&self, name: &str, limit: usize) -> Vec<&Node> {
        let mut scored: Vec<(usize, &Node)> = self
            .stops()
            .filter_map(|stop| {
                let candidate = stop.name()?;
                Some((names::distance_ignore_case(name, candidate), stop))
            })
            .collect();
        scored.sort_by_key(|(distance, _)| *distance);
        scored
            .into_iter()
            .take(limit)
            .map(|(_, stop)| stop)
            .collect()
    }

    /// Every scheduled passage through `stop`.
    ///
    /// A variant contributes one entry per departure, offset by its
    /// cumulative travel time to the stop. Terminal arrivals are not
    /// passages: a variant's end stop is excluded, while its start is
    /// included.
    pub fn passages(&self, stop: &Node) -> Passages {
        let mut entries = Vec::new();
        for line in &self.lines {
            for variant in line.variants() {
                if !variant.has_stop(stop) || variant.end() == Some(stop) {
                    continue;
                }
                let Some(travel) = variant.travel_time_to(stop) else {
                    continue;
                };
                for departure in variant.departures() {
                    entries.push(Passage {
                        time: *departure + travel,
                        line: variant.shared_line(),
                        variant: variant.shared_name(),
                    });
                }
            }
        }
        Passages::new(stop.clone(), entries)
    }

    /// Whether the (line, variant) pair exists and has at least one
    /// departure.
    pub fn has_service(&self, line: &str, variant: &str) -> bool {
        self.line(line)
            .and_then(|l| l.variant(variant))
            .is_some_and(|v| !v.departures().is_empty())
    }

    /// Clock time at which each segment of a route begins when the
    /// journey starts at `depart`.
    ///
    /// Transport segments wait for the variant's next scheduled passage
    /// at their origin, wrapping past midnight; walks start immediately.
    pub fn route_times(
        &self,
        route: &[Segment],
        depart: NaiveTime,
    ) -> Result<Vec<NaiveTime>, NetworkError> {
        let mut times = Vec::with_capacity(route.len());
        let mut current = depart;
        for segment in route {
            match segment {
                Segment::Transport(transport) => {
                    let passages = self.passages(transport.origin());
                    let Some(boarding) = passages.next_time_with_wrap(
                        current,
                        transport.line(),
                        transport.variant(),
                    ) else {
                        return Err(NetworkError::NoService {
                            line: transport.line().to_owned(),
                            variant: transport.variant().to_owned(),
                        });
                    };
                    times.push(boarding);
                    current = boarding + transport.duration();
                }
                Segment::Walk(walk) => {
                    times.push(current);
                    current = current + walk.travel_duration();
                }
            }
        }
        Ok(times)
    }
}
