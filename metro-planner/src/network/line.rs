//! Lines and the service variants they run.

use std::sync::Arc;

use chrono::{Duration, NaiveTime};

use crate::network::{Node, TransportSegment};

/// One directed service pattern of a line.
///
/// A variant's segments are expected to chain into a single path from a
/// unique start stop to a unique end stop; the ingest layer only ever
/// builds such chains, and the accessors here assume them.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    name: Arc<str>,
    line: Arc<str>,
    segments: Vec<TransportSegment>,
    departures: Vec<NaiveTime>,
}

impl Variant {
    pub(crate) fn new(name: impl Into<Arc<str>>, line: Arc<str>) -> Self {
        Self {
            name: name.into(),
            line,
            segments: Vec::new(),
            departures: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn segments(&self) -> &[TransportSegment] {
        &self.segments
    }

    /// Clock times at which a vehicle leaves the variant's start stop.
    pub fn departures(&self) -> &[NaiveTime] {
        &self.departures
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    pub(crate) fn shared_line(&self) -> Arc<str> {
        Arc::clone(&self.line)
    }

    pub(crate) fn add_segment(&mut self, segment: TransportSegment) -> bool {
        if self.segments.contains(&segment) {
            return false;
        }
        self.segments.push(segment);
        true
    }

    pub(crate) fn add_departure(&mut self, departure: NaiveTime) -> bool {
        if self.departures.contains(&departure) {
            return false;
        }
        self.departures.push(departure);
        true
    }

    /// The stop the variant departs from: the one segment origin no
    /// segment leads to. `None` while the variant has no segments.
    pub fn start(&self) -> Option<&Node> {
        self.segments
            .iter()
            .map(TransportSegment::origin)
            .find(|origin| !self.segments.iter().any(|s| s.destination() == *origin))
    }

    /// The stop the variant terminates at, symmetric to [`Variant::start`].
    pub fn end(&self) -> Option<&Node> {
        self.segments
            .iter()
            .map(TransportSegment::destination)
            .find(|destination| !self.segments.iter().any(|s| s.origin() == *destination))
    }

    pub fn has_stop(&self, stop: &Node) -> bool {
        self.segments
            .iter()
            .any(|s| s.origin() == stop || s.destination() == stop)
    }

    /// Cumulative scheduled travel time from the variant's start to `stop`.
    ///
    /// Zero at the start itself, `None` for stops the variant never
    /// serves.
    pub fn travel_time_to(&self, stop: &Node) -> Option<Duration> {
        let mut current = self.start()?;
        let mut total = Duration::zero();
        // Bounded in case a malformed chain loops.
        let mut remaining = self.segments.len() + 1;
        loop {
            if current == stop {
                return Some(total);
            }
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let next = self.segments.iter().find(|s| s.origin() == current)?;
            total = total + next.duration();
            current = next.destination();
        }
    }
}

/// A named line grouping its service variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    name: Arc<str>,
    variants: Vec<Variant>,
}

impl Line {
    pub(crate) fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Register a variant. Returns false when the name is already taken.
    pub(crate) fn add_variant(&mut self, name: &str) -> bool {
        if self.variants.iter().any(|v| v.name() == name) {
            return false;
        }
        self.variants
            .push(Variant::new(name, Arc::clone(&self.name)));
        true
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name() == name)
    }

    pub(crate) fn variant_mut(&mut self, name: &str) -> Option<&mut Variant> {
        self.variants.iter_mut().find(|v| v.name() == name)
    }
}
