//! Edge cost functions for route searches.

use chrono::{Duration, NaiveTime};

use crate::network::{Segment, TransportNetwork, WALK_DRUDGERY};

/// Cost of each segment in kilometre-equivalents, for shortest-distance
/// searches.
///
/// Transport hops cost their scheduled distance, but only on services
/// that actually run: a variant with no departures at all is impassable.
/// Walks cost their length scaled by [`WALK_DRUDGERY`].
pub fn distance_cost<'a>(network: &'a TransportNetwork) -> impl Fn(f64, &Segment) -> f64 + 'a {
    move |_, segment| match segment {
        Segment::Transport(transport) => {
            if network.has_service(transport.line(), transport.variant()) {
                transport.distance_km()
            } else {
                f64::INFINITY
            }
        }
        Segment::Walk(walk) => walk.distance_m() * WALK_DRUDGERY / 1000.0,
    }
}

/// Cost of each segment in seconds when the journey starts at `depart`,
/// for earliest-arrival searches.
///
/// The cost accumulated so far fixes the clock at the segment's origin;
/// a transport hop then costs the wait for its next scheduled passage
/// there plus its ride time, wrapping past midnight. Services that never
/// pass the origin are impassable. Walks cost their duration on foot.
pub fn travel_time_cost<'a>(
    network: &'a TransportNetwork,
    depart: NaiveTime,
) -> impl Fn(f64, &Segment) -> f64 + 'a {
    move |elapsed, segment| match segment {
        Segment::Transport(transport) => {
            let clock = depart + Duration::seconds(elapsed as i64);
            let wait = network.passages(transport.origin()).wait_time_with_wrap(
                clock,
                transport.line(),
                transport.variant(),
            );
            match wait {
                Some(wait) => (wait + transport.duration()).num_seconds() as f64,
                None => f64::INFINITY,
            }
        }
        Segment::Walk(walk) => walk.travel_duration().num_seconds() as f64,
    }
}
