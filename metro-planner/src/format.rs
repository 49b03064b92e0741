//! Text rendering for routes, journeys, and timetables.

use std::fmt::Write as _;

use chrono::{Duration, NaiveTime};

use crate::network::{Passages, Segment, TransportNetwork, TransportSegment, WalkSegment};
use crate::query::Itinerary;

/// Render a clock time as `HH:MM`.
pub fn clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Render a duration compactly: `2h05min`, `3min20s`, `45s`.
pub fn duration(value: Duration) -> String {
    let total = value.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h{minutes:02}min")
    } else if minutes > 0 && seconds > 0 {
        format!("{minutes}min{seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}min")
    } else {
        format!("{seconds}s")
    }
}

enum LegKind<'a> {
    Ride(Vec<&'a TransportSegment>),
    Walk(&'a WalkSegment),
}

struct Leg<'a> {
    first_segment: usize,
    kind: LegKind<'a>,
}

/// Group a route into legs: maximal runs of transport segments on the
/// same line and variant, and individual walks.
fn legs(route: &[Segment]) -> Vec<Leg<'_>> {
    let mut legs = Vec::new();
    let mut index = 0;
    while index < route.len() {
        match &route[index] {
            Segment::Walk(walk) => {
                legs.push(Leg {
                    first_segment: index,
                    kind: LegKind::Walk(walk),
                });
                index += 1;
            }
            Segment::Transport(first) => {
                let start = index;
                let mut group = vec![first];
                index += 1;
                while let Some(Segment::Transport(next)) = route.get(index) {
                    if next.line() != first.line() || next.variant() != first.variant() {
                        break;
                    }
                    group.push(next);
                    index += 1;
                }
                legs.push(Leg {
                    first_segment: start,
                    kind: LegKind::Ride(group),
                });
            }
        }
    }
    legs
}

fn ride_line(network: &TransportNetwork, group: &[&TransportSegment]) -> String {
    let Some(first) = group.first() else {
        return String::new();
    };
    let last = group.last().unwrap_or(first);
    let terminus = network
        .line(first.line())
        .and_then(|line| line.variant(first.variant()))
        .and_then(|variant| variant.end())
        .and_then(|end| end.name())
        .map(str::to_owned)
        .unwrap_or_else(|| last.destination().to_string());

    let mut stops = first.origin().to_string();
    for segment in group {
        let _ = write!(stops, " -> {}", segment.destination());
    }
    format!(
        "Line {} toward {} (variant {}): {}",
        first.line(),
        terminus,
        first.variant(),
        stops
    )
}

fn walk_line(walk: &WalkSegment) -> String {
    format!(
        "Walk from {} to {} ({} m, about {})",
        walk.origin(),
        walk.destination(),
        walk.distance_m().round() as i64,
        duration(walk.travel_duration())
    )
}

/// Render a route, one line per leg.
pub fn route(network: &TransportNetwork, route: &[Segment]) -> String {
    let mut out = String::new();
    for leg in legs(route) {
        match leg.kind {
            LegKind::Ride(group) => {
                let _ = writeln!(out, "{}", ride_line(network, &group));
            }
            LegKind::Walk(walk) => {
                let _ = writeln!(out, "{}", walk_line(walk));
            }
        }
    }
    out
}

/// Render a planned journey: each leg with its boarding or start time,
/// then the arrival.
pub fn itinerary(network: &TransportNetwork, trip: &Itinerary) -> String {
    let mut out = String::new();
    for leg in legs(&trip.segments) {
        let when = trip
            .times
            .get(leg.first_segment)
            .map(|time| clock(*time))
            .unwrap_or_default();
        match leg.kind {
            LegKind::Ride(group) => {
                let _ = writeln!(out, "{}  {}", when, ride_line(network, &group));
            }
            LegKind::Walk(walk) => {
                let _ = writeln!(out, "{}  {}", when, walk_line(walk));
            }
        }
    }
    if let Some(arrival) = trip.arrival() {
        let _ = writeln!(out, "Arrival at {}", clock(arrival));
    }
    out
}

/// Render a stop's timetable, earliest passage first.
pub fn passages(network: &TransportNetwork, timetable: &Passages) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Passages at {}:", timetable.stop());
    if timetable.is_empty() {
        let _ = writeln!(out, "  no scheduled passages");
        return out;
    }

    let mut entries = timetable.entries().to_vec();
    entries.sort_by_key(|p| p.time);
    for passage in &entries {
        let toward = network
            .line(&passage.line)
            .and_then(|line| line.variant(&passage.variant))
            .and_then(|variant| variant.end())
            .and_then(|end| end.name())
            .unwrap_or("?");
        let _ = writeln!(
            out,
            "  {}  line {} (variant {}) toward {}",
            clock(passage.time),
            passage.line,
            passage.variant,
            toward
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPosition;
    use crate::network::{Node, TransportNetwork, TransportSegment, WalkPolicy};
    use crate::query::{self, Endpoint, Optimization};

    fn pos(lat: f64) -> GeoPosition {
        GeoPosition::new(lat, 2.35).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    /// Line 8, variant 1: A --3min--> B --4min--> C, departing 08:00.
    fn sample_network() -> TransportNetwork {
        let mut network = TransportNetwork::new();
        let a = network.add_stop("A", pos(48.85));
        let b = network.add_stop("B", pos(48.86));
        let c = network.add_stop("C", pos(48.87));
        network.add_line("8");
        network.add_variant("8", "1").unwrap();
        network
            .add_segment(TransportSegment::new(
                a,
                b.clone(),
                "8",
                "1",
                Duration::minutes(3),
                4.0,
            ))
            .unwrap();
        network
            .add_segment(TransportSegment::new(
                b,
                c,
                "8",
                "1",
                Duration::minutes(4),
                4.0,
            ))
            .unwrap();
        network.add_departure("8", "1", at(8, 0)).unwrap();
        network
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(clock(at(8, 5)), "08:05");
        assert_eq!(clock(at(23, 40)), "23:40");
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(duration(Duration::seconds(45)), "45s");
        assert_eq!(duration(Duration::minutes(3)), "3min");
        assert_eq!(duration(Duration::seconds(200)), "3min20s");
        assert_eq!(duration(Duration::minutes(125)), "2h05min");
        assert_eq!(duration(Duration::zero()), "0s");
        assert_eq!(duration(Duration::seconds(-5)), "0s");
    }

    #[test]
    fn rides_on_one_variant_collapse_into_one_leg() {
        let network = sample_network();
        let segments = query::route_between_stops(&network, "A", "C").unwrap();
        assert_eq!(
            route(&network, &segments),
            "Line 8 toward C (variant 1): A -> B -> C\n"
        );
    }

    #[test]
    fn walks_render_their_own_leg() {
        let network = sample_network();
        let b = network.stop_by_name("B").unwrap().clone();
        let elsewhere = Node::waypoint(GeoPosition::new(48.8595, 2.35).unwrap());
        let segments = vec![Segment::Walk(WalkSegment::new(elsewhere, b))];

        let rendered = route(&network, &segments);
        assert!(rendered.starts_with("Walk from (48.8595, 2.35) to B ("));
        assert!(rendered.contains(" m, about "));
    }

    #[test]
    fn changing_variant_starts_a_new_leg() {
        let mut network = sample_network();
        network.add_line("9");
        network.add_variant("9", "1").unwrap();
        let c = network.stop_by_name("C").unwrap().clone();
        let d = network.add_stop("D", pos(48.88));
        network
            .add_segment(TransportSegment::new(
                c,
                d,
                "9",
                "1",
                Duration::minutes(2),
                3.0,
            ))
            .unwrap();

        let segments = query::route_between_stops(&network, "A", "D").unwrap();
        let rendered = route(&network, &segments);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("Line 8 toward C (variant 1): A -> B -> C"));
        assert!(rendered.contains("Line 9 toward D (variant 1): C -> D"));
    }

    #[test]
    fn itineraries_carry_boarding_times_and_arrival() {
        let mut network = sample_network();
        let trip = query::plan_route(
            &mut network,
            &Endpoint::Stop("A".to_owned()),
            &Endpoint::Stop("C".to_owned()),
            Optimization::Time,
            at(7, 30),
            WalkPolicy::EndpointsOnly,
        )
        .unwrap();

        assert_eq!(
            itinerary(&network, &trip),
            "08:00  Line 8 toward C (variant 1): A -> B -> C\nArrival at 08:07\n"
        );
    }

    #[test]
    fn timetables_sort_by_clock() {
        let mut network = sample_network();
        network.add_departure("8", "1", at(6, 30)).unwrap();
        let a = network.stop_by_name("A").unwrap().clone();

        let rendered = passages(&network, &network.passages(&a));
        assert_eq!(
            rendered,
            "Passages at A:\n  06:30  line 8 (variant 1) toward C\n  08:00  line 8 (variant 1) toward C\n"
        );
    }

    #[test]
    fn empty_timetables_say_so() {
        let network = sample_network();
        let c = network.stop_by_name("C").unwrap().clone();
        let rendered = passages(&network, &network.passages(&c));
        assert_eq!(rendered, "Passages at C:\n  no scheduled passages\n");
    }
}
