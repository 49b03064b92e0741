//! Route planning operations.

use chrono::NaiveTime;
use tracing::debug;

use crate::graph::{DepthFirst, Dijkstra, route_from_traversal};
use crate::network::{
    Augmentation, Node, Passages, Segment, TransportNetwork, WalkPolicy, distance_cost,
    travel_time_cost,
};
use crate::query::{Endpoint, Itinerary, Optimization, QueryError};

enum End {
    Origin,
    Target,
}

/// Plan the best journey between two endpoints, departing at `depart`.
///
/// Off-network endpoints are temporarily grafted onto the network with
/// walking edges; under [`WalkPolicy::AllStops`] every stop is grafted
/// to its walkable neighbours too. The grafts are gone again by the time
/// this returns, on success and on error alike, which is why the network
/// is borrowed mutably.
///
/// The itinerary's times realize the found route against the timetable:
/// in distance mode too, each transport segment boards the next
/// scheduled passage at its origin.
pub fn plan_route(
    network: &mut TransportNetwork,
    from: &Endpoint,
    to: &Endpoint,
    optimization: Optimization,
    depart: NaiveTime,
    walks: WalkPolicy,
) -> Result<Itinerary, QueryError> {
    let mut aug = Augmentation::begin(network);
    let origin = resolve(&mut aug, from, End::Origin)?;
    let target = resolve(&mut aug, to, End::Target)?;
    if origin == target {
        return Err(QueryError::SameEndpoints);
    }
    if walks == WalkPolicy::AllStops {
        aug.link_all_stops();
    }

    let net = aug.network();
    let parents = match optimization {
        Optimization::Distance => {
            let mut cost = distance_cost(net);
            net.graph()
                .traverse(&Dijkstra, &origin, Some(&target), &mut cost)
        }
        Optimization::Time => {
            let mut cost = travel_time_cost(net, depart);
            net.graph()
                .traverse(&Dijkstra, &origin, Some(&target), &mut cost)
        }
    }
    .map_err(|_| QueryError::NoRoute)?;

    let segments =
        route_from_traversal(&parents, &origin, &target).map_err(|_| QueryError::NoRoute)?;
    let times = net
        .route_times(&segments, depart)
        .map_err(|_| QueryError::NoRoute)?;
    debug!(segments = segments.len(), "planned route");
    Ok(Itinerary { segments, times })
}

fn resolve(
    aug: &mut Augmentation<'_>,
    endpoint: &Endpoint,
    end: End,
) -> Result<Node, QueryError> {
    match endpoint {
        Endpoint::Stop(name) => aug
            .network()
            .stop_by_name(name)
            .cloned()
            .ok_or_else(|| QueryError::StopNotFound(name.clone())),
        Endpoint::Position(position) => Ok(match end {
            End::Origin => aug.attach_origin(*position)?,
            End::Target => aug.attach_target(*position)?,
        }),
    }
}

/// Find any route between two stops, ignoring schedules and costs.
///
/// Answers whether the stops are connected at all; the result is
/// whatever the depth-first exploration reaches first, not a best route.
pub fn route_between_stops(
    network: &TransportNetwork,
    from: &str,
    to: &str,
) -> Result<Vec<Segment>, QueryError> {
    let origin = network
        .stop_by_name(from)
        .cloned()
        .ok_or_else(|| QueryError::StopNotFound(from.to_owned()))?;
    let target = network
        .stop_by_name(to)
        .cloned()
        .ok_or_else(|| QueryError::StopNotFound(to.to_owned()))?;
    if origin == target {
        return Err(QueryError::SameEndpoints);
    }

    let mut ignore = |_: f64, _: &Segment| 0.0;
    let parents = network
        .graph()
        .traverse(&DepthFirst, &origin, Some(&target), &mut ignore)
        .map_err(|_| QueryError::NoRoute)?;
    route_from_traversal(&parents, &origin, &target).map_err(|_| QueryError::NoRoute)
}

/// The timetable at a stop, resolved by exact name.
pub fn passages_at(network: &TransportNetwork, stop: &str) -> Result<Passages, QueryError> {
    let stop = network
        .stop_by_name(stop)
        .ok_or_else(|| QueryError::StopNotFound(stop.to_owned()))?;
    Ok(network.passages(stop))
}
