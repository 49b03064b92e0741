//! Interactive journey planner over a transport network.

use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use metro_planner::clock;
use metro_planner::format;
use metro_planner::geo::GeoPosition;
use metro_planner::ingest;
use metro_planner::network::{Node, TransportNetwork, WalkPolicy};
use metro_planner::query::{self, Endpoint, Optimization};

/// Plan journeys over a transport network loaded from data files.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Segments file describing the network map.
    network: PathBuf,
    /// Departures file describing the timetable.
    timetable: PathBuf,
}

type Input = io::Lines<io::StdinLock<'static>>;

enum EndpointKind {
    Stops,
    Positions,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let mut network =
        ingest::load_network_from_path(&cli.network).expect("failed to load the network file");
    let departures = ingest::load_departures_from_path(&mut network, &cli.timetable)
        .expect("failed to load the departures file");

    println!("Metro journey planner");
    println!(
        "Loaded {} stops on {} lines, {} departures.",
        network.stops().count(),
        network.lines().len(),
        departures
    );
    println!();

    let mut input = io::stdin().lock().lines();
    loop {
        println!("1) Timetable at a stop");
        println!("2) Any route between two stops");
        println!("3) Best route between two stops");
        println!("4) Best route between two positions");
        println!("5) Best route between two positions, walking between stops");
        println!("q) Quit");

        let Some(choice) = prompt(&mut input, "> ") else {
            break;
        };
        let outcome = match choice.as_str() {
            "1" => show_timetable(&network, &mut input),
            "2" => show_any_route(&network, &mut input),
            "3" => show_best_route(
                &mut network,
                &mut input,
                EndpointKind::Stops,
                WalkPolicy::EndpointsOnly,
            ),
            "4" => show_best_route(
                &mut network,
                &mut input,
                EndpointKind::Positions,
                WalkPolicy::EndpointsOnly,
            ),
            "5" => show_best_route(
                &mut network,
                &mut input,
                EndpointKind::Positions,
                WalkPolicy::AllStops,
            ),
            "q" | "quit" => break,
            "" => continue,
            other => Err(format!("unknown choice {other:?}")),
        };
        if let Err(message) = outcome {
            println!("Error: {message}");
        }
        println!();
    }
}

fn prompt(input: &mut Input, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    let line = input.next()?.ok()?;
    Some(line.trim().to_owned())
}

fn require(input: &mut Input, label: &str) -> Result<String, String> {
    prompt(input, label).ok_or_else(|| "no input".to_owned())
}

fn show_timetable(network: &TransportNetwork, input: &mut Input) -> Result<(), String> {
    let stop = prompt_stop(network, input, "Stop name: ")?;
    print!("{}", format::passages(network, &network.passages(&stop)));
    Ok(())
}

fn show_any_route(network: &TransportNetwork, input: &mut Input) -> Result<(), String> {
    let from = prompt_stop(network, input, "From stop: ")?;
    let to = prompt_stop(network, input, "To stop: ")?;
    let route = query::route_between_stops(
        network,
        from.name().unwrap_or_default(),
        to.name().unwrap_or_default(),
    )
    .map_err(|err| err.to_string())?;
    print!("{}", format::route(network, &route));
    Ok(())
}

fn show_best_route(
    network: &mut TransportNetwork,
    input: &mut Input,
    kind: EndpointKind,
    walks: WalkPolicy,
) -> Result<(), String> {
    let (from, to) = match kind {
        EndpointKind::Stops => {
            let from = prompt_stop(network, input, "From stop: ")?;
            let to = prompt_stop(network, input, "To stop: ")?;
            (
                Endpoint::Stop(from.name().unwrap_or_default().to_owned()),
                Endpoint::Stop(to.name().unwrap_or_default().to_owned()),
            )
        }
        EndpointKind::Positions => {
            let from = prompt_position(input, "From")?;
            let to = prompt_position(input, "To")?;
            (Endpoint::Position(from), Endpoint::Position(to))
        }
    };
    let optimization = prompt_optimization(input)?;
    let depart = prompt_departure(input)?;

    let trip = query::plan_route(network, &from, &to, optimization, depart, walks)
        .map_err(|err| err.to_string())?;
    print!("{}", format::itinerary(network, &trip));
    Ok(())
}

fn prompt_stop(
    network: &TransportNetwork,
    input: &mut Input,
    label: &str,
) -> Result<Node, String> {
    let name = require(input, label)?;
    resolve_stop(network, &name)
}

/// Resolve a typed name to a stop, tolerating small typos; on failure the
/// error lists the closest-named stops.
fn resolve_stop(network: &TransportNetwork, name: &str) -> Result<Node, String> {
    if let Some(stop) = network.stop_by_inexact_name(name) {
        return Ok(stop.clone());
    }
    let suggestions: Vec<String> = network
        .stops_by_inexact_name(name, 5)
        .into_iter()
        .filter_map(|stop| stop.name().map(str::to_owned))
        .collect();
    if suggestions.is_empty() {
        Err(format!("no stop matches {name:?}"))
    } else {
        Err(format!(
            "no stop matches {name:?}; closest names: {}",
            suggestions.join(", ")
        ))
    }
}

/// Read one coordinate pair; each coordinate may be decimal degrees or
/// `deg min sec hemisphere`.
fn prompt_position(input: &mut Input, which: &str) -> Result<GeoPosition, String> {
    let latitude = require(input, &format!("{which} latitude: "))?;
    let longitude = require(input, &format!("{which} longitude: "))?;
    GeoPosition::parse(&latitude, &longitude).map_err(|err| err.to_string())
}

fn prompt_optimization(input: &mut Input) -> Result<Optimization, String> {
    let mode = require(input, "Optimize for [d]istance or [t]ime? ")?;
    match mode.as_str() {
        "d" | "D" | "distance" => Ok(Optimization::Distance),
        "t" | "T" | "time" => Ok(Optimization::Time),
        other => Err(format!("unknown optimization {other:?}")),
    }
}

fn prompt_departure(input: &mut Input) -> Result<NaiveTime, String> {
    let text = require(input, "Departure time (H:MM): ")?;
    clock::parse_clock(&text).map_err(|err| err.to_string())
}
