//! Loading networks from semicolon-delimited data files.
//!
//! Two files describe a network. The segments file declares the map:
//! one scheduled hop per row, with stop names, positions, the owning
//! `LINE variant N`, the ride time as `M:SS`, and the distance in
//! kilometres. The departures file declares the timetable: one start
//! departure per row as `line;terminus;H:MM;variant`, where the
//! terminus must name the variant's start stop.

mod records;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::clock::{self, ClockError};
use crate::geo::PositionError;
use crate::network::{NetworkError, TransportNetwork, TransportSegment};

use records::{DepartureRow, SegmentRow, parse_line_ref, parse_position};

/// Error returned while loading data files.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read data file")]
    Io(#[from] std::io::Error),
    #[error("malformed row")]
    Csv(#[from] csv::Error),
    #[error("position cell {0:?} is not \"longitude, latitude\"")]
    InvalidPosition(String),
    #[error("position cell {cell:?} does not parse")]
    Position {
        cell: String,
        #[source]
        source: PositionError,
    },
    #[error("line cell {0:?} is not \"LINE variant N\"")]
    InvalidLineRef(String),
    #[error("travel time {cell:?} does not parse")]
    TravelTime {
        cell: String,
        #[source]
        source: ClockError,
    },
    #[error("departure time {cell:?} does not parse")]
    DepartureTime {
        cell: String,
        #[source]
        source: ClockError,
    },
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(
        "departure for line {line:?} variant {variant:?} names terminus \
         {terminus:?}, but the variant starts at {start:?}"
    )]
    TerminusMismatch {
        line: String,
        variant: String,
        terminus: String,
        start: Option<String>,
    },
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Build a network from a segments file.
///
/// Stops, lines, and variants are registered on first mention; repeated
/// rows collapse into one segment.
pub fn load_network<R: Read>(input: R) -> Result<TransportNetwork, IngestError> {
    let mut network = TransportNetwork::new();
    let mut rows = 0usize;
    for row in reader(input).deserialize() {
        add_segment_row(&mut network, row?)?;
        rows += 1;
    }
    info!(
        rows,
        stops = network.stops().count(),
        lines = network.lines().len(),
        "loaded network"
    );
    Ok(network)
}

pub fn load_network_from_path(path: impl AsRef<Path>) -> Result<TransportNetwork, IngestError> {
    load_network(File::open(path)?)
}

fn add_segment_row(network: &mut TransportNetwork, row: SegmentRow) -> Result<(), IngestError> {
    let from_position = parse_position(&row.from_position)?;
    let to_position = parse_position(&row.to_position)?;
    let (line, variant) = parse_line_ref(&row.line_ref)?;
    let duration = clock::parse_minutes_seconds(&row.travel_time).map_err(|source| {
        IngestError::TravelTime {
            cell: row.travel_time.clone(),
            source,
        }
    })?;

    let from = network.add_stop(&row.from_name, from_position);
    let to = network.add_stop(&row.to_name, to_position);
    network.add_line(&line);
    network.add_variant(&line, &variant)?;
    network.add_segment(TransportSegment::new(
        from,
        to,
        line,
        variant,
        duration,
        row.distance_km,
    ))?;
    Ok(())
}

/// Load a departures file into an existing network.
///
/// Each row names its variant by line and terminus, the stop the
/// variant starts from; a row whose terminus does not match is
/// rejected. Returns how many departures were added, duplicates
/// excluded.
pub fn load_departures<R: Read>(
    network: &mut TransportNetwork,
    input: R,
) -> Result<usize, IngestError> {
    let mut added = 0usize;
    for row in reader(input).deserialize() {
        let row: DepartureRow = row?;
        let time = clock::parse_clock(&row.time).map_err(|source| IngestError::DepartureTime {
            cell: row.time.clone(),
            source,
        })?;

        let start = network
            .line(&row.line)
            .ok_or_else(|| NetworkError::UnknownLine(row.line.clone()))?
            .variant(&row.variant)
            .ok_or_else(|| NetworkError::UnknownVariant {
                line: row.line.clone(),
                variant: row.variant.clone(),
            })?
            .start()
            .and_then(|node| node.name())
            .map(str::to_owned);
        if start.as_deref() != Some(row.terminus.as_str()) {
            return Err(IngestError::TerminusMismatch {
                line: row.line,
                variant: row.variant,
                terminus: row.terminus,
                start,
            });
        }

        if network.add_departure(&row.line, &row.variant, time)? {
            added += 1;
        }
    }
    info!(added, "loaded departures");
    Ok(added)
}

pub fn load_departures_from_path(
    network: &mut TransportNetwork,
    path: impl AsRef<Path>,
) -> Result<usize, IngestError> {
    load_departures(network, File::open(path)?)
}
