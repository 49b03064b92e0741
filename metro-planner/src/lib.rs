//! Metro journey planner.
//!
//! Plans itineraries over a scheduled transport network loaded from CSV
//! files: schedule-aware shortest paths whose edge costs depend on when
//! you reach them, unscheduled reachability routes, per-stop timetable
//! projections, and transient walking links for trip endpoints that are
//! not stops.

pub mod clock;
pub mod format;
pub mod geo;
pub mod graph;
pub mod ingest;
pub mod names;
pub mod network;
pub mod query;
