//! Per-stop timetables.

use std::sync::Arc;

use chrono::{Duration, NaiveTime};

use crate::clock;
use crate::network::Node;

/// One scheduled vehicle passing through a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub time: NaiveTime,
    pub line: Arc<str>,
    pub variant: Arc<str>,
}

/// Every scheduled passage through one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Passages {
    stop: Node,
    entries: Vec<Passage>,
}

impl Passages {
    pub(crate) fn new(stop: Node, entries: Vec<Passage>) -> Self {
        Self { stop, entries }
    }

    pub fn stop(&self) -> &Node {
        &self.stop
    }

    pub fn entries(&self) -> &[Passage] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest passage of `line`/`variant` at or after `wait_start`,
    /// wrapping past midnight onto the next day's schedule.
    ///
    /// `None` when that service never passes here.
    pub fn next_time_with_wrap(
        &self,
        wait_start: NaiveTime,
        line: &str,
        variant: &str,
    ) -> Option<NaiveTime> {
        self.entries
            .iter()
            .filter(|p| p.line.as_ref() == line && p.variant.as_ref() == variant)
            .map(|p| p.time)
            .min_by_key(|time| clock::forward_wait(wait_start, *time))
    }

    /// Wait from `wait_start` until the next passage of `line`/`variant`.
    pub fn wait_time_with_wrap(
        &self,
        wait_start: NaiveTime,
        line: &str,
        variant: &str,
    ) -> Option<Duration> {
        self.next_time_with_wrap(wait_start, line, variant)
            .map(|time| clock::forward_wait(wait_start, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPosition;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn passage(hour: u32, minute: u32, line: &str, variant: &str) -> Passage {
        Passage {
            time: at(hour, minute),
            line: Arc::from(line),
            variant: Arc::from(variant),
        }
    }

    fn sample() -> Passages {
        let stop = Node::stop("Nation", GeoPosition::new(48.848, 2.396).unwrap());
        Passages::new(
            stop,
            vec![
                passage(6, 0, "8", "1"),
                passage(12, 30, "8", "1"),
                passage(9, 0, "8", "2"),
                passage(7, 15, "3", "1"),
            ],
        )
    }

    #[test]
    fn picks_next_passage_of_the_requested_service() {
        let passages = sample();
        assert_eq!(
            passages.next_time_with_wrap(at(7, 0), "8", "1"),
            Some(at(12, 30))
        );
        assert_eq!(
            passages.wait_time_with_wrap(at(7, 0), "8", "1"),
            Some(Duration::hours(5) + Duration::minutes(30))
        );
    }

    #[test]
    fn wraps_past_midnight() {
        let passages = sample();
        assert_eq!(
            passages.next_time_with_wrap(at(23, 0), "8", "1"),
            Some(at(6, 0))
        );
        assert_eq!(
            passages.wait_time_with_wrap(at(23, 0), "8", "1"),
            Some(Duration::hours(7))
        );
    }

    #[test]
    fn exact_match_means_no_wait() {
        let passages = sample();
        assert_eq!(
            passages.next_time_with_wrap(at(6, 0), "8", "1"),
            Some(at(6, 0))
        );
        assert_eq!(
            passages.wait_time_with_wrap(at(6, 0), "8", "1"),
            Some(Duration::zero())
        );
    }

    #[test]
    fn other_services_are_ignored() {
        let passages = sample();
        assert_eq!(passages.next_time_with_wrap(at(6, 0), "8", "9"), None);
        assert_eq!(passages.wait_time_with_wrap(at(6, 0), "14", "1"), None);
    }

    #[test]
    fn exposes_stop_and_entries() {
        let passages = sample();
        assert_eq!(passages.stop().name(), Some("Nation"));
        assert_eq!(passages.entries().len(), 4);
        assert!(!passages.is_empty());

        let empty = Passages::new(
            Node::stop("Orphelin", GeoPosition::new(48.0, 2.0).unwrap()),
            Vec::new(),
        );
        assert!(empty.is_empty());
    }
}
