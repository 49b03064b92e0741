//! Clock-of-day parsing and wrap-around arithmetic.
//!
//! Timetables deal in times of day with no date attached: a departure at
//! "06:00" recurs every day, and a wait that begins at 23:00 for it lasts
//! seven hours. `chrono::NaiveTime` already wraps additions at midnight;
//! this module adds the two textual formats the data files use and the
//! forward-wrap arithmetic the schedule lookups are defined over.

use chrono::{Duration, NaiveTime};

/// Error returned when parsing an invalid clock or duration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct ClockError {
    reason: &'static str,
}

impl ClockError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a clock time from `H:MM` or `HH:MM`.
///
/// # Examples
///
/// ```
/// use metro_planner::clock::parse_clock;
///
/// assert_eq!(parse_clock("7:05").unwrap(), parse_clock("07:05").unwrap());
/// assert!(parse_clock("24:00").is_err());
/// assert!(parse_clock("7h05").is_err());
/// assert!(parse_clock("07:5").is_err());
/// ```
pub fn parse_clock(s: &str) -> Result<NaiveTime, ClockError> {
    let (hour_part, minute_part) = s
        .split_once(':')
        .ok_or_else(|| ClockError::new("expected H:MM or HH:MM"))?;

    if hour_part.is_empty() || hour_part.len() > 2 {
        return Err(ClockError::new("expected one or two hour digits"));
    }
    let hour = parse_digits(hour_part).ok_or_else(|| ClockError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(ClockError::new("hour must be 0-23"));
    }

    if minute_part.len() != 2 {
        return Err(ClockError::new("expected two minute digits"));
    }
    let minute =
        parse_digits(minute_part).ok_or_else(|| ClockError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(ClockError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| ClockError::new("invalid time"))
}

/// Parse a travel duration from `M:SS` or `MM:SS`.
///
/// Minutes are unbounded (a long hop may exceed an hour); seconds must be
/// 0-59.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use metro_planner::clock::parse_minutes_seconds;
///
/// assert_eq!(parse_minutes_seconds("3:30").unwrap(), Duration::seconds(210));
/// assert_eq!(parse_minutes_seconds("90:00").unwrap(), Duration::minutes(90));
/// assert!(parse_minutes_seconds("3:61").is_err());
/// ```
pub fn parse_minutes_seconds(s: &str) -> Result<Duration, ClockError> {
    let (minute_part, second_part) = s
        .split_once(':')
        .ok_or_else(|| ClockError::new("expected M:SS or MM:SS"))?;

    if minute_part.is_empty() {
        return Err(ClockError::new("expected minute digits"));
    }
    let minutes =
        parse_digits(minute_part).ok_or_else(|| ClockError::new("invalid minute digits"))?;

    if second_part.len() != 2 {
        return Err(ClockError::new("expected two second digits"));
    }
    let seconds =
        parse_digits(second_part).ok_or_else(|| ClockError::new("invalid second digits"))?;
    if seconds > 59 {
        return Err(ClockError::new("second must be 0-59"));
    }

    Ok(Duration::seconds(i64::from(minutes) * 60 + i64::from(seconds)))
}

/// Forward distance from `from` to `to` on the 24-hour clock.
///
/// Zero when the times are equal; otherwise wraps past midnight, so the
/// result is always in `[0, 24h)`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveTime};
/// use metro_planner::clock::forward_wait;
///
/// let a = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
/// let b = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// assert_eq!(forward_wait(a, b), Duration::hours(7));
/// assert_eq!(forward_wait(b, b), Duration::zero());
/// ```
pub fn forward_wait(from: NaiveTime, to: NaiveTime) -> Duration {
    let delta = to.signed_duration_since(from);
    if delta < Duration::zero() {
        delta + Duration::days(1)
    } else {
        delta
    }
}

/// Parse a run of ASCII digits into a u32. `None` on any other byte.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for b in s.bytes() {
        let digit = (b as char).to_digit(10)?;
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    Some(value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_clock()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    prop_compose! {
        fn any_time()(hour in 0u32..24, minute in 0u32..60, second in 0u32..60) -> NaiveTime {
            NaiveTime::from_hms_opt(hour, minute, second).unwrap()
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_clock_parses(s in valid_clock()) {
            prop_assert!(parse_clock(&s).is_ok());
        }

        /// Parsing then reformatting roundtrips
        #[test]
        fn clock_roundtrip(s in valid_clock()) {
            let t = parse_clock(&s).unwrap();
            prop_assert_eq!(t.format("%H:%M").to_string(), s);
        }

        /// One-digit hours parse the same as their padded form
        #[test]
        fn short_hour_equivalent(hour in 0u32..10, minute in 0u32..60) {
            let short = format!("{}:{:02}", hour, minute);
            let padded = format!("{:02}:{:02}", hour, minute);
            prop_assert_eq!(parse_clock(&short).unwrap(), parse_clock(&padded).unwrap());
        }

        /// Out-of-range hours are rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(parse_clock(&s).is_err());
        }

        /// Durations parse to the expected number of seconds
        #[test]
        fn duration_seconds(minutes in 0u32..120, seconds in 0u32..60) {
            let s = format!("{}:{:02}", minutes, seconds);
            let parsed = parse_minutes_seconds(&s).unwrap();
            prop_assert_eq!(parsed.num_seconds(), i64::from(minutes) * 60 + i64::from(seconds));
        }

        /// The forward wait is always in [0, 24h)
        #[test]
        fn forward_wait_bounded(from in any_time(), to in any_time()) {
            let wait = forward_wait(from, to);
            prop_assert!(wait >= Duration::zero());
            prop_assert!(wait < Duration::days(1));
        }

        /// Waiting the forward distance lands exactly on the target time
        #[test]
        fn forward_wait_lands_on_target(from in any_time(), to in any_time()) {
            let wait = forward_wait(from, to);
            prop_assert_eq!(from + wait, to);
        }
    }
}
