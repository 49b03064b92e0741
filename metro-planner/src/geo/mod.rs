//! Geographic positions and spherical geometry.
//!
//! Positions are validated latitude/longitude pairs in degrees. Distances
//! come from projecting both points onto a sphere in Cartesian space and
//! taking the straight-line separation; walking-edge lengths and the
//! nearest-stop selection are defined over that measure.

mod nearby;

pub use nearby::{NoCandidates, closest_within_radius, closest_within_radius_or_nearest, distance_sorted};

use std::fmt;
use std::hash::{Hash, Hasher};

/// Mean Earth radius, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Error returned when constructing or parsing an invalid position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("latitude out of range [-90, 90]")]
    LatitudeOutOfRange,
    #[error("longitude out of range [-180, 180]")]
    LongitudeOutOfRange,
    #[error("coordinate is not a finite number")]
    NotFinite,
    #[error("invalid coordinate text: {reason}")]
    Parse { reason: &'static str },
}

/// Anything sitting at a geographic position.
pub trait Positioned {
    fn position(&self) -> GeoPosition;
}

/// A point on the Earth's surface, in degrees.
///
/// Coordinates are validated at construction: finite, latitude in
/// [-90, 90], longitude in [-180, 180]. Equality and hashing are bitwise
/// over the two coordinates, so positions are usable as map keys.
///
/// # Examples
///
/// ```
/// use metro_planner::geo::GeoPosition;
///
/// let etoile = GeoPosition::new(48.8738, 2.2950).unwrap();
/// assert_eq!(etoile.latitude(), 48.8738);
/// assert!(GeoPosition::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeoPosition {
    latitude: f64,
    longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PositionError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(PositionError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PositionError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PositionError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a latitude/longitude pair from coordinate text.
    ///
    /// Each coordinate is either decimal degrees (`"48.8582"`) or
    /// degrees-minutes-seconds with a trailing hemisphere letter
    /// (`"48 51 29 N"`); `S` and `W` negate.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_planner::geo::GeoPosition;
    ///
    /// let decimal = GeoPosition::parse("48.8582", "2.2945").unwrap();
    /// let dms = GeoPosition::parse("48 51 29 N", "2 17 40 E").unwrap();
    /// assert!((decimal.latitude() - dms.latitude()).abs() < 0.001);
    /// assert!(GeoPosition::parse("48 51 N", "2.29").is_err());
    /// ```
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, PositionError> {
        let lat = parse_coordinate(latitude, Axis::Latitude)?;
        let lon = parse_coordinate(longitude, Axis::Longitude)?;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Cartesian projection onto a sphere of the given radius.
    ///
    /// Components are rounded to four decimals so that equal positions
    /// always project onto identical coordinates.
    pub fn cartesian(&self, radius: f64) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        [
            round4(radius * lat.cos() * lon.cos()),
            round4(radius * lat.cos() * lon.sin()),
            round4(radius * lat.sin()),
        ]
    }

    /// Straight-line distance in metres between the Earth projections of
    /// two positions.
    pub fn distance_to(&self, other: &GeoPosition) -> f64 {
        self.distance_on_sphere(other, EARTH_RADIUS_M)
    }

    /// Straight-line (chord) distance between the projections of two
    /// positions onto a sphere of the given radius.
    pub fn distance_on_sphere(&self, other: &GeoPosition, radius: f64) -> f64 {
        let a = self.cartesian(radius);
        let b = other.cartesian(radius);
        let dx = a[0] - b[0];
        let dy = a[1] - b[1];
        let dz = a[2] - b[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl PartialEq for GeoPosition {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for GeoPosition {}

impl Hash for GeoPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl Positioned for GeoPosition {
    fn position(&self) -> GeoPosition {
        *self
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Latitude,
    Longitude,
}

fn parse_coordinate(s: &str, axis: Axis) -> Result<f64, PositionError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    match parts.as_slice() {
        [decimal] => decimal.parse::<f64>().map_err(|_| PositionError::Parse {
            reason: "expected a decimal number",
        }),
        [d, m, sec, hemisphere] => {
            let degrees = parse_component(d)?;
            let minutes = parse_component(m)?;
            let seconds = parse_component(sec)?;
            let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
            Ok(hemisphere_sign(hemisphere, axis)? * magnitude)
        }
        _ => Err(PositionError::Parse {
            reason: "expected decimal degrees or \"deg min sec hemisphere\"",
        }),
    }
}

fn parse_component(s: &str) -> Result<f64, PositionError> {
    let value: f64 = s.parse().map_err(|_| PositionError::Parse {
        reason: "invalid degree/minute/second digits",
    })?;
    if value < 0.0 {
        return Err(PositionError::Parse {
            reason: "degree/minute/second components must be non-negative",
        });
    }
    Ok(value)
}

fn hemisphere_sign(hemisphere: &str, axis: Axis) -> Result<f64, PositionError> {
    match (axis, hemisphere) {
        (Axis::Latitude, "N") => Ok(1.0),
        (Axis::Latitude, "S") => Ok(-1.0),
        (Axis::Longitude, "E") => Ok(1.0),
        (Axis::Longitude, "W") => Ok(-1.0),
        _ => Err(PositionError::Parse {
            reason: "hemisphere must be N/S for latitude, E/W for longitude",
        }),
    }
}

/// Round to four decimal places, ties away from zero.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_position()(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) -> GeoPosition {
            GeoPosition::new(lat, lon).unwrap()
        }
    }

    proptest! {
        /// In-range coordinates always construct
        #[test]
        fn in_range_constructs(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(GeoPosition::new(lat, lon).is_ok());
        }

        /// Out-of-range latitudes are rejected
        #[test]
        fn out_of_range_latitude_rejected(lat in 90.0f64..1000.0, lon in -180.0f64..=180.0) {
            prop_assume!(lat > 90.0);
            prop_assert!(GeoPosition::new(lat, lon).is_err());
        }

        /// Distance is symmetric
        #[test]
        fn distance_symmetric(a in valid_position(), b in valid_position()) {
            prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
        }

        /// Distance to self is zero
        #[test]
        fn distance_to_self_zero(a in valid_position()) {
            prop_assert_eq!(a.distance_to(&a), 0.0);
        }

        /// Distance is non-negative and bounded by the diameter
        #[test]
        fn distance_bounded(a in valid_position(), b in valid_position()) {
            let d = a.distance_to(&b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= 2.0 * EARTH_RADIUS_M + 1.0);
        }

        /// DMS parsing agrees with the arithmetic it encodes
        #[test]
        fn dms_matches_arithmetic(d in 0u32..90, m in 0u32..60, s in 0u32..60) {
            let text = format!("{d} {m} {s} S");
            let parsed = parse_coordinate(&text, Axis::Latitude).unwrap();
            let expected = -(f64::from(d) + f64::from(m) / 60.0 + f64::from(s) / 3600.0);
            prop_assert!((parsed - expected).abs() < 1e-9);
        }
    }
}
