//! Row shapes for the semicolon-delimited data files.

use serde::Deserialize;

use crate::geo::GeoPosition;
use crate::ingest::IngestError;

/// One row of the segments file:
/// `from;fromPos;to;toPos;LINE variant N;M:SS;km`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SegmentRow {
    pub from_name: String,
    pub from_position: String,
    pub to_name: String,
    pub to_position: String,
    pub line_ref: String,
    pub travel_time: String,
    pub distance_km: f64,
}

/// One row of the departures file: `line;terminus;H:MM;variant`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DepartureRow {
    pub line: String,
    pub terminus: String,
    pub time: String,
    pub variant: String,
}

/// Position cells read `longitude, latitude`, each coordinate decimal
/// or degrees-minutes-seconds.
pub(crate) fn parse_position(cell: &str) -> Result<GeoPosition, IngestError> {
    let Some((lon, lat)) = cell.split_once(',') else {
        return Err(IngestError::InvalidPosition(cell.to_owned()));
    };
    GeoPosition::parse(lat.trim(), lon.trim()).map_err(|source| IngestError::Position {
        cell: cell.to_owned(),
        source,
    })
}

/// Line cells read `LINE variant N`.
pub(crate) fn parse_line_ref(cell: &str) -> Result<(String, String), IngestError> {
    let Some((line, variant)) = cell.split_once(" variant ") else {
        return Err(IngestError::InvalidLineRef(cell.to_owned()));
    };
    let line = line.trim();
    let variant = variant.trim();
    if line.is_empty() || variant.is_empty() {
        return Err(IngestError::InvalidLineRef(cell.to_owned()));
    }
    Ok((line.to_owned(), variant.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_longitude_first() {
        let p = parse_position("2.35, 48.85").unwrap();
        assert_eq!(p.latitude(), 48.85);
        assert_eq!(p.longitude(), 2.35);
    }

    #[test]
    fn positions_accept_dms_coordinates() {
        let p = parse_position("2 17 40 E, 48 51 29 N").unwrap();
        assert!((p.latitude() - 48.858).abs() < 0.001);
        assert!((p.longitude() - 2.294).abs() < 0.001);
    }

    #[test]
    fn positions_require_a_comma() {
        assert!(matches!(
            parse_position("48.85"),
            Err(IngestError::InvalidPosition(_))
        ));
    }

    #[test]
    fn unparseable_coordinates_keep_the_cell() {
        let err = parse_position("abc, 48.85").unwrap_err();
        match err {
            IngestError::Position { cell, .. } => assert_eq!(cell, "abc, 48.85"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn line_refs_split_on_the_variant_marker() {
        assert_eq!(
            parse_line_ref("8 variant 1").unwrap(),
            ("8".to_owned(), "1".to_owned())
        );
        assert_eq!(
            parse_line_ref("Ligne Nord variant retour").unwrap(),
            ("Ligne Nord".to_owned(), "retour".to_owned())
        );
    }

    #[test]
    fn malformed_line_refs_are_rejected() {
        assert!(matches!(
            parse_line_ref("8 var 1"),
            Err(IngestError::InvalidLineRef(_))
        ));
        assert!(matches!(
            parse_line_ref(" variant 1"),
            Err(IngestError::InvalidLineRef(_))
        ));
        assert!(matches!(
            parse_line_ref("8 variant "),
            Err(IngestError::InvalidLineRef(_))
        ));
    }
}
