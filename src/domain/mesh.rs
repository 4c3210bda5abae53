//! JIS X 0410 regional mesh code decoding
//!
//! A 10-digit code is read as five nested levels:
//!
//! | digits | level | cell (lat × lon)       |
//! |--------|-------|------------------------|
//! | 0..4   | 1st   | 40' × 1°               |
//! | 4..6   | 2nd   | 5' × 7'30"             |
//! | 6..8   | 3rd   | 30" × 45"              |
//! | 8      | 4th   | 15" × 22.5" (quadrant) |
//! | 9      | 5th   | 7.5" × 11.25" (quadrant) |
//!
//! Quadrant digits (4th and 5th level) select the north half when the digit
//! is greater than 2 and the east half when the digit is even.

use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

/// Number of characters in a 5th-level mesh code.
pub const MESH_CODE_LEN: usize = 10;

/// 2nd-level step: 5 arcmin latitude, 7.5 arcmin longitude.
const LAT_2ND_STEP: f64 = 1.0 / 12.0;
const LON_2ND_STEP: f64 = 1.0 / 8.0;

/// 3rd-level step: 30 arcsec latitude, 45 arcsec longitude.
const LAT_3RD_STEP: f64 = 30.0 / 3600.0;
const LON_3RD_STEP: f64 = 45.0 / 3600.0;

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Axis-aligned rectangle given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRect {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl GeoRect {
    pub fn new(south_west: LatLon, north_east: LatLon) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    /// Longitude extent in degrees.
    pub fn width(&self) -> f64 {
        self.north_east.lon - self.south_west.lon
    }

    /// Closed polygon ring in (longitude, latitude) order.
    ///
    /// Walks SW → NW → NE → SE and back to SW.
    pub fn ring(&self) -> [[f64; 2]; 5] {
        let sw = self.south_west;
        let ne = self.north_east;
        [
            [sw.lon, sw.lat],
            [sw.lon, ne.lat],
            [ne.lon, ne.lat],
            [ne.lon, sw.lat],
            [sw.lon, sw.lat],
        ]
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &GeoRect) -> GeoRect {
        GeoRect {
            south_west: LatLon {
                lat: self.south_west.lat.min(other.south_west.lat),
                lon: self.south_west.lon.min(other.south_west.lon),
            },
            north_east: LatLon {
                lat: self.north_east.lat.max(other.north_east.lat),
                lon: self.north_east.lon.max(other.north_east.lon),
            },
        }
    }

    /// GeoJSON bounding box order: `[west, south, east, north]`.
    pub fn to_bbox(&self) -> [f64; 4] {
        [
            self.south_west.lon,
            self.south_west.lat,
            self.north_east.lon,
            self.north_east.lat,
        ]
    }
}

/// A 10-character regional mesh code.
///
/// Only the length is checked on construction. Non-digit characters are
/// accepted and decode to NaN coordinates (or to "no offset" at the
/// quadrant levels).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeshCode(String);

impl MeshCode {
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let length = code.chars().count();
        if length != MESH_CODE_LEN {
            return Err(DomainError::InvalidMeshCodeLength { length });
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the code into the rectangle of its 5th-level cell.
    pub fn decode(&self) -> GeoRect {
        let c: Vec<char> = self.0.chars().collect();

        // 1st level
        let lat1 = leading_int(&c[0..2]) / 1.5;
        let lon1 = leading_int(&c[2..4]) + 100.0;

        // 2nd level
        let lat2 = lat1 + digit(c[4]) * LAT_2ND_STEP;
        let lon2 = lon1 + digit(c[5]) * LON_2ND_STEP;

        // 3rd level
        let lat3 = lat2 + digit(c[6]) * LAT_3RD_STEP;
        let lon3 = lon2 + digit(c[7]) * LON_3RD_STEP;

        // 4th level: halves the 3rd-level cell
        let (dlat4, dlon4) = quadrant_offset(c[8], LAT_3RD_STEP, LON_3RD_STEP);
        let lat4 = lat3 + dlat4;
        let lon4 = lon3 + dlon4;
        let lat4_h = LAT_3RD_STEP / 2.0;
        let lon4_w = LON_3RD_STEP / 2.0;

        // 5th level: halves the 4th-level cell
        let (dlat5, dlon5) = quadrant_offset(c[9], lat4_h, lon4_w);
        let lat5 = lat4 + dlat5;
        let lon5 = lon4 + dlon5;
        let lat5_h = lat4_h / 2.0;
        let lon5_w = lon4_w / 2.0;

        GeoRect::new(
            LatLon::new(lat5, lon5),
            LatLon::new(lat5 + lat5_h, lon5 + lon5_w),
        )
    }
}

impl FromStr for MeshCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MeshCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeshCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode a mesh code string into its rectangle.
///
/// # Errors
///
/// [`DomainError::InvalidMeshCodeLength`] when `code` is not exactly
/// [`MESH_CODE_LEN`] characters long.
pub fn decode(code: &str) -> DomainResult<GeoRect> {
    Ok(MeshCode::new(code)?.decode())
}

/// Integer prefix of `chars`: optional leading whitespace and sign, then
/// decimal digits up to the first non-digit. NaN when no digit is found.
fn leading_int(chars: &[char]) -> f64 {
    let mut rest = chars.iter().skip_while(|c| c.is_whitespace()).peekable();
    let negative = match rest.peek() {
        Some('-') => {
            rest.next();
            true
        }
        Some('+') => {
            rest.next();
            false
        }
        _ => false,
    };

    let mut value: Option<f64> = None;
    for c in rest {
        match c.to_digit(10) {
            Some(d) => value = Some(value.unwrap_or(0.0) * 10.0 + f64::from(d)),
            None => break,
        }
    }

    match value {
        Some(v) if negative => -v,
        Some(v) => v,
        None => f64::NAN,
    }
}

fn digit(c: char) -> f64 {
    c.to_digit(10).map(f64::from).unwrap_or(f64::NAN)
}

/// Offset of the selected half-cell within a cell of `height` × `width`.
///
/// A non-digit matches neither rule and yields no offset.
fn quadrant_offset(c: char, height: f64, width: f64) -> (f64, f64) {
    match c.to_digit(10) {
        Some(q) => {
            let dlat = if q > 2 { height / 2.0 } else { 0.0 };
            let dlon = if q % 2 == 0 { width / 2.0 } else { 0.0 };
            (dlat, dlon)
        }
        None => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int_reads_digit_prefix() {
        assert_eq!(leading_int(&['5', '3']), 53.0);
        assert_eq!(leading_int(&['5', 'x']), 5.0);
        assert_eq!(leading_int(&[' ', '7']), 7.0);
        assert_eq!(leading_int(&['-', '4']), -4.0);
        assert!(leading_int(&['x', '5']).is_nan());
        assert!(leading_int(&['-', '-']).is_nan());
    }

    #[test]
    fn test_quadrant_offset_follows_north_east_rule() {
        assert_eq!(quadrant_offset('1', 2.0, 4.0), (0.0, 0.0));
        assert_eq!(quadrant_offset('2', 2.0, 4.0), (0.0, 2.0));
        assert_eq!(quadrant_offset('3', 2.0, 4.0), (1.0, 0.0));
        assert_eq!(quadrant_offset('4', 2.0, 4.0), (1.0, 2.0));
        // 0 is even and not above 2
        assert_eq!(quadrant_offset('0', 2.0, 4.0), (0.0, 2.0));
        assert_eq!(quadrant_offset('a', 2.0, 4.0), (0.0, 0.0));
    }

    #[test]
    fn test_ring_is_closed_and_lon_first() {
        let rect = GeoRect::new(LatLon::new(35.0, 139.0), LatLon::new(36.0, 140.0));
        let ring = rect.ring();

        assert_eq!(ring[0], ring[4]);
        assert_eq!(ring[0], [139.0, 35.0]);
        assert_eq!(ring[1], [139.0, 36.0]);
        assert_eq!(ring[2], [140.0, 36.0]);
        assert_eq!(ring[3], [140.0, 35.0]);
    }

    #[test]
    fn test_union_covers_both_rects() {
        let a = GeoRect::new(LatLon::new(35.0, 139.0), LatLon::new(36.0, 140.0));
        let b = GeoRect::new(LatLon::new(34.5, 139.5), LatLon::new(35.5, 141.0));

        let u = a.union(&b);

        assert_eq!(u.south_west, LatLon::new(34.5, 139.0));
        assert_eq!(u.north_east, LatLon::new(36.0, 141.0));
        assert_eq!(u.to_bbox(), [139.0, 34.5, 141.0, 36.0]);
    }

    #[test]
    fn test_non_digit_in_first_level_yields_nan() {
        let rect = decode("ab39352700").unwrap();
        assert!(rect.south_west.lat.is_nan());
        assert!(rect.north_east.lat.is_nan());
        assert!(!rect.south_west.lon.is_nan());
    }

    #[test]
    fn test_non_digit_quadrant_behaves_like_south_west() {
        let plain = decode("5339352711").unwrap();
        let lettered = decode("53393527x1").unwrap();
        assert_eq!(plain, lettered);
    }

    #[test]
    fn test_full_width_digits_pass_length_check_but_decode_to_nan() {
        let code = MeshCode::new("５３３９３５２７００").unwrap();
        let rect = code.decode();
        assert!(rect.south_west.lat.is_nan());
        assert!(rect.south_west.lon.is_nan());
    }
}
