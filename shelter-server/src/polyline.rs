//! Compact polyline codec.
//!
//! Routing responses describe a path as an "encoded polyline": each point is
//! stored as the difference from the previous point, scaled by 100 000 and
//! rounded, then zig-zag encoded and written out in 5-bit groups (least
//! significant first). Every group except the last of a value carries the
//! continuation bit `0x20`, and each group is offset by 63 to land in
//! printable ASCII.
//!
//! Because every point is a delta from its predecessor, the decoder keeps an
//! integer accumulator and only divides at the end. Accumulating in floating
//! point would let rounding error compound along the path.

use crate::domain::Geocoordinate;

/// Fixed-point scale for five decimal digits.
const PRECISION: f64 = 100_000.0;

/// Offset added to every 5-bit group to make it printable.
const CHAR_OFFSET: u8 = 63;

/// Set on every group that is followed by another group of the same value.
const CONTINUATION_BIT: i64 = 0x20;

/// Mask for the payload bits of a group.
const GROUP_MASK: i64 = 0x1f;

/// Largest shift before an accumulated value would overflow an `i64`.
const MAX_SHIFT: u32 = 60;

/// Errors from decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolylineError {
    /// A byte outside the encoding alphabet (`?` through `~`)
    #[error("invalid polyline byte 0x{byte:02x} at position {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    /// The input ended in the middle of a value, or after a lone latitude
    #[error("polyline truncated at position {position}")]
    Truncated { position: usize },

    /// A value used more groups than fit in 64 bits
    #[error("polyline value overflows at position {position}")]
    Overflow { position: usize },

    /// A decoded point is not a valid coordinate
    #[error("decoded point {index} is out of range: ({latitude}, {longitude})")]
    OutOfRange {
        index: usize,
        latitude: f64,
        longitude: f64,
    },
}

/// Decode an encoded polyline into its coordinates, in path order.
///
/// An empty string decodes to an empty path.
///
/// # Examples
///
/// ```
/// use shelter_server::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].latitude() - 38.5).abs() < 1e-5);
/// assert!((points[2].longitude() - -126.453).abs() < 1e-5);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Geocoordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut position = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut points = Vec::new();

    while position < bytes.len() {
        latitude += decode_value(bytes, &mut position)?;
        if position >= bytes.len() {
            return Err(PolylineError::Truncated { position });
        }
        longitude += decode_value(bytes, &mut position)?;

        let lat = latitude as f64 / PRECISION;
        let lng = longitude as f64 / PRECISION;
        let point = Geocoordinate::new(lat, lng).map_err(|_| PolylineError::OutOfRange {
            index: points.len(),
            latitude: lat,
            longitude: lng,
        })?;
        points.push(point);
    }

    Ok(points)
}

/// Read one signed value starting at `position`, advancing past it.
fn decode_value(bytes: &[u8], position: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            return Err(PolylineError::Truncated {
                position: *position,
            });
        };
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *position,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow {
                position: *position,
            });
        }

        let group = i64::from(byte - CHAR_OFFSET);
        result |= (group & GROUP_MASK) << shift;
        shift += 5;
        *position += 1;

        if group & CONTINUATION_BIT == 0 {
            break;
        }
    }

    // Zig-zag: the low bit carries the sign.
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

/// Encode coordinates as a polyline, the inverse of [`decode`].
///
/// Coordinates are rounded to five decimal places.
pub fn encode(points: &[Geocoordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = to_fixed(point.latitude());
        let lng = to_fixed(point.longitude());
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn to_fixed(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= CONTINUATION_BIT as u64 {
        let group = (CONTINUATION_BIT as u64 | (value & GROUP_MASK as u64)) as u8;
        out.push(char::from(group + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}
