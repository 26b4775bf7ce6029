//! Path normalization.
//!
//! Only dot segments are handled here. Case normalization and
//! percent-encoding normalization are not done, since they can change what
//! a scheme-specific consumer sees.

mod remove_dot_segments;

pub use self::remove_dot_segments::remove_dot_segments;

use crate::percent_decode::{percent_decode, OnInvalid};
use crate::utf16::is;

/// Returns `true` if the path has a `.` or `..` segment once
/// percent-decoded.
///
/// Percent-encoded dots such as `%2E` count, since a consumer decoding the
/// path sees them as dot segments.
///
/// # Examples
///
/// ```
/// use uri_utility::normalize::has_dot_segment;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// assert!(has_dot_segment(&utf16("a/../b")));
/// assert!(has_dot_segment(&utf16("a/%2E")));
/// assert!(!has_dot_segment(&utf16("a/.b/c..")));
/// ```
#[must_use]
pub fn has_dot_segment(path: &[u16]) -> bool {
    let decoded = match percent_decode(path, OnInvalid::Substitute) {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };
    decoded.split(|&unit| is(unit, b'/')).any(|segment| {
        matches!(segment, [dot] if is(*dot, b'.'))
            || matches!(segment, [dot1, dot2] if is(*dot1, b'.') && is(*dot2, b'.'))
    })
}
