//! `remove_dot_segments` algorithm described in [RFC 3986 5.2.4].
//!
//! [RFC 3986 5.2.4]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::utf16::is;

/// Returns `true` if `s[index..]` starts with the ASCII pattern.
#[inline]
fn starts_with_at(s: &[u16], index: usize, pattern: &[u8]) -> bool {
    s.get(index..(index + pattern.len()))
        .map_or(false, |part| part.iter().zip(pattern).all(|(&unit, &c)| is(unit, c)))
}

/// Returns `true` if `s[index..]` is exactly the ASCII pattern.
#[inline]
fn is_rest_at(s: &[u16], index: usize, pattern: &[u8]) -> bool {
    s.len() == index + pattern.len() && starts_with_at(s, index, pattern)
}

/// Returns `true` if the ASCII pattern occurs anywhere in `s`.
fn contains(s: &[u16], pattern: &[u8]) -> bool {
    (0..s.len()).any(|index| starts_with_at(s, index, pattern))
}

/// Truncates the output to just before its last `/`, or to empty.
fn pop_segment(out: &mut Vec<u16>) {
    let last_slash = out.iter().rposition(|&unit| is(unit, b'/')).unwrap_or(0);
    out.truncate(last_slash);
}

/// Removes `.` and `..` segments from the path.
///
/// Returns the input as is if it has no dot segments.
///
/// # Examples
///
/// ```
/// use uri_utility::normalize::remove_dot_segments;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// assert_eq!(remove_dot_segments(&utf16("/a/b/c/./../../g")), utf16("/a/g"));
/// assert_eq!(remove_dot_segments(&utf16("mid/content=5/../6")), utf16("mid/6"));
/// assert_eq!(remove_dot_segments(&utf16("..")), utf16(""));
/// ```
#[must_use]
pub fn remove_dot_segments(path: &[u16]) -> Cow<'_, [u16]> {
    if path.is_empty() || is_rest_at(path, 0, b".") || is_rest_at(path, 0, b"..") {
        return Cow::Borrowed(&path[..0]);
    }
    if !contains(path, b"/.") && !contains(path, b"./") {
        return Cow::Borrowed(path);
    }

    let len = path.len();
    let mut out = Vec::with_capacity(len);
    let mut index = 0;
    while index < len {
        // 2A: leading `../` or `./`.
        if starts_with_at(path, index, b"../") {
            index += 3;
            continue;
        }
        if starts_with_at(path, index, b"./") {
            index += 2;
            continue;
        }
        // 2B: `/./`, or a trailing `/.`.
        if starts_with_at(path, index, b"/./") {
            index += 2;
            continue;
        }
        if is_rest_at(path, index, b"/.") {
            out.push(u16::from(b'/'));
            break;
        }
        // 2C: `/../`, or a trailing `/..`.
        if starts_with_at(path, index, b"/../") {
            pop_segment(&mut out);
            index += 3;
            continue;
        }
        if is_rest_at(path, index, b"/..") {
            pop_segment(&mut out);
            out.push(u16::from(b'/'));
            break;
        }
        // 2D: the whole rest is `.` or `..`.
        if is_rest_at(path, index, b".") || is_rest_at(path, index, b"..") {
            break;
        }
        // 2E: move the first segment, with its leading slash if any.
        let segment_end = path[(index + 1)..]
            .iter()
            .position(|&unit| is(unit, b'/'))
            .map_or(len, |pos| index + 1 + pos);
        out.extend_from_slice(&path[index..segment_end]);
        index = segment_end;
    }
    Cow::Owned(out)
}
