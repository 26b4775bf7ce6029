//! Validators.

use core::fmt;

#[cfg(feature = "std")]
use std::error;

use crate::mode::ParseMode;
use crate::parser::chars;
use crate::parser::split::split_checked;
use crate::utf16::{code_point_at, is_hex_pair_at};

/// Kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text is not valid for the requested operation.
    Invalid,
    /// An offset or length given by the caller is outside the text.
    ///
    /// This indicates a bug in the caller rather than bad data.
    OutOfRange,
}

/// Resource identifier error.
// Note that this type should implement `Copy` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
}

impl Error {
    /// Creates a new `Error` for invalid text.
    ///
    /// For internal use.
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            kind: ErrorKind::Invalid,
        }
    }

    /// Creates a new `Error` for an out-of-range offset or length.
    ///
    /// For internal use.
    #[inline]
    #[must_use]
    pub(crate) fn out_of_range() -> Self {
        Self {
            kind: ErrorKind::OutOfRange,
        }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Invalid => f.write_str("invalid IRI"),
            ErrorKind::OutOfRange => f.write_str("offset or length out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}

/// Returns `true` if the whole text is an IRI reference valid in the mode.
///
/// Note that relative references are also valid.
///
/// # Examples
///
/// ```
/// use uri_utility::mode::ParseMode;
/// use uri_utility::validate::is_valid_iri;
///
/// let s: Vec<u16> = "http://example.com/\u{e9}".encode_utf16().collect();
/// assert!(is_valid_iri(&s, ParseMode::IriStrict));
/// assert!(!is_valid_iri(&s, ParseMode::UriStrict));
/// ```
#[must_use]
pub fn is_valid_iri(s: &[u16], mode: ParseMode) -> bool {
    split_checked(s, 0..s.len(), mode).is_some()
}

/// Returns `true` if the text is a valid IRI with a scheme.
///
/// # Examples
///
/// ```
/// use uri_utility::validate::has_scheme;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// assert!(has_scheme(&utf16("xx-x:mm")));
/// assert!(!has_scheme(&utf16("x@y:/z")));
/// assert!(!has_scheme(&utf16("example.xyz")));
/// ```
#[must_use]
pub fn has_scheme(s: &[u16]) -> bool {
    has_scheme_in_mode(s, ParseMode::IriStrict)
}

/// Returns `true` if the text is a valid URI with a scheme.
///
/// Same as [`has_scheme`], except that non-ASCII characters make the text
/// invalid.
#[must_use]
pub fn has_scheme_for_uri(s: &[u16]) -> bool {
    has_scheme_in_mode(s, ParseMode::UriStrict)
}

/// Returns `true` if the text is valid in the mode and has a scheme.
fn has_scheme_in_mode(s: &[u16], mode: ParseMode) -> bool {
    split_checked(s, 0..s.len(), mode).map_or(false, |c| c.scheme.is_some())
}

/// Returns `true` if `length` code units starting at `offset` are a valid
/// CURIE reference.
///
/// A CURIE reference is a path, an optional query and an optional fragment,
/// with the IRI character classes. Unlike a relative reference, it must not
/// start with `//`, but its first segment may contain a colon. The empty
/// text is a valid CURIE reference.
///
/// # Errors
///
/// Returns an error of kind [`ErrorKind::OutOfRange`] if `offset + length`
/// exceeds the length of `s`. Invalid text is reported as `Ok(false)`.
///
/// # Examples
///
/// ```
/// use uri_utility::validate::is_valid_curie_reference;
///
/// let s: Vec<u16> = "x:y/z?q#f".encode_utf16().collect();
/// assert_eq!(is_valid_curie_reference(&s, 0, s.len()), Ok(true));
/// assert_eq!(is_valid_curie_reference(&s, 1, 3), Ok(true));
/// assert!(is_valid_curie_reference(&s, 1, 9).is_err());
/// ```
pub fn is_valid_curie_reference(s: &[u16], offset: usize, length: usize) -> Result<bool, Error> {
    let end = offset
        .checked_add(length)
        .filter(|&end| end <= s.len())
        .ok_or_else(Error::out_of_range)?;
    Ok(is_curie_reference(s, offset, end))
}

/// Component being scanned in a CURIE reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurieState {
    /// Path.
    Path,
    /// Query.
    Query,
    /// Fragment.
    Fragment,
}

/// Checks `s[start..end]` as a CURIE reference.
fn is_curie_reference(s: &[u16], start: usize, end: usize) -> bool {
    let s_ref = &s[start..end];
    if s_ref.len() >= 2 && s_ref[0] == u16::from(b'/') && s_ref[1] == u16::from(b'/') {
        return false;
    }
    let mut state = CurieState::Path;
    let mut index = start;
    while index < end {
        let (c, len) = match code_point_at(s, index, end) {
            (Ok(c), len) => (c, len),
            (Err(_), _) => return false,
        };
        if c == '%' {
            if !is_hex_pair_at(s, index + 1, end) {
                return false;
            }
            index += 3;
            continue;
        }
        let valid = match state {
            CurieState::Path => match c {
                '?' => {
                    state = CurieState::Query;
                    true
                }
                '#' => {
                    state = CurieState::Fragment;
                    true
                }
                c => chars::is_ipchar(c),
            },
            CurieState::Query => match c {
                '#' => {
                    state = CurieState::Fragment;
                    true
                }
                c => chars::is_iquery_char(c),
            },
            CurieState::Fragment => chars::is_ifragment_char(c),
        };
        if !valid {
            return false;
        }
        index += len;
    }
    true
}
