//! Components of IRIs.
//!
//! Splitting never copies the input: the result is a set of ranges of code
//! unit offsets into the original slice.

#[cfg(feature = "alloc")]
use alloc::borrow::Cow;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mode::ParseMode;
use crate::parser::split::split_checked;
use crate::validate::Error;

/// Boundaries of the components of an IRI reference.
///
/// Every range is an offset into the slice that was split. Absent components
/// are `None`. The path is always present, though it can be empty.
///
/// The ranges do not include the delimiters: the scheme ends just before its
/// `:`, the authority starts after `//`, the query starts after `?`, and the
/// fragment starts after `#`.
///
/// See <https://tools.ietf.org/html/rfc3986#section-3>.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Components {
    /// Scheme.
    pub scheme: Option<Range<usize>>,
    /// Authority.
    ///
    /// Note that this can be an empty range, as in `file:///x`.
    pub authority: Option<Range<usize>>,
    /// Path.
    pub path: Range<usize>,
    /// Query.
    pub query: Option<Range<usize>>,
    /// Fragment.
    pub fragment: Option<Range<usize>>,
}

impl Components {
    /// Creates components of an empty reference located at `offset`.
    #[inline]
    #[must_use]
    pub(crate) fn empty_at(offset: usize) -> Self {
        Self {
            scheme: None,
            authority: None,
            path: offset..offset,
            query: None,
            fragment: None,
        }
    }

    /// Returns `true` if the path is empty.
    #[inline]
    #[must_use]
    pub fn is_path_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the range from the start of the reference to the end of the
    /// authority (or the scheme's colon, when there is no authority).
    ///
    /// Returns an empty range at the start of the path if the reference has
    /// neither a scheme nor an authority.
    #[cfg(feature = "alloc")]
    #[must_use]
    pub(crate) fn prefix_range(&self) -> Range<usize> {
        let start = self
            .scheme
            .as_ref()
            .map(|r| r.start)
            .or_else(|| self.authority.as_ref().map(|r| r.start - 2))
            .unwrap_or(self.path.start);
        start..self.path.start
    }
}

/// Splits the whole text into components.
///
/// Returns an error if the text is not valid in the given mode.
///
/// # Examples
///
/// ```
/// use uri_utility::components::split;
/// use uri_utility::mode::ParseMode;
///
/// let s: Vec<u16> = "s://h".encode_utf16().collect();
/// let c = split(&s, ParseMode::IriStrict)?;
/// assert_eq!(c.authority, Some(4..5));
/// assert!(c.is_path_empty());
///
/// let bad: Vec<u16> = "e://x:a".encode_utf16().collect();
/// assert!(split(&bad, ParseMode::IriStrict).is_err());
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn split(s: &[u16], mode: ParseMode) -> Result<Components, Error> {
    split_checked(s, 0..s.len(), mode).ok_or_else(Error::new)
}

/// Splits `length` code units starting at `offset` into components.
///
/// The returned ranges are offsets into the whole of `s`, not into the
/// portion split.
///
/// # Errors
///
/// Returns an error of kind [`OutOfRange`][`crate::validate::ErrorKind::OutOfRange`]
/// if `offset + length` exceeds the length of `s`, and of kind
/// [`Invalid`][`crate::validate::ErrorKind::Invalid`] if the portion is not
/// valid in the given mode.
pub fn split_range(
    s: &[u16],
    offset: usize,
    length: usize,
    mode: ParseMode,
) -> Result<Components, Error> {
    let end = offset
        .checked_add(length)
        .filter(|&end| end <= s.len())
        .ok_or_else(Error::out_of_range)?;
    split_checked(s, offset..end, mode).ok_or_else(Error::new)
}

/// Components of an IRI reference as slices of the original text.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentParts<'a> {
    /// Scheme, converted to ASCII lower case.
    pub scheme: Option<Cow<'a, [u16]>>,
    /// Authority.
    pub authority: Option<&'a [u16]>,
    /// Path.
    pub path: &'a [u16],
    /// Query.
    pub query: Option<&'a [u16]>,
    /// Fragment.
    pub fragment: Option<&'a [u16]>,
}

/// Splits the text in [`IriStrict`][`ParseMode::IriStrict`] mode and returns
/// the components as slices.
///
/// The scheme is converted to ASCII lower case, and is borrowed from the
/// input if it already is.
///
/// # Examples
///
/// ```
/// use uri_utility::components::split_to_components;
///
/// let s: Vec<u16> = "HTTP://h/p".encode_utf16().collect();
/// let parts = split_to_components(&s)?;
/// let scheme: Vec<u16> = "http".encode_utf16().collect();
/// assert_eq!(parts.scheme.as_deref(), Some(&scheme[..]));
/// assert_eq!(parts.path, &s[8..]);
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
#[cfg(feature = "alloc")]
pub fn split_to_components(s: &[u16]) -> Result<ComponentParts<'_>, Error> {
    let c = split(s, ParseMode::IriStrict)?;
    let slice = |r: Option<Range<usize>>| r.map(|r| &s[r]);
    Ok(ComponentParts {
        scheme: c.scheme.map(|r| lowercase_ascii(&s[r])),
        authority: slice(c.authority),
        path: &s[c.path],
        query: slice(c.query),
        fragment: slice(c.fragment),
    })
}

/// Converts ASCII upper case letters to lower case.
#[cfg(feature = "alloc")]
fn lowercase_ascii(s: &[u16]) -> Cow<'_, [u16]> {
    let is_upper = |&unit: &u16| (u16::from(b'A')..=u16::from(b'Z')).contains(&unit);
    if !s.iter().any(is_upper) {
        return Cow::Borrowed(s);
    }
    let lowered: Vec<u16> = s
        .iter()
        .map(|&unit| if is_upper(&unit) { unit + 0x20 } else { unit })
        .collect();
    Cow::Owned(lowered)
}
