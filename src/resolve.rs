//! URI and IRI resolvers.
//!
//! Resolution follows [RFC 3986 section 5.2.2], with the merged or absolute
//! path of the reference passed through
//! [`remove_dot_segments`][`crate::normalize::remove_dot_segments`].
//!
//! [RFC 3986 section 5.2.2]: https://tools.ietf.org/html/rfc3986#section-5.2.2
//!
//! # Resolution can produce an ambiguous path
//!
//! Though this is not explicitly stated in RFC 3986, the pure RFC 3986
//! algorithm can produce text that does not split back into the same
//! components. For example, resolving `.///bar` against `scheme:` gives
//! scheme `scheme`, no authority, and path `//bar`, which is serialized as
//! `scheme://bar` and read back with the authority `bar`.
//!
//! This can happen only when the base has no authority. The resolvers here
//! return the serialized text as is.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::ops::Range;

use crate::components::Components;
use crate::mode::ParseMode;
use crate::normalize::{has_dot_segment, remove_dot_segments};
use crate::parser::split::split_checked;
use crate::utf16::is;
use crate::validate::Error;

/// Components of the resolved IRI.
#[derive(Debug, Clone)]
struct Resolved<'a> {
    /// Scheme.
    scheme: Option<&'a [u16]>,
    /// Authority.
    authority: Option<&'a [u16]>,
    /// Path.
    path: Cow<'a, [u16]>,
    /// Query.
    query: Option<&'a [u16]>,
    /// Fragment.
    fragment: Option<&'a [u16]>,
}

impl Resolved<'_> {
    /// Serializes the components.
    fn recompose(&self) -> Vec<u16> {
        let len = self.scheme.map_or(0, |s| s.len() + 1)
            + self.authority.map_or(0, |s| s.len() + 2)
            + self.path.len()
            + self.query.map_or(0, |s| s.len() + 1)
            + self.fragment.map_or(0, |s| s.len() + 1);
        let mut buf = Vec::with_capacity(len);
        if let Some(scheme) = self.scheme {
            buf.extend_from_slice(scheme);
            buf.push(u16::from(b':'));
        }
        if let Some(authority) = self.authority {
            buf.extend_from_slice(&[u16::from(b'/'), u16::from(b'/')]);
            buf.extend_from_slice(authority);
        }
        buf.extend_from_slice(&self.path);
        if let Some(query) = self.query {
            buf.push(u16::from(b'?'));
            buf.extend_from_slice(query);
        }
        if let Some(fragment) = self.fragment {
            buf.push(u16::from(b'#'));
            buf.extend_from_slice(fragment);
        }
        buf
    }
}

/// Returns the component slice.
#[inline]
fn slice<'a>(s: &'a [u16], range: &Option<Range<usize>>) -> Option<&'a [u16]> {
    range.clone().map(|r| &s[r])
}

/// Resolves the reference against the base.
///
/// If `base` is `None` or is not valid in the mode, the reference is
/// returned as is.
///
/// # Errors
///
/// Returns an error if the reference is not valid in the mode.
///
/// # Examples
///
/// ```
/// use uri_utility::mode::ParseMode;
/// use uri_utility::resolve::resolve;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// let base = utf16("http://example.com/a/b/c/d/e.f");
/// let input = utf16("../.x");
/// let resolved = resolve(&input, Some(&base), ParseMode::IriStrict)?;
/// assert_eq!(resolved, utf16("http://example.com/a/b/c/.x"));
///
/// let reference = utf16("index.html");
/// let unresolved = resolve(&reference, None, ParseMode::IriStrict)?;
/// assert_eq!(unresolved, reference);
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn resolve<'a>(
    reference: &'a [u16],
    base: Option<&[u16]>,
    mode: ParseMode,
) -> Result<Cow<'a, [u16]>, Error> {
    let r = split_checked(reference, 0..reference.len(), mode).ok_or_else(Error::new)?;
    let (base, b) = match base.and_then(|base| {
        split_checked(base, 0..base.len(), mode).map(|components| (base, components))
    }) {
        Some(v) => v,
        None => return Ok(Cow::Borrowed(reference)),
    };
    Ok(Cow::Owned(resolve_components(reference, &r, base, &b).recompose()))
}

/// Resolves split components.
fn resolve_components<'a>(
    reference: &'a [u16],
    r: &Components,
    base: &'a [u16],
    b: &Components,
) -> Resolved<'a> {
    let ref_path = &reference[r.path.clone()];
    if r.scheme.is_some() {
        return Resolved {
            scheme: slice(reference, &r.scheme),
            authority: slice(reference, &r.authority),
            path: remove_dot_segments(ref_path),
            query: slice(reference, &r.query),
            fragment: slice(reference, &r.fragment),
        };
    }
    if r.authority.is_some() {
        return Resolved {
            scheme: slice(base, &b.scheme),
            authority: slice(reference, &r.authority),
            path: remove_dot_segments(ref_path),
            query: slice(reference, &r.query),
            fragment: slice(reference, &r.fragment),
        };
    }
    if ref_path.is_empty() {
        let query = match r.query {
            Some(_) => slice(reference, &r.query),
            None => slice(base, &b.query),
        };
        return Resolved {
            scheme: slice(base, &b.scheme),
            authority: slice(base, &b.authority),
            path: Cow::Borrowed(&base[b.path.clone()]),
            query,
            fragment: slice(reference, &r.fragment),
        };
    }

    let path = if is(ref_path[0], b'/') {
        remove_dot_segments(ref_path)
    } else {
        let base_path = &base[b.path.clone()];
        let parent: &[u16] = if b.authority.is_some() && base_path.is_empty() {
            &[0x2F]
        } else {
            base_path
                .iter()
                .rposition(|&unit| is(unit, b'/'))
                .map_or(&base_path[..0], |pos| &base_path[..=pos])
        };
        let mut merged = Vec::with_capacity(parent.len() + ref_path.len());
        merged.extend_from_slice(parent);
        merged.extend_from_slice(ref_path);
        Cow::Owned(remove_dot_segments(&merged).into_owned())
    };
    Resolved {
        scheme: slice(base, &b.scheme),
        authority: slice(base, &b.authority),
        path,
        query: slice(reference, &r.query),
        fragment: slice(reference, &r.fragment),
    }
}

/// Returns the text up to and including the last `/` of its path.
///
/// If the path has no `/`, returns the text up to the end of the path.
/// `.` and `..` segments are not removed.
///
/// # Errors
///
/// Returns an error if the text is not valid in the mode.
///
/// # Examples
///
/// ```
/// use uri_utility::mode::ParseMode;
/// use uri_utility::resolve::directory_path;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// let s = utf16("http://example.com/a/b.html?q");
/// assert_eq!(directory_path(&s, ParseMode::IriStrict)?, &utf16("http://example.com/a/")[..]);
/// let s = utf16("x:y");
/// assert_eq!(directory_path(&s, ParseMode::IriStrict)?, &s[..]);
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn directory_path(s: &[u16], mode: ParseMode) -> Result<&[u16], Error> {
    let c = split_checked(s, 0..s.len(), mode).ok_or_else(Error::new)?;
    let end = s[c.path.clone()]
        .iter()
        .rposition(|&unit| is(unit, b'/'))
        .map_or(c.path.end, |pos| c.path.start + pos + 1);
    Ok(&s[..end])
}

/// Resolves the reference against the base, only if the result stays in the
/// directory of the base.
///
/// Both are checked in [`IriStrict`][`ParseMode::IriStrict`] mode.
///
/// # Errors
///
/// Returns an error if:
///
/// * either text is not a valid IRI reference,
/// * the path of the reference has a `.` or `..` segment, even a
///   percent-encoded one, or
/// * the directory of the result (see [`directory_path`]) differs from the
///   directory of the base.
///
/// # Examples
///
/// ```
/// use uri_utility::resolve::resolve_within_base;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// let base = utf16("http://example.com/my/path/");
/// let resolved = resolve_within_base(&utf16("file.txt"), &base)?;
/// assert_eq!(resolved, utf16("http://example.com/my/path/file.txt"));
///
/// assert!(resolve_within_base(&utf16("../file.txt"), &base).is_err());
/// assert!(resolve_within_base(&utf16("dir/file.txt"), &base).is_err());
/// assert!(resolve_within_base(&utf16("//evil.example/x"), &base).is_err());
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn resolve_within_base(reference: &[u16], base: &[u16]) -> Result<Vec<u16>, Error> {
    let mode = ParseMode::IriStrict;
    let base_dir = directory_path(base, mode)?;
    let r = split_checked(reference, 0..reference.len(), mode).ok_or_else(Error::new)?;
    if has_dot_segment(&reference[r.path]) {
        return Err(Error::new());
    }
    let resolved = resolve(reference, Some(base), mode)?;
    if directory_path(&resolved, mode)? != base_dir {
        return Err(Error::new());
    }
    Ok(resolved.into_owned())
}
