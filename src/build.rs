//! IRI builder.

use alloc::vec::Vec;

use crate::mode::ParseMode;
use crate::parser::split::split_checked;
use crate::percent_encode::encode_component;
use crate::validate::Error;

/// Builds an IRI from a scheme and authority prefix, a path, a query, and a
/// fragment.
///
/// `scheme_and_authority` is such as `http://example.com` or `urn:`. It is
/// copied as is, and must be a valid IRI with a scheme or an authority (or
/// both), an empty path, no query and no fragment. `None` and the empty
/// slice both mean no prefix.
///
/// The path, the query, and the fragment are percent-encoded: unreserved
/// characters and `/(=):!$&'*+,;@` are kept, as are existing
/// percent-encoded triplets, and everything else (including `?` and `#`) is
/// encoded. A `%` that does not start a triplet becomes `%25`. `None` for the
/// query or the fragment omits the component with its delimiter, while an
/// empty slice gives an empty component.
///
/// # Errors
///
/// Returns an error if the prefix is invalid, or if the result would not
/// split back into the given components. For example, a relative path
/// whose first segment has a colon would be read as a scheme, and a
/// non-empty path that does not start with `/` cannot follow an authority.
///
/// # Examples
///
/// ```
/// use uri_utility::build::build_iri;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// let iri = build_iri(
///     Some(&utf16("http://example.com")),
///     Some(&utf16("/a b/c%41")),
///     Some(&utf16("x=y?z")),
///     None,
/// )?;
/// assert_eq!(iri, utf16("http://example.com/a%20b/c%41?x=y%3Fz"));
///
/// assert!(build_iri(Some(&utf16("http://example.com/p")), None, None, None).is_err());
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn build_iri(
    scheme_and_authority: Option<&[u16]>,
    path: Option<&[u16]>,
    query: Option<&[u16]>,
    fragment: Option<&[u16]>,
) -> Result<Vec<u16>, Error> {
    let prefix = scheme_and_authority.unwrap_or(&[]);
    if !prefix.is_empty() {
        let c = split_checked(prefix, 0..prefix.len(), ParseMode::IriStrict)
            .ok_or_else(Error::new)?;
        let has_origin = !c.prefix_range().is_empty();
        if !has_origin || !c.is_path_empty() || c.query.is_some() || c.fragment.is_some() {
            return Err(Error::new());
        }
    }

    let mut buf = Vec::with_capacity(prefix.len() + path.map_or(0, <[u16]>::len));
    buf.extend_from_slice(prefix);
    let path_start = buf.len();
    encode_component(&mut buf, path.unwrap_or(&[]));
    let path_end = buf.len();
    if let Some(query) = query {
        buf.push(u16::from(b'?'));
        encode_component(&mut buf, query);
    }
    if let Some(fragment) = fragment {
        buf.push(u16::from(b'#'));
        encode_component(&mut buf, fragment);
    }

    let c = split_checked(&buf, 0..buf.len(), ParseMode::IriStrict).ok_or_else(Error::new)?;
    if c.path != (path_start..path_end) || c.query.is_some() != query.is_some() {
        return Err(Error::new());
    }
    Ok(buf)
}
