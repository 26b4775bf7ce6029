//! Helpers for characters.
//!
//! None of the predicates accept `%`, since percent-encoded triplets are
//! validated separately by the scanners.

/// Checks if the given character matches `unreserved` rule.
#[inline]
#[must_use]
pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Checks if the given character matches `sub-delim` rule.
#[inline]
#[must_use]
pub(crate) fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

/// Checks if the given character is allowed in a scheme after the first one.
#[inline]
#[must_use]
pub(crate) fn is_ascii_scheme_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.')
}

/// Checks if the given character matches `ucschar` rule, except that
/// noncharacters at the end of each plane are excluded.
fn is_ucschar(c: char) -> bool {
    let c = u32::from(c);
    match c {
        0xA0..=0xD7FF | 0xF900..=0xFDCF | 0xFDF0..=0xFFEF | 0xE_1000..=0xE_FFFD => true,
        0x1_0000..=0xD_FFFD => (c & 0xFFFE) != 0xFFFE,
        _ => false,
    }
}

/// Checks if the given character matches `ucschar` or `iprivate` rule, which
/// is the non-ASCII repertoire of `iquery`.
fn is_ucschar_or_private(c: char) -> bool {
    let c = u32::from(c);
    match c {
        0xA0..=0xD7FF | 0xE000..=0xFDCF | 0xFDF0..=0xFFEF => true,
        0xE_0000..=0xE_0FFF => false,
        0x1_0000..=0x10_FFFD => (c & 0xFFFE) != 0xFFFE,
        _ => false,
    }
}

/// Checks if the given character is allowed in a path (`ipchar` or `/`).
#[must_use]
pub(crate) fn is_ipchar(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, '/' | ':' | '@') || is_ucschar(c)
}

/// Checks if the given character matches `iquery` rule.
#[must_use]
pub(crate) fn is_iquery_char(c: char) -> bool {
    is_unreserved(c)
        || is_sub_delim(c)
        || matches!(c, '/' | '?' | ':' | '@')
        || is_ucschar_or_private(c)
}

/// Checks if the given character matches `ifragment` rule.
#[must_use]
pub(crate) fn is_ifragment_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, '/' | '?' | ':' | '@') || is_ucschar(c)
}

/// Checks if the given character matches `ireg-name` rule.
#[must_use]
pub(crate) fn is_ireg_name_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || is_ucschar(c)
}

/// Checks if the given character matches `iuserinfo` rule.
#[must_use]
pub(crate) fn is_iuserinfo_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == ':' || is_ucschar(c)
}
