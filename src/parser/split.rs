//! Component splitter.
//!
//! A single left-to-right scan that finds the boundaries of the five
//! components and, in strict modes, validates every character against the
//! class of the component it belongs to.

use core::ops::Range;

use crate::components::Components;
use crate::mode::ParseMode;
use crate::parser::chars;
use crate::parser::ip::parse_ip_literal;
use crate::utf16::{code_point_at, is, is_hex_pair_at};

/// State of the authority scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthorityState {
    /// Possibly in the userinfo, no `@` seen yet.
    UserInfo,
    /// In the host.
    Host,
    /// In the port, after the `:`.
    Port,
}

/// State of the path, query and fragment scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TailState {
    /// In the path.
    Path,
    /// In the query, after the `?`.
    Query,
    /// In the fragment, after the `#`.
    Fragment,
}

/// Returns `true` if the unit ends an authority.
#[inline]
fn is_authority_terminator(unit: u16) -> bool {
    is(unit, b'/') || is(unit, b'?') || is(unit, b'#')
}

/// Scanner over `s[..end]`.
struct Scanner<'a> {
    /// Whole input.
    s: &'a [u16],
    /// End of the portion being split.
    end: usize,
    /// Parse mode.
    mode: ParseMode,
}

impl Scanner<'_> {
    /// Reads the character at `index` according to the parse mode.
    ///
    /// Returns the character and its length in code units, or `None` if the
    /// mode rejects it regardless of the component.
    #[inline]
    fn char_at(&self, index: usize) -> Option<(char, usize)> {
        if self.mode.is_ascii_only() && self.s[index] >= 0x80 {
            return None;
        }
        let (decoded, len) = code_point_at(self.s, index, self.end);
        let c = self.mode.surrogate_policy().apply(decoded)?;
        Some((c, len))
    }

    /// Returns the length of the percent-encoded triplet at `index` if
    /// percent-encoding is checked in this mode.
    ///
    /// Returns `Some(None)` if the character is not `%` or the mode is
    /// lenient, and `None` for a malformed triplet.
    #[inline]
    fn pct_triplet_at(&self, index: usize, c: char) -> Option<Option<usize>> {
        if c != '%' || !self.mode.is_strict() {
            return Some(None);
        }
        if is_hex_pair_at(self.s, index + 1, self.end) {
            Some(Some(3))
        } else {
            None
        }
    }

    /// Scans the scheme and its colon.
    ///
    /// Returns the range of the scheme if present.
    fn scheme(&self, start: usize) -> Option<Option<Range<usize>>> {
        let strict = self.mode.is_strict();
        let mut index = start;
        while index < self.end {
            let (c, len) = self.char_at(index)?;
            if index > start && c == ':' {
                return Some(Some(start..index));
            }
            let continues = match (strict, index == start) {
                (true, true) => c.is_ascii_alphabetic(),
                (true, false) => {
                    c.is_ascii() && chars::is_ascii_scheme_continue(c as u8)
                }
                (false, _) => !matches!(c, '#' | ':' | '?' | '/'),
            };
            if !continues {
                break;
            }
            index += len;
        }
        Some(None)
    }

    /// Scans the authority starting just after `//`.
    ///
    /// Returns the end of the authority.
    fn authority(&self, start: usize) -> Option<usize> {
        let strict = self.mode.is_strict();
        let mut state = AuthorityState::UserInfo;
        let mut host_start = start;
        let mut index = start;
        loop {
            if index >= self.end {
                if state == AuthorityState::UserInfo {
                    // No `@` at all: the whole authority is host and port.
                    state = AuthorityState::Host;
                    index = start;
                    continue;
                }
                return Some(self.end);
            }
            let (c, len) = self.char_at(index)?;
            if state != AuthorityState::Port {
                if let Some(triplet_len) = self.pct_triplet_at(index, c)? {
                    index += triplet_len;
                    continue;
                }
            }
            match state {
                AuthorityState::UserInfo => {
                    if strict && c == '@' {
                        index += len;
                        host_start = index;
                        state = AuthorityState::Host;
                    } else if strict && chars::is_iuserinfo_char(c) {
                        index += len;
                    } else {
                        // Not a userinfo: rescan the authority as a host.
                        state = AuthorityState::Host;
                        index = start;
                    }
                }
                AuthorityState::Host => {
                    if is_authority_terminator(self.s[index]) {
                        return Some(index);
                    }
                    if !strict || chars::is_ireg_name_char(c) {
                        index += len;
                    } else if c == '[' && index == host_start {
                        index = parse_ip_literal(self.s, index + 1, self.end)?;
                        match self.s[..self.end].get(index).copied() {
                            None => {}
                            Some(next) if is(next, b':') || is_authority_terminator(next) => {}
                            Some(_) => return None,
                        }
                    } else if c == ':' {
                        index += len;
                        state = AuthorityState::Port;
                    } else {
                        return None;
                    }
                }
                AuthorityState::Port => {
                    if is_authority_terminator(self.s[index]) {
                        return Some(index);
                    }
                    if c.is_ascii_digit() {
                        index += len;
                    } else {
                        return None;
                    }
                }
            }
        }
    }

    /// Scans the path, the query, and the fragment, and fills them in.
    ///
    /// `fully_relative` is whether neither a scheme nor an authority precedes
    /// the path.
    fn path_query_fragment(
        &self,
        start: usize,
        fully_relative: bool,
        components: &mut Components,
    ) -> Option<()> {
        let strict = self.mode.is_strict();
        let mut state = TailState::Path;
        // A colon seen in the first segment of a relative-path reference.
        let mut colon = false;
        // Whether the first segment has ended.
        let mut segment = false;
        components.path = start..self.end;

        let mut index = start;
        while index < self.end {
            let (c, len) = self.char_at(index)?;
            if let Some(triplet_len) = self.pct_triplet_at(index, c)? {
                index += triplet_len;
                continue;
            }
            match state {
                TailState::Path => {
                    if fully_relative && !segment {
                        if c == ':' {
                            colon = true;
                        } else if c == '/' {
                            if strict && colon {
                                return None;
                            }
                            segment = true;
                        }
                    }
                    if c == '?' {
                        components.path.end = index;
                        components.query = Some((index + 1)..self.end);
                        state = TailState::Query;
                    } else if c == '#' {
                        components.path.end = index;
                        components.fragment = Some((index + 1)..self.end);
                        state = TailState::Fragment;
                    } else if strict && !chars::is_ipchar(c) {
                        return None;
                    }
                }
                TailState::Query => {
                    if c == '#' {
                        if let Some(query) = &mut components.query {
                            query.end = index;
                        }
                        components.fragment = Some((index + 1)..self.end);
                        state = TailState::Fragment;
                    } else if strict && !chars::is_iquery_char(c) {
                        return None;
                    }
                }
                TailState::Fragment => {
                    if strict && !chars::is_ifragment_char(c) {
                        return None;
                    }
                }
            }
            index += len;
        }
        if strict && fully_relative && colon && !segment {
            // Such as `x@y:z`: the first segment would be taken as a scheme.
            return None;
        }
        Some(())
    }
}

/// Splits `s[range]` into components.
///
/// Returns `None` if the portion is not valid in the given mode.
///
/// # Precondition
///
/// `range.start <= range.end <= s.len()` must hold.
#[must_use]
pub(crate) fn split_checked(s: &[u16], range: Range<usize>, mode: ParseMode) -> Option<Components> {
    debug_assert!(range.start <= range.end && range.end <= s.len());
    let mut components = Components::empty_at(range.start);
    if range.is_empty() {
        return Some(components);
    }
    let scanner = Scanner {
        s,
        end: range.end,
        mode,
    };

    let offset = range.start;
    let mut index = offset;
    if let Some(scheme) = scanner.scheme(offset)? {
        index = scheme.end + 1;
        components.scheme = Some(scheme);
    }

    if index + 2 <= range.end && is(s[index], b'/') && is(s[index + 1], b'/') {
        let authority_start = index + 2;
        let authority_end = scanner.authority(authority_start)?;
        components.authority = Some(authority_start..authority_end);
        index = authority_end;
    }

    let fully_relative = index == offset;
    scanner.path_query_fragment(index, fully_relative, &mut components)?;
    Some(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "alloc")]
    use alloc::vec::Vec;

    #[cfg(feature = "alloc")]
    fn split_str(s: &str, mode: ParseMode) -> Option<Components> {
        let s: Vec<u16> = s.encode_utf16().collect();
        split_checked(&s, 0..s.len(), mode)
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn full() {
        let c = split_str("s://u@h:1/p?q#f", ParseMode::IriStrict).expect("valid");
        assert_eq!(c.scheme, Some(0..1));
        assert_eq!(c.authority, Some(4..9));
        assert_eq!(c.path, 9..11);
        assert_eq!(c.query, Some(12..13));
        assert_eq!(c.fragment, Some(14..15));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn no_scheme_restarts() {
        let c = split_str("a_b:c/d", ParseMode::IriStrict);
        // `_` is not a scheme character, so `a_b:c` is the first segment.
        assert!(c.is_none());
        let c = split_str("a_b/c:d", ParseMode::IriStrict).expect("valid");
        assert_eq!(c.scheme, None);
        assert_eq!(c.path, 0..7);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn userinfo_rewind() {
        let c = split_str("//a:b", ParseMode::IriStrict);
        assert!(c.is_none(), "port `b` is not numeric");
        let c = split_str("//a:%30", ParseMode::IriStrict);
        assert!(c.is_none(), "port must not be percent-encoded");
        let c = split_str("//a:1", ParseMode::IriStrict).expect("valid");
        assert_eq!(c.authority, Some(2..5));
        let c = split_str("//a:b@c:1?x", ParseMode::IriStrict).expect("valid");
        assert_eq!(c.authority, Some(2..9));
        assert_eq!(c.query, Some(10..11));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn ip_literal_must_be_whole_host() {
        assert!(split_str("//[::1]", ParseMode::IriStrict).is_some());
        assert!(split_str("//u@[::1]:80/", ParseMode::IriStrict).is_some());
        assert!(split_str("//a[::1]", ParseMode::IriStrict).is_none());
        assert!(split_str("//[::1]a", ParseMode::IriStrict).is_none());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn lenient_delimiters_only() {
        let c = split_str("a b://x y/<p>?{q}#|f|", ParseMode::IriLenient).expect("lenient");
        assert_eq!(c.scheme, Some(0..3));
        assert_eq!(c.authority, Some(6..9));
        assert_eq!(c.path, 9..13);
        assert!(split_str("a b://x y/<p>", ParseMode::IriStrict).is_none());
        assert!(split_str("x/\u{E9}", ParseMode::UriLenient).is_none());
    }

    #[test]
    fn surrogates() {
        let s = [u16::from(b'a'), 0xD800, u16::from(b'b')];
        assert!(split_checked(&s, 0..3, ParseMode::IriStrict).is_none());
        assert!(split_checked(&s, 0..3, ParseMode::IriLenient).is_none());
        let c = split_checked(&s, 0..3, ParseMode::IriSurrogateLenient).expect("replaced");
        assert_eq!(c.path, 0..3);
        // A well-formed pair is a single `ipchar`.
        let s = [u16::from(b'/'), 0xD800, 0xDF00];
        assert!(split_checked(&s, 0..3, ParseMode::IriStrict).is_some());
        assert!(split_checked(&s, 0..3, ParseMode::UriStrict).is_none());
    }

    #[test]
    fn empty_at_offset() {
        let s = [u16::from(b'a'); 4];
        let c = split_checked(&s, 2..2, ParseMode::IriStrict).expect("empty is valid");
        assert_eq!(c.path, 2..2);
        assert_eq!(c.scheme, None);
    }
}
