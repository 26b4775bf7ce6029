//! Parsers for `IP-literal` hosts.
//!
//! See [RFC 3986 section 3.2.2] for `IPv6address` and `IPvFuture`, and
//! [RFC 6874] for zone identifiers.
//!
//! [RFC 3986 section 3.2.2]: https://tools.ietf.org/html/rfc3986#section-3.2.2
//! [RFC 6874]: https://tools.ietf.org/html/rfc6874

use crate::parser::chars;
use crate::utf16::{ascii, hex_value, is, is_hex_pair_at};

/// Number of 16-bit groups in an IPv6 address.
const GROUPS: usize = 8;

/// Parses an `IP-literal` starting just after its `[`.
///
/// Returns the index just past the closing `]`, or `None` if the literal is
/// invalid or unterminated before `end`.
#[must_use]
pub(crate) fn parse_ip_literal(s: &[u16], start: usize, end: usize) -> Option<usize> {
    let first = ascii(*s[..end].get(start)?)?;
    match first {
        b'v' | b'V' => parse_ipvfuture(s, start + 1, end),
        b':' => parse_ipv6(s, start, end),
        c if c.is_ascii_hexdigit() => parse_ipv6(s, start, end),
        _ => None,
    }
}

/// Parses the rest of `IPvFuture` after the `v`, and the closing `]`.
fn parse_ipvfuture(s: &[u16], start: usize, end: usize) -> Option<usize> {
    let mut index = start;
    while index < end && hex_value(s[index]).is_some() {
        index += 1;
    }
    if index == start || index >= end || !is(s[index], b'.') {
        return None;
    }
    index += 1;
    let address_start = index;
    while index < end {
        match ascii(s[index]).map(|b| b as char) {
            Some(c) if chars::is_unreserved(c) || chars::is_sub_delim(c) || c == ':' => {
                index += 1
            }
            _ => break,
        }
    }
    if index == address_start || index >= end || !is(s[index], b']') {
        return None;
    }
    Some(index + 1)
}

/// Transient state of an IPv6 address being parsed.
#[derive(Debug, Default, Clone, Copy)]
struct Ipv6Groups {
    /// Groups given so far.
    ///
    /// After [`Ipv6Groups::expand`], these are the eight groups of the address.
    groups: [u16; GROUPS],
    /// Number of groups given explicitly (an IPv4 tail counts as two).
    given: usize,
    /// Group position of the `::` elision, if any.
    elided_at: Option<usize>,
}

impl Ipv6Groups {
    /// Appends a group.
    fn push(&mut self, group: u16) -> Option<()> {
        *self.groups.get_mut(self.given)? = group;
        self.given += 1;
        Some(())
    }

    /// Inserts zero groups at the elision, or checks the group count if
    /// nothing was elided.
    fn expand(&mut self) -> Option<()> {
        match self.elided_at {
            None if self.given == GROUPS => Some(()),
            None => None,
            Some(pos) => {
                let missing = GROUPS.checked_sub(self.given)?;
                if missing == 0 {
                    // `::` must stand for at least one group.
                    return None;
                }
                self.groups.copy_within(pos..self.given, pos + missing);
                self.groups[pos..(pos + missing)].fill(0);
                self.given = GROUPS;
                Some(())
            }
        }
    }

    /// Returns `true` if the address is in `fe80::/10`.
    fn is_link_local(&self) -> bool {
        (self.groups[0] & 0xFFC0) == 0xFE80
    }
}

/// Parses `IPv6address` with an optional zone identifier, and the closing `]`.
fn parse_ipv6(s: &[u16], start: usize, end: usize) -> Option<usize> {
    // Find the candidate span of the address.
    let mut ip_end = start;
    while ip_end < end {
        match ascii(s[ip_end]) {
            Some(b) if b.is_ascii_hexdigit() || b == b':' || b == b'.' => ip_end += 1,
            _ => break,
        }
    }
    if ip_end >= end || !(is(s[ip_end], b']') || is(s[ip_end], b'%')) {
        return None;
    }

    let mut addr = Ipv6Groups::default();
    let mut index = start;
    let mut ipv4_tail = false;
    for part in 0..GROUPS {
        if addr.elided_at.is_none()
            && ip_end - index > 1
            && is(s[index], b':')
            && is(s[index + 1], b':')
        {
            addr.elided_at = Some(part);
            index += 2;
            if index == ip_end {
                break;
            }
        }
        let group_start = index;
        let mut group: u16 = 0;
        while index - group_start < 4 {
            match hex_value(s[index]) {
                Some(v) => {
                    group = (group << 4) | u16::from(v);
                    index += 1;
                }
                None => break,
            }
        }
        if index == group_start {
            return None;
        }
        if index < ip_end && is(s[index], b'.') && part < GROUPS - 1 {
            // The digits read belong to a dotted-decimal IPv4 tail.
            ipv4_tail = true;
            index = group_start;
            break;
        }
        addr.push(group)?;
        if index < ip_end && !is(s[index], b':') {
            return None;
        }
        if index == ip_end && addr.elided_at.is_some() {
            break;
        }
        // Skip a single colon followed by another group. A double colon is
        // left for the next part, and a trailing colon makes the address
        // invalid.
        if index + 1 < ip_end && !is(s[index + 1], b':') {
            index += 1;
        }
    }
    if index != ip_end && !ipv4_tail {
        return None;
    }
    if ipv4_tail {
        let [a, b, c, d] = parse_ipv4_tail(s, index, ip_end)?;
        addr.push(u16::from_be_bytes([a, b]))?;
        addr.push(u16::from_be_bytes([c, d]))?;
        index = ip_end;
    }
    addr.expand()?;

    if is(s[index], b'%') {
        // Zone identifiers are allowed only for link-local addresses.
        if index + 2 < end
            && is(s[index + 1], b'2')
            && is(s[index + 2], b'5')
            && addr.is_link_local()
        {
            return parse_zone_id(s, index + 3, end);
        }
        return None;
    }
    debug_assert!(is(s[index], b']'));
    Some(index + 1)
}

/// Parses the four dotted-decimal octets occupying `s[start..ip_end]`.
fn parse_ipv4_tail(s: &[u16], start: usize, ip_end: usize) -> Option<[u8; 4]> {
    let mut octets = [0_u8; 4];
    let mut index = start;
    for (i, octet) in octets.iter_mut().enumerate() {
        if i > 0 {
            if index < ip_end && is(s[index], b'.') {
                index += 1;
            } else {
                return None;
            }
        }
        let digits_start = index;
        let mut value: u32 = 0;
        while index < ip_end && index - digits_start < 4 {
            match ascii(s[index]).filter(u8::is_ascii_digit) {
                Some(d) => {
                    value = value * 10 + u32::from(d - b'0');
                    index += 1;
                }
                None => break,
            }
        }
        let len = index - digits_start;
        if len == 0 || (len > 1 && is(s[digits_start], b'0')) {
            // Empty octet, or a leading zero.
            return None;
        }
        *octet = u8::try_from(value).ok()?;
    }
    if index != ip_end {
        return None;
    }
    Some(octets)
}

/// Parses a zone identifier after `%25`, and the closing `]`.
fn parse_zone_id(s: &[u16], start: usize, end: usize) -> Option<usize> {
    let mut index = start;
    while index < end {
        let unit = s[index];
        if is(unit, b']') {
            return (index > start).then(|| index + 1);
        }
        if is(unit, b'%') {
            if !is_hex_pair_at(s, index + 1, end) {
                return None;
            }
            index += 3;
            continue;
        }
        match ascii(unit) {
            Some(b) if chars::is_unreserved(b as char) => index += 1,
            _ => return None,
        }
    }
    None
}
