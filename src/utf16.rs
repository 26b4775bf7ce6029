//! UTF-16 code unit walking.

/// Replacement character used for unpaired surrogates.
pub(crate) const REPLACEMENT: char = '\u{FFFD}';

/// How to handle an unpaired surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SurrogatePolicy {
    /// Treat the text as invalid.
    Reject,
    /// Treat the unit as U+FFFD.
    Replace,
}

impl SurrogatePolicy {
    /// Applies the policy to a decoded code point.
    ///
    /// Returns `None` if the code point is an unpaired surrogate that must be
    /// rejected.
    #[inline]
    #[must_use]
    pub(crate) fn apply(self, decoded: Result<char, u16>) -> Option<char> {
        match (decoded, self) {
            (Ok(c), _) => Some(c),
            (Err(_), Self::Replace) => Some(REPLACEMENT),
            (Err(_), Self::Reject) => None,
        }
    }
}

/// Returns `true` if the unit is a high or a low surrogate.
#[inline]
#[must_use]
pub(crate) fn is_surrogate(unit: u16) -> bool {
    (unit & 0xF800) == 0xD800
}

/// Decodes the code point starting at `index`, not looking at or past `end`.
///
/// Returns the code point (or the unpaired surrogate unit as an error) and
/// the number of units consumed, which is 2 for a surrogate pair and 1
/// otherwise.
///
/// # Precondition
///
/// `index < end <= s.len()` must hold.
#[must_use]
pub(crate) fn code_point_at(s: &[u16], index: usize, end: usize) -> (Result<char, u16>, usize) {
    debug_assert!(index < end && end <= s.len());
    let unit = s[index];
    if !is_surrogate(unit) {
        // Not a surrogate, so this is always a valid scalar value.
        return (char::from_u32(u32::from(unit)).ok_or(unit), 1);
    }
    if (unit & 0xFC00) == 0xD800 && index + 1 < end && (s[index + 1] & 0xFC00) == 0xDC00 {
        let high = u32::from(unit & 0x3FF);
        let low = u32::from(s[index + 1] & 0x3FF);
        let value = 0x1_0000 + (high << 10) + low;
        return (char::from_u32(value).ok_or(unit), 2);
    }
    (Err(unit), 1)
}

/// Returns the ASCII byte if the unit is in the ASCII range.
#[inline]
#[must_use]
pub(crate) fn ascii(unit: u16) -> Option<u8> {
    u8::try_from(unit).ok().filter(u8::is_ascii)
}

/// Returns `true` if the unit is the given ASCII character.
#[inline]
#[must_use]
pub(crate) fn is(unit: u16, c: u8) -> bool {
    unit == u16::from(c)
}

/// Returns the value of the unit as a hexadecimal digit.
#[inline]
#[must_use]
pub(crate) fn hex_value(unit: u16) -> Option<u8> {
    ascii(unit).and_then(|b| (b as char).to_digit(16)).map(|v| v as u8)
}

/// Returns `true` if `s[index]` and `s[index + 1]` are both before `end` and
/// are hexadecimal digits.
#[inline]
#[must_use]
pub(crate) fn is_hex_pair_at(s: &[u16], index: usize, end: usize) -> bool {
    index + 1 < end && hex_value(s[index]).is_some() && hex_value(s[index + 1]).is_some()
}

/// Appends the character as UTF-16.
#[cfg(feature = "alloc")]
#[inline]
pub(crate) fn push_char(buf: &mut alloc::vec::Vec<u16>, c: char) {
    let mut units = [0_u16; 2];
    buf.extend_from_slice(c.encode_utf16(&mut units));
}
