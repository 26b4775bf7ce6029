//! Percent-decoding.
//!
//! Percent-encoded octets are decoded as UTF-8. Ill-formed UTF-8 (overlong
//! forms, encoded surrogates, code points above U+10FFFF, truncated
//! sequences) is either rejected or replaced with U+FFFD, as the caller
//! chooses with [`OnInvalid`].

use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utf16::{code_point_at, hex_value, is, is_surrogate, push_char, REPLACEMENT};
use crate::validate::Error;

/// What to do with ill-formed input while decoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OnInvalid {
    /// Fail the whole decoding.
    Fail,
    /// Replace the ill-formed part with U+FFFD and continue.
    ///
    /// A `%` that is not followed by two hexadecimal digits is kept as is.
    #[default]
    Substitute,
}

/// Result of feeding an octet to [`Utf8Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fed {
    /// More octets are needed.
    Pending,
    /// A character is complete.
    Char(char),
    /// The octet cannot start a sequence.
    InvalidLead,
    /// The octet cannot continue the pending sequence.
    ///
    /// The pending sequence is dropped and the octet should be fed again as
    /// the start of a new sequence.
    InvalidContinuation,
}

/// UTF-8 sequence being reassembled from percent-encoded octets.
#[derive(Debug, Clone, Copy)]
struct Utf8Sequence {
    /// Code point bits accumulated so far.
    code_point: u32,
    /// Number of continuation octets still needed.
    remaining: u8,
    /// Smallest acceptable value of the next continuation octet.
    lower: u8,
    /// Largest acceptable value of the next continuation octet.
    upper: u8,
}

impl Default for Utf8Sequence {
    #[inline]
    fn default() -> Self {
        Self {
            code_point: 0,
            remaining: 0,
            lower: 0x80,
            upper: 0xBF,
        }
    }
}

impl Utf8Sequence {
    /// Returns `true` if a sequence is started and not yet complete.
    #[inline]
    fn is_pending(&self) -> bool {
        self.remaining != 0
    }

    /// Drops the pending sequence.
    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feeds an octet.
    fn feed(&mut self, octet: u8) -> Fed {
        if !self.is_pending() {
            let (remaining, bits) = match octet {
                0x00..=0x7F => return Fed::Char(char::from(octet)),
                0xC2..=0xDF => (1, octet & 0x1F),
                0xE0..=0xEF => {
                    // Exclude overlong forms and surrogates.
                    match octet {
                        0xE0 => self.lower = 0xA0,
                        0xED => self.upper = 0x9F,
                        _ => {}
                    }
                    (2, octet & 0x0F)
                }
                0xF0..=0xF4 => {
                    // Exclude overlong forms and code points above U+10FFFF.
                    match octet {
                        0xF0 => self.lower = 0x90,
                        0xF4 => self.upper = 0x8F,
                        _ => {}
                    }
                    (3, octet & 0x07)
                }
                _ => return Fed::InvalidLead,
            };
            self.remaining = remaining;
            self.code_point = u32::from(bits);
            return Fed::Pending;
        }

        if !(self.lower..=self.upper).contains(&octet) {
            self.reset();
            return Fed::InvalidContinuation;
        }
        self.code_point = (self.code_point << 6) | u32::from(octet & 0x3F);
        self.lower = 0x80;
        self.upper = 0xBF;
        self.remaining -= 1;
        if self.is_pending() {
            return Fed::Pending;
        }
        let code_point = self.code_point;
        self.reset();
        char::from_u32(code_point).map_or(Fed::InvalidLead, Fed::Char)
    }
}

/// Output buffer that applies the [`OnInvalid`] policy.
struct Decoded {
    /// Decoded text.
    buf: Vec<u16>,
    /// Policy.
    on_invalid: OnInvalid,
}

impl Decoded {
    /// Records ill-formed input.
    #[inline]
    fn invalid(&mut self) -> Result<(), Error> {
        match self.on_invalid {
            OnInvalid::Fail => Err(Error::new()),
            OnInvalid::Substitute => {
                push_char(&mut self.buf, REPLACEMENT);
                Ok(())
            }
        }
    }
}

/// Percent-decodes the whole text.
///
/// Returns the input as is (borrowed) if it contains neither `%` nor any
/// surrogate code unit.
///
/// # Errors
///
/// With [`OnInvalid::Fail`], returns an error if the text has an unpaired
/// surrogate, a `%` not followed by two hexadecimal digits, or an octet
/// sequence that is not well-formed UTF-8.
///
/// # Examples
///
/// ```
/// use uri_utility::percent_decode::{percent_decode, OnInvalid};
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// let input = utf16("te%23t");
/// let decoded = percent_decode(&input, OnInvalid::Fail)?;
/// assert_eq!(decoded, utf16("te#t"));
///
/// let input = utf16("te%c2%40t");
/// let decoded = percent_decode(&input, OnInvalid::Substitute)?;
/// assert_eq!(decoded, utf16("te\u{FFFD}@t"));
/// assert!(percent_decode(&utf16("te%c2%40t"), OnInvalid::Fail).is_err());
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn percent_decode(s: &[u16], on_invalid: OnInvalid) -> Result<Cow<'_, [u16]>, Error> {
    decode(s, on_invalid)
}

/// Percent-decodes `s[start..end]`.
///
/// # Errors
///
/// Returns an error of kind
/// [`OutOfRange`][`crate::validate::ErrorKind::OutOfRange`] if the range is
/// not inside the text, and otherwise fails as [`percent_decode`] does.
pub fn percent_decode_range(
    s: &[u16],
    start: usize,
    end: usize,
    on_invalid: OnInvalid,
) -> Result<Cow<'_, [u16]>, Error> {
    if start > end || end > s.len() {
        return Err(Error::out_of_range());
    }
    decode(&s[start..end], on_invalid)
}

/// Decodes the slice.
fn decode(s: &[u16], on_invalid: OnInvalid) -> Result<Cow<'_, [u16]>, Error> {
    if !s.iter().any(|&unit| is(unit, b'%') || is_surrogate(unit)) {
        return Ok(Cow::Borrowed(s));
    }

    let end = s.len();
    let mut out = Decoded {
        buf: Vec::with_capacity(end),
        on_invalid,
    };
    let mut seq = Utf8Sequence::default();
    let mut index = 0;
    while index < end {
        if is(s[index], b'%') {
            if let (Some(hi), Some(lo)) = (
                s.get(index + 1).copied().and_then(hex_value),
                s.get(index + 2).copied().and_then(hex_value),
            ) {
                match seq.feed((hi << 4) | lo) {
                    Fed::Pending => {}
                    Fed::Char(c) => push_char(&mut out.buf, c),
                    Fed::InvalidLead => out.invalid()?,
                    Fed::InvalidContinuation => {
                        // Decode the same octet again as a new lead.
                        out.invalid()?;
                        continue;
                    }
                }
                index += 3;
                continue;
            }
            // A `%` not starting a triplet.
            if seq.is_pending() {
                seq.reset();
                out.invalid()?;
            }
            if on_invalid == OnInvalid::Fail {
                return Err(Error::new());
            }
            out.buf.push(s[index]);
            index += 1;
            continue;
        }

        if seq.is_pending() {
            seq.reset();
            out.invalid()?;
        }
        let (decoded, len) = code_point_at(s, index, end);
        match decoded {
            Ok(c) => push_char(&mut out.buf, c),
            Err(_) => out.invalid()?,
        }
        index += len;
    }
    if seq.is_pending() {
        out.invalid()?;
    }
    Ok(Cow::Owned(out.buf))
}
