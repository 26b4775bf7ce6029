//! Percent encoding.
//!
//! Every function here encodes a character as the percent-encoded octets of
//! its UTF-8 form, with upper case hexadecimal digits. Unpaired surrogates
//! are encoded as U+FFFD.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mode::ParseMode;
use crate::parser::chars::is_unreserved;
use crate::parser::split::split_checked;
use crate::utf16::{code_point_at, is_hex_pair_at, REPLACEMENT};
use crate::validate::Error;

/// Upper case hexadecimal digits.
const HEXDIGITS: [u8; 16] = *b"0123456789ABCDEF";

/// Characters that [`escape`] leaves as is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EscapeCharset {
    /// Encode characters that can never appear raw in an IRI.
    ///
    /// These are controls, the space, U+007F and above, and the ASCII
    /// characters `{`, `}`, `|`, `^`, `\`, `` ` ``, `<`, `>`, and `"`.
    #[default]
    Unsafe,
    /// Encode non-ASCII characters only.
    ///
    /// This converts an IRI into a URI.
    NonAscii,
}

/// Options for [`escape`].
///
/// Independently of the options, `[` and `]` are left as is inside the
/// authority and encoded everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EscapeOptions {
    /// Characters to encode.
    charset: EscapeCharset,
    /// Whether to encode a `%` that does not start a percent-encoded triplet.
    repair_percent: bool,
    /// Mode used to locate the authority.
    validation: ParseMode,
}

impl Default for EscapeOptions {
    #[inline]
    fn default() -> Self {
        Self::new(EscapeCharset::default())
    }
}

impl EscapeOptions {
    /// Creates options encoding the given characters.
    ///
    /// Percent signs are kept as is, and the input is split in
    /// [`IriSurrogateLenient`][`ParseMode::IriSurrogateLenient`] mode so
    /// escaping never fails.
    #[inline]
    #[must_use]
    pub fn new(charset: EscapeCharset) -> Self {
        Self {
            charset,
            repair_percent: false,
            validation: ParseMode::IriSurrogateLenient,
        }
    }

    /// Sets whether a `%` not followed by two hexadecimal digits is encoded
    /// as `%25`.
    #[inline]
    #[must_use]
    pub fn repair_percent(mut self, repair: bool) -> Self {
        self.repair_percent = repair;
        self
    }

    /// Sets the mode the input is split in before escaping.
    ///
    /// With a strict mode, escaping fails for input that is not valid in the
    /// mode.
    #[inline]
    #[must_use]
    pub fn validation(mut self, mode: ParseMode) -> Self {
        self.validation = mode;
        self
    }

    /// Returns the options corresponding to the numbered escape modes.
    ///
    /// * `0`: [`EscapeCharset::Unsafe`].
    /// * `1`: [`EscapeCharset::NonAscii`], failing for input that is not a
    ///   valid IRI.
    /// * `2`: [`EscapeCharset::NonAscii`].
    /// * `3`: [`EscapeCharset::Unsafe`], also repairing percent signs.
    ///
    /// Returns `None` for any other number.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_utility::mode::ParseMode;
    /// use uri_utility::percent_encode::{EscapeCharset, EscapeOptions};
    ///
    /// assert_eq!(
    ///     EscapeOptions::from_legacy_mode(1),
    ///     Some(EscapeOptions::new(EscapeCharset::NonAscii).validation(ParseMode::IriStrict))
    /// );
    /// assert_eq!(EscapeOptions::from_legacy_mode(4), None);
    /// ```
    #[must_use]
    pub fn from_legacy_mode(mode: u8) -> Option<Self> {
        let options = match mode {
            0 => Self::new(EscapeCharset::Unsafe),
            1 => Self::new(EscapeCharset::NonAscii).validation(ParseMode::IriStrict),
            2 => Self::new(EscapeCharset::NonAscii),
            3 => Self::new(EscapeCharset::Unsafe).repair_percent(true),
            _ => return None,
        };
        Some(options)
    }

    /// Returns `true` if the character is encoded with these options.
    fn encodes(&self, c: char) -> bool {
        match self.charset {
            EscapeCharset::Unsafe => {
                c <= ' '
                    || c >= '\u{7F}'
                    || matches!(c, '{' | '}' | '|' | '^' | '\\' | '`' | '<' | '>' | '"')
            }
            EscapeCharset::NonAscii => !c.is_ascii(),
        }
    }
}

/// Percent-encodes the characters of the text that the options select.
///
/// Escaping is idempotent: escaping the result again with the same options
/// returns the same result.
///
/// # Errors
///
/// Returns an error if the options request a strict validation mode and the
/// text is not valid in it.
///
/// # Examples
///
/// ```
/// use uri_utility::percent_encode::{escape, EscapeCharset, EscapeOptions};
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// let options = EscapeOptions::new(EscapeCharset::Unsafe);
/// let escaped = escape(&utf16("http://[::1]/a b/[\u{e9}]"), options)?;
/// assert_eq!(escaped, utf16("http://[::1]/a%20b/%5B%C3%A9%5D"));
/// # Ok::<_, uri_utility::validate::Error>(())
/// ```
pub fn escape(s: &[u16], options: EscapeOptions) -> Result<Vec<u16>, Error> {
    let authority = match split_checked(s, 0..s.len(), options.validation) {
        Some(components) => components.authority,
        None if options.validation.is_strict() => return Err(Error::new()),
        None => None,
    };
    let in_authority = |index: usize| authority.as_ref().map_or(false, |r| r.contains(&index));

    let mut buf = Vec::with_capacity(s.len());
    let mut index = 0;
    while index < s.len() {
        let (c, len) = scalar_at(s, index);
        if c == '%' && options.repair_percent && !is_hex_pair_at(s, index + 1, s.len()) {
            push_pct_encoded_char(&mut buf, c);
        } else if options.encodes(c) || (matches!(c, '[' | ']') && !in_authority(index)) {
            push_pct_encoded_char(&mut buf, c);
        } else {
            buf.extend_from_slice(&s[index..(index + len)]);
        }
        index += len;
    }
    Ok(buf)
}

/// Percent-encodes everything except ASCII letters, digits, `-`, `_`, `.`
/// and `~`.
///
/// The result can be used as any component of an IRI.
///
/// # Examples
///
/// ```
/// use uri_utility::percent_encode::encode_string_for_uri;
///
/// let utf16 = |s: &str| s.encode_utf16().collect::<Vec<u16>>();
/// assert_eq!(encode_string_for_uri(&utf16("a/b c~%")), utf16("a%2Fb%20c~%25"));
/// ```
#[must_use]
pub fn encode_string_for_uri(s: &[u16]) -> Vec<u16> {
    let mut buf = Vec::with_capacity(s.len());
    let mut index = 0;
    while index < s.len() {
        let (c, len) = scalar_at(s, index);
        if is_unreserved(c) {
            buf.extend_from_slice(&s[index..(index + len)]);
        } else {
            push_pct_encoded_char(&mut buf, c);
        }
        index += len;
    }
    buf
}

/// Percent-encodes a path, a query or a fragment given to the IRI builder.
///
/// Unreserved characters, `/`, `(`, `=`, `)`, `:`, `!`, `$`, `&`, `'`, `*`,
/// `+`, `,`, `;` and `@` are kept, as are percent-encoded triplets. Any other
/// `%` becomes `%25`.
pub(crate) fn encode_component(buf: &mut Vec<u16>, s: &[u16]) {
    let mut index = 0;
    while index < s.len() {
        let (c, len) = scalar_at(s, index);
        let keep = match c {
            '%' => is_hex_pair_at(s, index + 1, s.len()),
            '/' | '(' | '=' | ')' | ':' | '!' | '$' | '&' | '\'' | '*' | '+' | ',' | ';' | '@' => {
                true
            }
            c => is_unreserved(c),
        };
        if keep {
            buf.extend_from_slice(&s[index..(index + len)]);
        } else {
            push_pct_encoded_char(buf, c);
        }
        index += len;
    }
}

/// Returns the scalar value at `index`, with an unpaired surrogate read as
/// U+FFFD, and its length in code units.
#[inline]
fn scalar_at(s: &[u16], index: usize) -> (char, usize) {
    let (decoded, len) = code_point_at(s, index, s.len());
    (decoded.unwrap_or(REPLACEMENT), len)
}

/// Appends the percent-encoded UTF-8 octets of the character.
fn push_pct_encoded_char(buf: &mut Vec<u16>, c: char) {
    let mut octets = [0_u8; 4];
    for &octet in c.encode_utf8(&mut octets).as_bytes() {
        buf.push(u16::from(b'%'));
        buf.push(u16::from(HEXDIGITS[usize::from(octet >> 4)]));
        buf.push(u16::from(HEXDIGITS[usize::from(octet & 0xF)]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn escape_str(s: &str, mode: u8) -> Option<alloc::string::String> {
        let options = EscapeOptions::from_legacy_mode(mode).expect("known mode");
        escape(&utf16(s), options)
            .ok()
            .map(|escaped| {
                alloc::string::String::from_utf16(&escaped).expect("escaped text is UTF-16")
            })
    }

    /// Checks that escaping twice gives the same result as escaping once, in
    /// every mode.
    fn assert_idempotent(s: &[u16]) {
        for mode in 0..=3 {
            let options = EscapeOptions::from_legacy_mode(mode).expect("known mode");
            if let Ok(once) = escape(s, options) {
                let twice = escape(&once, options).expect("escaped text is valid");
                assert_eq!(once, twice, "mode {}, input {:?}", mode, s);
            }
        }
    }

    #[test]
    fn unsafe_charset() {
        assert_eq!(
            escape_str("a b\"c{}|^\\`<>", 0).as_deref(),
            Some("a%20b%22c%7B%7D%7C%5E%5C%60%3C%3E")
        );
        assert_eq!(
            escape_str("\u{7F}\u{e9}\u{10300}", 0).as_deref(),
            Some("%7F%C3%A9%F0%90%8C%80")
        );
        assert_eq!(escape_str("a%zz%41", 0).as_deref(), Some("a%zz%41"));
        assert_eq!(escape_str("a%zz%41%", 3).as_deref(), Some("a%25zz%41%25"));
    }

    #[test]
    fn non_ascii_charset() {
        assert_eq!(escape_str("a b/\u{e9}", 2).as_deref(), Some("a b/%C3%A9"));
        assert_eq!(escape_str("a/\u{e9}", 1).as_deref(), Some("a/%C3%A9"));
        // Invalid IRIs fail only in the validating mode.
        assert_eq!(escape_str("a b", 1), None);
    }

    #[test]
    fn brackets() {
        assert_eq!(
            escape_str("s://[::1]/[x]", 0).as_deref(),
            Some("s://[::1]/%5Bx%5D")
        );
        assert_eq!(
            escape_str("s://[::1]/?[x]", 2).as_deref(),
            Some("s://[::1]/?%5Bx%5D")
        );
        assert_eq!(escape_str("[x]", 0).as_deref(), Some("%5Bx%5D"));
    }

    #[test]
    fn unpaired_surrogates() {
        let s = [u16::from(b'a'), 0xD800, u16::from(b'b')];
        let escaped = escape(&s, EscapeOptions::default()).expect("lenient");
        assert_eq!(escaped, utf16("a%EF%BF%BDb"));
        assert!(escape(&s, EscapeOptions::from_legacy_mode(1).expect("known mode")).is_err());
        assert_eq!(encode_string_for_uri(&s), utf16("a%EF%BF%BDb"));
    }

    #[test]
    fn idempotence() {
        for s in [
            "",
            "e",
            "e:x",
            "e://x:@y",
            "a://[va.a]:/",
            "x@yz",
            "e://^//y",
            "e^",
            "e://x:a",
            "a://x::/y",
            "x@y:z",
            "01:/w/x",
            "e://x:%30/",
            "a://xxx@[",
            "a://[",
            "a://x%/",
            "a://x%xy/",
            "a://[wa.a]",
            "a://[va.a/",
            "a://[v.a]",
            "a://[va.]",
            "a b/[x]?\u{e9}#%",
            "http://[fe80::1%25eth0]/\u{10300}",
        ] {
            assert_idempotent(&utf16(s));
        }
        assert_idempotent(&[u16::from(b'x'), 0xDC00, u16::from(b'%')]);
    }

    #[test]
    fn component_encoding() {
        let mut buf = Vec::new();
        encode_component(&mut buf, &utf16("a b/(=):!$&'*+,;@?#%41%4"));
        assert_eq!(buf, utf16("a%20b/(=):!$&'*+,;@%3F%23%41%254"));
    }

    #[test]
    fn encode_for_uri() {
        assert_eq!(
            encode_string_for_uri(&utf16("AZaz09-_.~!*'();:@&=+$,/?#[]")),
            utf16("AZaz09-_.~%21%2A%27%28%29%3B%3A%40%26%3D%2B%24%2C%2F%3F%23%5B%5D")
        );
        assert_eq!(encode_string_for_uri(&utf16("\u{20AC}")), utf16("%E2%82%AC"));
    }
}
