//! Parse modes.
//!
//! A parse mode selects two independent things:
//!
//! * the character repertoire: IRI (non-ASCII characters allowed where
//!   RFC 3987 allows them) or URI (ASCII only), and
//! * the strictness: strict (every character is checked against the class
//!   of the component it belongs to, and percent-encoding syntax is checked)
//!   or lenient (only the delimiters between components are recognized).
//!
//! Lenient IRI parsing further has a variant that replaces unpaired
//! surrogates with U+FFFD instead of rejecting them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utf16::SurrogatePolicy;

/// Specifies which strings are accepted when splitting IRIs and URIs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseMode {
    /// IRI syntax.
    ///
    /// Many characters outside the Basic Latin range are allowed.
    /// Strings with unpaired surrogates are invalid.
    #[default]
    IriStrict,
    /// URI syntax.
    ///
    /// Same as [`IriStrict`][`Self::IriStrict`], except that no characters
    /// outside the Basic Latin range (U+0000 to U+007F) are allowed.
    UriStrict,
    /// Delimiters only, IRI repertoire.
    ///
    /// Only the delimiters between the components are checked. Strings with
    /// unpaired surrogates are still invalid.
    IriLenient,
    /// Delimiters only, URI repertoire.
    ///
    /// Only the delimiters between the components are checked, and no
    /// characters outside the Basic Latin range are allowed.
    UriLenient,
    /// Delimiters only, IRI repertoire, unpaired surrogates tolerated.
    ///
    /// Unpaired surrogates are treated as though they were U+FFFD, so
    /// strings containing them are not invalid.
    IriSurrogateLenient,
}

impl ParseMode {
    /// Returns `true` if every character is checked against its component.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_utility::mode::ParseMode;
    ///
    /// assert!(ParseMode::UriStrict.is_strict());
    /// assert!(!ParseMode::IriSurrogateLenient.is_strict());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::IriStrict | Self::UriStrict)
    }

    /// Returns `true` if characters outside U+0000 to U+007F are rejected.
    #[inline]
    #[must_use]
    pub fn is_ascii_only(self) -> bool {
        matches!(self, Self::UriStrict | Self::UriLenient)
    }

    /// Returns `true` if unpaired surrogates are replaced rather than rejected.
    #[inline]
    #[must_use]
    pub fn substitutes_surrogates(self) -> bool {
        self == Self::IriSurrogateLenient
    }

    /// Returns how unpaired surrogates are handled in this mode.
    #[inline]
    #[must_use]
    pub(crate) fn surrogate_policy(self) -> SurrogatePolicy {
        if self.substitutes_surrogates() {
            SurrogatePolicy::Replace
        } else {
            SurrogatePolicy::Reject
        }
    }
}
