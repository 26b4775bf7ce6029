//! URI and IRI utilities over UTF-16 text.
//!
//! This crate splits, validates, percent-encodes, percent-decodes, normalizes,
//! builds and resolves [RFC 3986 URI][RFC 3986]s and [RFC 3987 IRI][RFC 3987]s.
//! Only the generic syntax is handled: the crate has no knowledge about
//! particular schemes, does no network access, and does neither Unicode
//! normalization nor IDNA processing.
//!
//! [RFC 3986]: https://tools.ietf.org/html/rfc3986
//! [RFC 3987]: https://tools.ietf.org/html/rfc3987
//!
//! # UTF-16 input
//!
//! All text is given as slices of UTF-16 code units (`&[u16]`), and every
//! index reported by this crate is an offset in code units into the original
//! slice. Surrogate pairs are combined into single scalar values before any
//! character class is checked, so supplementary-plane characters count as one
//! character. An unpaired surrogate is either rejected or replaced with
//! U+FFFD, depending on the [`ParseMode`][`mode::ParseMode`] or decoding
//! policy in use.
//!
//! ```
//! use uri_utility::components::split;
//! use uri_utility::mode::ParseMode;
//!
//! let iri: Vec<u16> = "http://example.com/p?q#f".encode_utf16().collect();
//! let c = split(&iri, ParseMode::IriStrict)?;
//! assert_eq!(c.scheme, Some(0..4));
//! assert_eq!(c.authority, Some(7..18));
//! assert_eq!(c.path, 18..20);
//! assert_eq!(c.query, Some(21..22));
//! assert_eq!(c.fragment, Some(23..24));
//! # Ok::<_, uri_utility::validate::Error>(())
//! ```
//!
//! # `std` and `alloc` support
//!
//! This crate supports `no_std` usage.
//!
//! * `alloc` feature:
//!     + Std library or `alloc` crate is required.
//!     + This feature enables functions which require memory allocation,
//!       e.g. percent encoding and decoding, and reference resolution.
//! * `std` feature (**enabled by default**):
//!     + Std library is required.
//!     + This automatically enables `alloc` feature.
//!     + The feature let the crate utilize std-specific stuff, such as `std::error::Error` trait.
//! * With neither of them:
//!     + The crate can be used in `no_std` environment, and splitting and
//!       validation are still available.
//!
//! # Rationale
//!
//! ## `foo:`, `foo:/`, `foo://`, `foo:///` are all valid
//!
//! * `foo:` is decomposed to `<scheme="foo">:<path-empty="">`.
//! * `foo:/` is decomposed to `<scheme="foo">:<path-absolute="/">`.
//! * `foo://` is decomposed to `<scheme="foo">://<authority=""><path-abempty="">`.
//! * `foo:///` is decomposed to `<scheme="foo">://<authority=""><path-abempty="/">`.
//!
//! An authority which is present but empty is still an authority, so the
//! path of `foo://` is empty rather than `//`.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod build;
pub mod components;
pub mod mode;
#[cfg(feature = "alloc")]
pub mod normalize;
pub(crate) mod parser;
#[cfg(feature = "alloc")]
pub mod percent_decode;
#[cfg(feature = "alloc")]
pub mod percent_encode;
#[cfg(feature = "alloc")]
pub mod resolve;
pub(crate) mod utf16;
pub mod validate;
