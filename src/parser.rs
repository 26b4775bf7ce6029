//! Parsers.

pub(crate) mod chars;
pub(crate) mod ip;
pub(crate) mod split;
