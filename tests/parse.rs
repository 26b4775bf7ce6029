//! Split and validate.

mod utils;

#[cfg(feature = "alloc")]
use uri_utility::components::split_to_components;
use uri_utility::components::{split, split_range};
use uri_utility::mode::ParseMode;
use uri_utility::validate::{self, ErrorKind};

use self::utils::{utf16, with_surrogate, STRICT_NEGATIVE, STRICT_POSITIVE};

const ALL_MODES: [ParseMode; 5] = [
    ParseMode::IriStrict,
    ParseMode::UriStrict,
    ParseMode::IriLenient,
    ParseMode::UriLenient,
    ParseMode::IriSurrogateLenient,
];

#[test]
fn strict_positive() {
    for s in STRICT_POSITIVE {
        let units = utf16(s);
        assert!(split(&units, ParseMode::IriStrict).is_ok(), "{:?}", s);
        assert!(validate::is_valid_iri(&units, ParseMode::IriStrict), "{:?}", s);
        // Anything strictly valid is also valid leniently.
        assert!(validate::is_valid_iri(&units, ParseMode::IriLenient), "{:?}", s);
        assert!(
            validate::is_valid_iri(&units, ParseMode::IriSurrogateLenient),
            "{:?}",
            s
        );
        assert_eq!(
            validate::is_valid_iri(&units, ParseMode::UriStrict),
            s.is_ascii(),
            "{:?}",
            s
        );
    }
}

#[test]
fn strict_negative() {
    for s in STRICT_NEGATIVE {
        let units = utf16(s);
        assert!(split(&units, ParseMode::IriStrict).is_err(), "{:?}", s);
        assert!(!validate::is_valid_iri(&units, ParseMode::UriStrict), "{:?}", s);
    }
}

#[test]
fn ranges_are_within_input() {
    for s in STRICT_POSITIVE {
        let units = utf16(s);
        for mode in ALL_MODES {
            let c = match split(&units, mode) {
                Ok(c) => c,
                Err(_) => continue,
            };
            let ranges = [
                c.scheme.clone(),
                c.authority.clone(),
                Some(c.path.clone()),
                c.query.clone(),
                c.fragment.clone(),
            ];
            let mut last_end = 0;
            for range in ranges.iter().flatten() {
                assert!(range.start <= range.end, "{:?} in {:?}", s, mode);
                assert!(range.end <= units.len(), "{:?} in {:?}", s, mode);
                assert!(last_end <= range.start, "{:?} in {:?}", s, mode);
                last_end = range.end;
            }
        }
    }
}

#[test]
fn empty_input() {
    for mode in ALL_MODES {
        let c = split(&[], mode).expect("empty text is a valid reference");
        assert_eq!(c.scheme, None);
        assert_eq!(c.authority, None);
        assert_eq!(c.path, 0..0);
        assert_eq!(c.query, None);
        assert_eq!(c.fragment, None);
    }
}

#[test]
fn empty_paths() {
    for s in [
        "s://h", "s://h?x", "s://h#x", "//h", "//h?x", "//h#x", "s://", "s://?x", "s://#x", "s:",
        "s:?x", "s:#x",
    ] {
        let c = split(&utf16(s), ParseMode::IriStrict).expect("should be valid");
        assert!(c.path.is_empty(), "{:?}", s);
    }
}

#[test]
fn range_offsets() {
    let units = utf16("<http://example.com/a?b#c>");
    let c = split_range(&units, 1, units.len() - 2, ParseMode::IriStrict)
        .expect("the inner part is valid");
    assert_eq!(c.scheme, Some(1..5));
    assert_eq!(c.authority, Some(8..19));
    assert_eq!(c.path, 19..21);
    assert_eq!(c.query, Some(22..23));
    assert_eq!(c.fragment, Some(24..25));

    assert!(split_range(&units, 0, units.len(), ParseMode::IriStrict).is_err());
    let err = split_range(&units, 1, units.len(), ParseMode::IriStrict)
        .expect_err("one past the end");
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn unpaired_surrogates() {
    for index in [0, 3, 9, 11] {
        for unit in [0xD800, 0xDBFF, 0xDC00, 0xDFFF] {
            let units = with_surrogate("s://h/p?q#f", index, unit);
            assert!(!validate::is_valid_iri(&units, ParseMode::IriStrict));
            assert!(!validate::is_valid_iri(&units, ParseMode::IriLenient));
            assert!(!validate::is_valid_iri(&units, ParseMode::UriLenient));
            assert!(
                validate::is_valid_iri(&units, ParseMode::IriSurrogateLenient),
                "{:?}",
                units
            );
        }
    }
}

#[test]
fn supplementary_characters_are_single_characters() {
    // U+10300 is `ucschar`, U+E0000 is not, U+F0000 is only allowed in queries.
    assert!(validate::is_valid_iri(&utf16("/\u{10300}"), ParseMode::IriStrict));
    assert!(!validate::is_valid_iri(&utf16("/\u{e0000}"), ParseMode::IriStrict));
    assert!(!validate::is_valid_iri(&utf16("/\u{f0000}"), ParseMode::IriStrict));
    assert!(validate::is_valid_iri(&utf16("?\u{f0000}"), ParseMode::IriStrict));
    assert!(!validate::is_valid_iri(&utf16("#\u{f0000}"), ParseMode::IriStrict));
}

#[test]
fn scheme_detection() {
    for s in ["xx-x:mm", "example:/ww", "a+b.c-d:"] {
        assert!(validate::has_scheme(&utf16(s)), "{:?}", s);
        assert!(validate::has_scheme_for_uri(&utf16(s)), "{:?}", s);
    }
    for s in ["x@y:/z", "/x/y/z", "example.xyz", "1a:b", ""] {
        assert!(!validate::has_scheme(&utf16(s)), "{:?}", s);
    }
    assert!(validate::has_scheme(&utf16("a:\u{e9}")));
    assert!(!validate::has_scheme_for_uri(&utf16("a:\u{e9}")));
}

#[test]
fn curie_references() {
    let check = |s: &str| {
        let units = utf16(s);
        validate::is_valid_curie_reference(&units, 0, units.len()).expect("in range")
    };
    for s in ["", "x", "x:y", "x:y/z?q#f", "/x", "?q", "#f", "%20"] {
        assert!(check(s), "{:?}", s);
    }
    for s in ["//x", "a b", "%", "%zz", "x#y#z", "\u{e000}"] {
        assert!(!check(s), "{:?}", s);
    }
    let units = utf16("abc");
    assert_eq!(
        validate::is_valid_curie_reference(&units, 2, 5).map_err(|e| e.kind()),
        Err(ErrorKind::OutOfRange)
    );
}

#[cfg(feature = "alloc")]
#[test]
fn components_as_slices() {
    let units = utf16("HtTp://Example.COM/Path?Query#Fragment");
    let parts = split_to_components(&units).expect("valid");
    assert_eq!(parts.scheme.as_deref(), Some(&utf16("http")[..]));
    assert_eq!(parts.authority, Some(&utf16("Example.COM")[..]));
    assert_eq!(parts.path, &utf16("/Path")[..]);
    assert_eq!(parts.query, Some(&utf16("Query")[..]));
    assert_eq!(parts.fragment, Some(&utf16("Fragment")[..]));

    assert!(split_to_components(&utf16("a b")).is_err());
}
