//! Regression tests for host literals.

mod utils;

use uri_utility::components::split;
use uri_utility::mode::ParseMode;

use self::utils::utf16;

fn authority(s: &str) -> Option<String> {
    let units = utf16(s);
    let c = split(&units, ParseMode::UriStrict).ok()?;
    c.authority.map(|r| String::from_utf16_lossy(&units[r]))
}

#[test]
fn ipv6_literal_authority_host() {
    assert_eq!(authority("//[::1]").as_deref(), Some("[::1]"));
    assert_eq!(authority("//u@[::1]:80/p").as_deref(), Some("u@[::1]:80"));
}

#[test]
fn extra_trailing_colon_in_ipv6_literal() {
    assert_eq!(authority("//[::1:]"), None);
    assert_eq!(authority("//[1:2:3:4:5:6:7:8:]"), None);
    assert_eq!(authority("//[1:2:3:4:5:6:1.2.3.4:]"), None);
    assert_eq!(authority("//[1:2:3:4:5:6:7:8]").as_deref(), Some("[1:2:3:4:5:6:7:8]"));
}

#[test]
fn extra_group_in_ipv6_literal() {
    assert_eq!(authority("//[1:2:3:4:5:6:7:8:9]"), None);
}

#[test]
fn ipvfuture() {
    assert_eq!(authority("//[V0.0]").as_deref(), Some("[V0.0]"));
    assert_eq!(authority("//[v0.]"), None);
    assert_eq!(authority("//[v.0]"), None);
}

#[test]
fn text_after_ip_literal() {
    assert_eq!(authority("//[::1]x"), None);
    assert_eq!(authority("//[::1]:x"), None);
    assert_eq!(authority("//x[::1]"), None);
}
