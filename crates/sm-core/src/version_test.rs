//! Tests for version parsing, ordering, and formatting.

use super::*;

#[test]
fn parse_accepts_leading_zeros() {
    assert_eq!(Version::parse("003").unwrap(), Version::new(3));
    assert_eq!(Version::parse("0").unwrap(), Version::new(0));
}

#[test]
fn parse_accepts_timestamp_style() {
    let v = Version::parse("20260806120000").unwrap();
    assert_eq!(v.value(), 20_260_806_120_000);
}

#[test]
fn parse_rejects_empty() {
    let err = Version::parse("").unwrap_err();
    assert!(err.to_string().contains("E005"), "got: {err}");
}

#[test]
fn parse_rejects_non_digits() {
    assert!(Version::parse("1a").is_err());
    assert!(Version::parse("-1").is_err());
    assert!(Version::parse("1.0").is_err());
}

#[test]
fn parse_rejects_overflow() {
    // One past u64::MAX
    assert!(Version::parse("18446744073709551616").is_err());
}

#[test]
fn versions_order_numerically() {
    let mut versions = vec![Version::new(10), Version::new(2), Version::new(1)];
    versions.sort();
    assert_eq!(
        versions,
        vec![Version::new(1), Version::new(2), Version::new(10)]
    );
}

#[test]
fn file_prefix_pads_to_four_digits() {
    assert_eq!(Version::new(3).file_prefix(), "v0003");
    assert_eq!(Version::new(12345).file_prefix(), "v12345");
}

#[test]
fn display_is_unpadded() {
    assert_eq!(Version::new(3).to_string(), "3");
}
