//! Dotted version normalization.
//!
//! Versions and build numbers are compared against the platform in a
//! canonical `major.minor.patch` form: every segment is reduced to its
//! integer value and missing trailing segments are padded with `0`.
//! Extra segments beyond the third are kept.

use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_COMPONENTS: usize = 3;

/// A version string with at least three non-negative integer components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedVersion(String);

impl NormalizedVersion {
    /// Normalize a raw version string. Never fails; unparseable segments
    /// become `0`.
    pub fn parse(raw: &str) -> Self {
        let mut components: Vec<String> = raw.split('.').map(normalize_segment).collect();
        while components.len() < MIN_COMPONENTS {
            components.push("0".to_string());
        }
        NormalizedVersion(components.join("."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for NormalizedVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalize an optional version. Absence is preserved: `None` means
/// "no constraint" and must not turn into `0.0.0`.
pub fn normalize_version(raw: Option<&str>) -> Option<NormalizedVersion> {
    raw.map(NormalizedVersion::parse)
}

/// Integer value of the segment's leading digits, re-stringified.
///
/// Works on the digit string directly so arbitrarily long segments cannot
/// overflow.
fn normalize_segment(segment: &str) -> String {
    let digits: &str = {
        let trimmed = segment.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        "0".to_string()
    } else {
        significant.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        NormalizedVersion::parse(raw).to_string()
    }

    #[test]
    fn pads_to_three_components() {
        assert_eq!(norm("1.2"), "1.2.0");
        assert_eq!(norm("1"), "1.0.0");
        assert_eq!(norm("1.2.3"), "1.2.3");
    }

    #[test]
    fn absence_passes_through() {
        assert_eq!(normalize_version(None), None);
        assert_eq!(
            normalize_version(Some("4.1")),
            Some(NormalizedVersion::parse("4.1.0"))
        );
    }

    #[test]
    fn non_numeric_and_empty_segments_become_zero() {
        assert_eq!(norm(""), "0.0.0");
        assert_eq!(norm("1..3"), "1.0.3");
        assert_eq!(norm("beta.2"), "0.2.0");
        assert_eq!(norm("-1.2"), "0.2.0");
    }

    #[test]
    fn leading_digits_and_leading_zeros() {
        assert_eq!(norm("01.002"), "1.2.0");
        assert_eq!(norm("3rc1"), "3.0.0");
        assert_eq!(norm(" 7"), "7.0.0");
    }

    #[test]
    fn never_truncates_extra_components() {
        assert_eq!(norm("1.2.3.4"), "1.2.3.4");
        assert_eq!(norm("1.2.3.4.5"), "1.2.3.4.5");
    }

    #[test]
    fn huge_segments_do_not_overflow() {
        assert_eq!(
            norm("123456789012345678901234567890"),
            "123456789012345678901234567890.0.0"
        );
    }

    #[test]
    fn compares_against_str() {
        assert!(NormalizedVersion::parse("2") == "2.0.0");
    }
}
