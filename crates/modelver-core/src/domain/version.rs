//! Version identifier helpers.
//!
//! Versions are opaque strings. The `vX.Y.Z` shape is only recognised for the
//! opt-in strict mode and for the "registering an older version" advisory.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$").expect("valid version regex"));

/// A version identifier in `vMAJOR.MINOR.PATCH` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionTag {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTag {
    /// Parse `vX.Y.Z`.
    ///
    /// Returns `None` for any other shape, and for tags whose components do
    /// not fit in a `u64`.
    pub fn parse(version: &str) -> Option<Self> {
        let [major, minor, patch] = components(version)?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
            patch: patch.parse().ok()?,
        })
    }
}

/// Whether `version` has the `vX.Y.Z` shape, whatever the size of its numbers.
pub fn is_version_tag(version: &str) -> bool {
    VERSION_TAG.is_match(version)
}

/// Compare two versions when both are `vX.Y.Z` tags.
///
/// Components are compared as unbounded decimal numbers. Returns `None` when
/// either side is not a tag; opaque identifiers have no ordering.
pub fn compare_tags(a: &str, b: &str) -> Option<Ordering> {
    let (a, b) = (components(a)?, components(b)?);
    Some(
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| compare_decimal(x, y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal),
    )
}

fn components(version: &str) -> Option<[&str; 3]> {
    let caps = VERSION_TAG.captures(version)?;
    let part = |i| caps.get(i).map(|m| m.as_str());
    Some([part(1)?, part(2)?, part(3)?])
}

fn compare_decimal(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
