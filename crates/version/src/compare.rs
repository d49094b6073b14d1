// semver precedence
//
// 1. major, minor, patch compare numerically
// 2. a prerelease is LESS than the release it precedes
// 3. prereleases compare identifier by identifier (split on '.')
//    - identifiers of only digits compare numerically
//    - numeric is LESS than non-numeric
//    - everything else compares in ascii order
//    - fewer identifiers is LESS when all shared identifiers are equal
// 4. build metadata is ignored
//
// example: 1.0.0-alpha < 1.0.0-alpha.1 < 1.0.0-alpha.beta < 1.0.0-beta
//        < 1.0.0-beta.2 < 1.0.0-beta.11 < 1.0.0-rc.1 < 1.0.0

use crate::{ParseError, SemVersion};
use std::cmp::Ordering;

/// which argument of [`compare_strings`] failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {side} version {input:?}")]
pub struct CompareError {
    pub side: Side,
    pub input: String,
    #[source]
    pub source: ParseError,
}

fn eq_to_none(v: Ordering) -> Option<Ordering> {
    if matches!(v, Ordering::Equal) {
        return None;
    }
    Some(v)
}

/// Semver precedence of `a` relative to `b`.
pub fn compare(a: &SemVersion, b: &SemVersion) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| prerelease_cmp(&a.prerelease, &b.prerelease))
}

/// Parse both strings and compare them, failing on the first invalid one.
pub fn compare_strings(a: &str, b: &str) -> Result<Ordering, CompareError> {
    let left = SemVersion::parse(a).map_err(|source| CompareError {
        side: Side::Left,
        input: a.to_string(),
        source,
    })?;
    let right = SemVersion::parse(b).map_err(|source| CompareError {
        side: Side::Right,
        input: b.to_string(),
        source,
    })?;
    Ok(compare(&left, &right))
}

fn prerelease_cmp(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        // release beats prerelease
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let mut parts1 = a.split('.');
    let mut parts2 = b.split('.');

    loop {
        match (parts1.next(), parts2.next()) {
            (Some(left), Some(right)) => {
                if let Some(ret) = eq_to_none(identifier_cmp(left, right)) {
                    return ret;
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn identifier_cmp(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => numeric_cmp(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.as_bytes().cmp(b.as_bytes()),
    }
}

// by value, for digit strings of any length
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
