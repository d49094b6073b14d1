// loose version compare
//
// For version strings that follow no known grammar. The string is cut into
// parts and the parts are compared in order.
//
// --- Splitting ---
//
// 1. Runs of ascii digits are numeric parts
// 2. Runs of other alphanumeric characters are text parts
// 3. Anything else is a separator, empty parts are dropped
//
// example: 0.1+build1004.1   -> (0, 1, "build", 1004, 1)
//          1...0.0           -> (1, 0, 0)
//          0.1-.+1.0         -> (0, 1, 1, 0)
//
// --- Ordering ---
//
// 1. numbers compare numerically
// 2. text compares in ascii order
// 3. text is LESS than a number
// 4. when one side runs out of parts, the other side is
//      GREATER if its next part is a number  (1.0 < 1.0.1)
//      LESS    if its next part is text      (1.0-alpha < 1.0)
// 5. leading zeros are ignored until they are needed to break ties,
//    zeros are then LESS than non-zeros      (1.007 < 1.07 < 1.7)
//
// example: 1+build1.1 < 1.0build < 1.0.build1.1
//          1.0+build1 < 1.0build1.1
//          1.0+-.0 == 1.0.0

use std::cmp::Ordering;

fn eq_to_none(v: Ordering) -> Option<Ordering> {
    if matches!(v, Ordering::Equal) {
        return None;
    }
    Some(v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    Num(&'a str),
    Text(&'a str),
}

impl<'a> Part<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Num(s) | Self::Text(s) => *s,
        }
    }
}

// --- Parts ---------------------------------------------------------

#[derive(Clone)]
pub struct Parts<'a> {
    s: &'a str,
}

pub fn parts(s: &str) -> Parts<'_> {
    Parts { s }
}

impl<'a> Iterator for Parts<'a> {
    type Item = Part<'a>;
    fn next(&mut self) -> Option<Self::Item> {

        let Some(start) = self.s.find(char::is_alphanumeric) else {
            self.s = "";
            return None;
        };
        self.s = &self.s[start..];

        let numeric = self.s.starts_with(|c: char| c.is_ascii_digit());
        let end = self.s
            .find(|c: char| !c.is_alphanumeric() || c.is_ascii_digit() != numeric)
            .unwrap_or(self.s.len());

        let (part, rest) = self.s.split_at(end);
        self.s = rest;

        if numeric {
            Some(Part::Num(part))
        } else {
            Some(Part::Text(part))
        }
    }
}

// ---/Parts ---------------------------------------------------------

pub fn split(s: &str) -> Vec<Part<'_>> {
    parts(s).collect()
}

// by value, for digit strings of any length
fn num_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

pub fn compare(v1: &str, v2: &str) -> Ordering {

    let mut tie_breaker = None;

    let mut parts1 = parts(v1);
    let mut parts2 = parts(v2);

    loop {
        match (parts1.next(), parts2.next()) {

            (Some(Part::Num(n1)), Some(Part::Num(n2))) => {
                if let Some(ret) = eq_to_none(num_cmp(n1, n2)) {
                    return ret;
                }
                // 007 < 7
                tie_breaker = tie_breaker.or_else(|| eq_to_none(n1.cmp(n2)));
            }

            (Some(Part::Text(t1)), Some(Part::Text(t2))) => {
                if let Some(ret) = eq_to_none(t1.cmp(t2)) {
                    return ret;
                }
            }

            (Some(Part::Num(_)), Some(Part::Text(_))) => {
                return Ordering::Greater;
            }
            (Some(Part::Text(_)), Some(Part::Num(_))) => {
                return Ordering::Less;
            }

            // one side ran out of parts
            (Some(Part::Num(_)), None) => {
                return Ordering::Greater;
            }
            (Some(Part::Text(_)), None) => {
                return Ordering::Less;
            }
            (None, Some(Part::Num(_))) => {
                return Ordering::Less;
            }
            (None, Some(Part::Text(_))) => {
                return Ordering::Greater;
            }

            (None, None) => {
                break;
            }
        }
    }

    tie_breaker.unwrap_or(Ordering::Equal)
}

// --- LooseVersion --------------------------------------------------

#[derive(Debug, Clone)]
pub struct LooseVersion(pub String);

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        matches!(compare(&self.0, &other.0), Ordering::Equal)
    }
}
impl Eq for LooseVersion {}
impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl LooseVersion {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for LooseVersion {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---/LooseVersion --------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    fn strs(s: &str) -> Vec<&str> {
        parts(s).map(|p| p.as_str()).collect()
    }

    #[test]
    fn splitting() {
        assert_eq!(strs("1.0.0"), ["1", "0", "0"]);
        assert_eq!(strs("1...0.0"), ["1", "0", "0"]);
        assert_eq!(strs("0.1.build1004"), ["0", "1", "build", "1004"]);
        assert_eq!(strs("0.1+build1004.1"), ["0", "1", "build", "1004", "1"]);
        assert_eq!(strs("0.1-1.0"), ["0", "1", "1", "0"]);
        assert_eq!(strs("0.1-.+1.0"), ["0", "1", "1", "0"]);
        assert_eq!(strs("1.0.1構建日期2014"), ["1", "0", "1", "構建日期", "2014"]);
        assert!(strs("").is_empty());
        assert!(strs("..-+").is_empty());
    }

    #[test]
    fn part_kinds() {
        assert_eq!(
            split("v2rc1"),
            [Part::Text("v"), Part::Num("2"), Part::Text("rc"), Part::Num("1")]
        );
    }

    #[test]
    fn pairs() {
        let cases = [
            ("0.1.0", "0.1.0", Ordering::Equal),
            ("1...0.0", "1.0.0", Ordering::Equal),
            ("1.0+-.0", "1.0.0", Ordering::Equal),
            ("1.0-alpha", "1.0-", Ordering::Less),
            ("1.0+build1", "1.0build1.1", Ordering::Less),
            ("1.0.build1.1", "1.0build", Ordering::Greater),
            ("1.0.build+1.1", "1.0build", Ordering::Greater),
            ("1+build1.1", "1.0build", Ordering::Less),
        ];
        for (v1, v2, expected) in cases {
            assert_eq!(compare(v1, v2), expected, "{v1} vs {v2}");
            assert_eq!(compare(v2, v1), expected.reverse(), "{v2} vs {v1}");
        }
    }

    fn assert_order(versions: &[&str]) {
        for (i, s1) in versions.iter().enumerate() {
            for s2 in versions.iter().skip(i+1) {
                assert_eq!(compare(s1, s2), Ordering::Less, "{s1} < {s2}");
                assert_eq!(compare(s2, s1), Ordering::Greater, "{s2} > {s1}");

                let v1 = LooseVersion::from(*s1);
                let v2 = LooseVersion::from(*s2);
                assert!(v1 < v2);
            }
        }
    }

    #[test]
    fn order() {
        assert_order(&[
            "a.b",
            "0",
            "0.1",
            "1-alpha",
            "1-beta",
            "1",
            "1.0-rc1",
            "1.0",
            "1.0.1",
            "1.007",
            "1.07",
            "1.7",
            "1.10",
            "2.0-BETA",
            "2.0a",
            "2.0-beta",
            "2.0",
            "2.0.1",
            "12345678901234567890123",
            "12345678901234567890124",
        ]);
    }

    #[test]
    fn sort_dedup() {
        let mut versions: Vec<LooseVersion> =
            ["1.10", "1.2", "1..2", "1.2-rc1", "0.9"].into_iter().map(LooseVersion::from).collect();
        versions.sort();
        versions.dedup();
        let sorted: Vec<_> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(sorted, ["0.9", "1.2-rc1", "1.2", "1.10"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn antisymmetric(a in "[0-9ab.-]{0,10}", b in "[0-9ab.-]{0,10}") {
                prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
            }

            #[test]
            fn transitive(a in "[0-2ab.]{0,6}", b in "[0-2ab.]{0,6}", c in "[0-2ab.]{0,6}") {
                if compare(&a, &b) == Ordering::Less && compare(&b, &c) == Ordering::Less {
                    prop_assert_eq!(compare(&a, &c), Ordering::Less);
                }
            }
        }
    }
}
