use field_route::{FieldDescriptor, FieldSink, FieldTable, FieldValue};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

mod compare;

pub use compare::{compare, compare_strings, CompareError, Side};
pub use field_route::ParseError;

const MAJOR: usize = 0;
const MINOR: usize = 1;
const PATCH: usize = 2;
const PRERELEASE: usize = 3;
const BUILD: usize = 4;

static FIELDS: OnceLock<FieldTable> = OnceLock::new();

// MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]
fn semver_fields() -> FieldTable {
    FieldTable::new(vec![
        FieldDescriptor::numeric("major", MAJOR).route(b'.', MINOR),
        FieldDescriptor::numeric("minor", MINOR).route(b'.', PATCH),
        FieldDescriptor::numeric("patch", PATCH)
            .route(b'-', PRERELEASE)
            .route(b'+', BUILD),
        FieldDescriptor::text("prerelease", PRERELEASE).route(b'+', BUILD),
        FieldDescriptor::text("build", BUILD),
    ])
    .expect("semver field table is valid")
}

/// A semantic version, see [semver.org]
///
/// Equality is field by field and includes the build metadata. Use
/// [`compare`] (or [`SemVersion::precedence`]) for semver ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SemVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: String,
    pub build: String,
}

impl SemVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            ..Default::default()
        }
    }

    /// the field table every semver parse goes through, built once
    pub fn fields() -> &'static FieldTable {
        FIELDS.get_or_init(semver_fields)
    }

    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let mut v = Self::default();
        v.parse_into(s)?;
        Ok(v)
    }

    /// Reset to zero and parse `s` into self. After an error the fields
    /// hold whatever was decoded before the bad segment.
    pub fn parse_into(&mut self, s: &str) -> Result<(), ParseError> {
        *self = Self::default();
        field_route::parse(Self::fields(), self, s)
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    pub fn prerelease_identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.is_prerelease()
            .then(|| self.prerelease.split('.'))
            .into_iter()
            .flatten()
    }

    pub fn precedence(&self, other: &Self) -> std::cmp::Ordering {
        compare(self, other)
    }
}

/// Parse `s` into `record`, see [`SemVersion::parse_into`].
pub fn parse(record: &mut SemVersion, s: &str) -> Result<(), ParseError> {
    record.parse_into(s)
}

// core numbers are non-negative and fit in u64
fn core_number(field: &FieldDescriptor, n: i128) -> Result<u64, ParseError> {
    u64::try_from(n).map_err(|_| ParseError::out_of_range(field, n))
}

impl FieldSink for SemVersion {
    fn store(&mut self, field: &FieldDescriptor, value: FieldValue<'_>) -> Result<(), ParseError> {
        match (field.index(), value) {
            (MAJOR, FieldValue::Numeric(n)) => self.major = core_number(field, n)?,
            (MINOR, FieldValue::Numeric(n)) => self.minor = core_number(field, n)?,
            (PATCH, FieldValue::Numeric(n)) => self.patch = core_number(field, n)?,
            (PRERELEASE, FieldValue::Text(s)) => self.prerelease = s.to_string(),
            (BUILD, FieldValue::Text(s)) => self.build = s.to_string(),
            _ => return Err(ParseError::unknown_field(field)),
        }
        Ok(())
    }
}

impl std::str::FromStr for SemVersion {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SemVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

// serialized as the canonical string
impl Serialize for SemVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u64, minor: u64, patch: u64, prerelease: &str, build: &str) -> SemVersion {
        SemVersion {
            major,
            minor,
            patch,
            prerelease: prerelease.into(),
            build: build.into(),
        }
    }

    #[test]
    fn table_is_valid() {
        let fields = SemVersion::fields();
        assert_eq!(fields.len(), 5);
        assert!(fields.get(BUILD).unwrap().is_terminal());
        assert_eq!(fields.get(PATCH).unwrap().next(b'+'), Some(BUILD));
    }

    #[test]
    fn parse_core() {
        assert_eq!(SemVersion::parse("2.3.19").unwrap(), v(2, 3, 19, "", ""));
    }

    #[test]
    fn parse_build() {
        assert_eq!(SemVersion::parse("2.3.19+build.1").unwrap(), v(2, 3, 19, "", "build.1"));
    }

    #[test]
    fn parse_prerelease_and_build() {
        assert_eq!(
            SemVersion::parse("2.3.19-pre.release+build").unwrap(),
            v(2, 3, 19, "pre.release", "build")
        );
        // '-' inside the prerelease is text
        assert_eq!(
            SemVersion::parse("1.0.0-x-y-z.--").unwrap(),
            v(1, 0, 0, "x-y-z.--", "")
        );
    }

    #[test]
    fn parse_short() {
        // unreached fields stay zero
        assert_eq!(SemVersion::parse("4").unwrap(), v(4, 0, 0, "", ""));
        assert_eq!(SemVersion::parse("4.1").unwrap(), v(4, 1, 0, "", ""));
    }

    #[test]
    fn parse_errors() {
        for bad in ["", "a.b.c", "1.2.x", "1.2.3.4", "1..3", "1.2.3a"] {
            let err = SemVersion::parse(bad).unwrap_err();
            assert!(matches!(err, ParseError::NumericConversion { .. }), "{bad}");
        }
        let err = "1.2.x".parse::<SemVersion>().unwrap_err();
        assert_eq!(err.to_string(), "field `patch` (index 2): \"x\" is not an integer");
    }

    #[test]
    fn negative_and_oversized_numbers() {
        let err = SemVersion::parse("1.2.-3").unwrap_err();
        assert_eq!(
            err,
            ParseError::OutOfRange {
                index: PATCH,
                name: "patch".into(),
                value: -3,
            }
        );
        assert_eq!(err.to_string(), "field `patch` (index 2): -3 is out of range");

        let err = SemVersion::parse("-1.0.0").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { index: MAJOR, value: -1, .. }));

        // u64::MAX + 1
        let err = SemVersion::parse("1.18446744073709551616.0").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { index: MINOR, .. }));

        // an explicit plus sign is accepted and not rendered
        assert_eq!(SemVersion::parse("+1.0.0").unwrap().to_string(), "1.0.0");
    }

    #[test]
    fn widest_numbers_round_trip() {
        let sv = SemVersion::new(u64::MAX, 0, u64::MAX);
        let s = sv.to_string();
        assert_eq!(s, "18446744073709551615.0.18446744073709551615");
        assert_eq!(SemVersion::parse(&s).unwrap(), sv);
    }

    #[test]
    fn reparse_is_not_cumulative() {
        let mut record = SemVersion::default();
        parse(&mut record, "1.2.3-rc.1+abc").unwrap();
        parse(&mut record, "4.5").unwrap();
        assert_eq!(record, v(4, 5, 0, "", ""));
    }

    #[test]
    fn render() {
        let mut sv = SemVersion::new(1, 0, 0);
        assert_eq!(sv.to_string(), "1.0.0");

        sv.minor = 22;
        assert_eq!(sv.to_string(), "1.22.0");

        sv.patch = 1234;
        assert_eq!(sv.to_string(), "1.22.1234");

        sv.build = "20160615".into();
        assert_eq!(sv.to_string(), "1.22.1234+20160615");

        sv.prerelease = "alpha1.0".into();
        assert_eq!(sv.to_string(), "1.22.1234-alpha1.0+20160615");

        sv.build = "".into();
        assert_eq!(sv.to_string(), "1.22.1234-alpha1.0");
    }

    #[test]
    fn identifiers() {
        let sv = v(1, 0, 0, "rc.1", "");
        assert!(sv.is_prerelease());
        assert_eq!(sv.prerelease_identifiers().collect::<Vec<_>>(), ["rc", "1"]);

        let sv = v(1, 0, 0, "", "rc.1");
        assert!(!sv.is_prerelease());
        assert_eq!(sv.prerelease_identifiers().count(), 0);
    }

    #[test]
    fn serde() {
        let sv = v(1, 2, 3, "beta.2", "sha.5114f85");
        let json = serde_json::to_string(&sv).unwrap();
        assert_eq!(json, r#""1.2.3-beta.2+sha.5114f85""#);
        let back: SemVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sv);

        let err = serde_json::from_str::<SemVersion>(r#""1.x""#).unwrap_err();
        assert!(err.to_string().contains("is not an integer"));
    }

    #[test]
    fn agrees_with_semver_crate() {
        for s in ["0.0.0", "1.2.3", "10.20.30-rc.1", "1.0.0-alpha.beta+exp.sha.5114f85", "1.0.0+21AF26D3"] {
            let ours = SemVersion::parse(s).unwrap();
            let theirs = semver::Version::parse(s).unwrap();
            assert_eq!(ours.major, theirs.major);
            assert_eq!(ours.minor, theirs.minor);
            assert_eq!(ours.patch, theirs.patch);
            assert_eq!(ours.prerelease, theirs.pre.as_str());
            assert_eq!(ours.build, theirs.build.as_str());
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn record() -> impl Strategy<Value = SemVersion> {
            (
                any::<u64>(),
                any::<u64>(),
                any::<u64>(),
                "([0-9A-Za-z-]{1,6}(\\.[0-9A-Za-z-]{1,6}){0,3})?",
                "([0-9A-Za-z-]{1,6}(\\.[0-9A-Za-z-]{1,6}){0,3})?",
            )
                .prop_map(|(major, minor, patch, prerelease, build)| SemVersion {
                    major,
                    minor,
                    patch,
                    prerelease,
                    build,
                })
        }

        proptest! {
            #[test]
            fn round_trip(sv in record()) {
                let back = SemVersion::parse(&sv.to_string()).unwrap();
                prop_assert_eq!(back, sv);
            }

            #[test]
            fn deterministic(s in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}(-[a-z0-9.]{1,8})?(\\+[a-z0-9.]{1,8})?") {
                prop_assert_eq!(SemVersion::parse(&s).unwrap(), SemVersion::parse(&s).unwrap());
            }
        }
    }
}
