use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use oxrdf::NamedNode;
use regex::Regex;
use thiserror::Error;

/// Value object ensuring that supplied text represents a valid absolute IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

pub(crate) const URI_EXPECTATION: &str = "an absolute IRI or a relative compliant path";

/// Accepts absolute IRIs, and document-relative paths built from
/// displayId-shaped segments (`part/sub_part/1.0.0`).
pub(crate) fn check_uri(value: &str) -> Result<(), String> {
    if Iri::new(value).is_ok() {
        return Ok(());
    }
    let relative = !value.is_empty()
        && value.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        });
    if relative {
        Ok(())
    } else {
        Err(URI_EXPECTATION.to_string())
    }
}

pub(crate) const DISPLAY_ID_EXPECTATION: &str =
    "letters, digits or underscores, not starting with a digit";

fn display_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("displayId pattern compiles")
    })
}

/// Checks the displayId lexical form.
pub(crate) fn check_display_id(value: &str) -> Result<(), String> {
    if display_id_pattern().is_match(value) {
        Ok(())
    } else {
        Err(DISPLAY_ID_EXPECTATION.to_string())
    }
}

pub(crate) const VERSION_EXPECTATION: &str =
    "up to three dot-separated numbers with an optional `-prerelease` suffix";

/// A version string ordered by semantic-versioning rules.
///
/// The release part may have one to three numeric segments; missing
/// segments count as zero, so `"1"` orders like `"1.0.0"`. A pre-release
/// suffix sorts before the matching release.
#[derive(Clone, Debug)]
pub struct Version {
    raw: String,
    parsed: semver::Version,
}

impl Version {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (release, pre) = match raw.split_once('-') {
            Some((release, pre)) => (release, Some(pre)),
            None => (raw, None),
        };
        let segments = release
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                segment.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .filter(|segments| (1..=3).contains(&segments.len()))
            .ok_or_else(|| VERSION_EXPECTATION.to_string())?;

        let mut parsed = semver::Version::new(
            segments[0],
            segments.get(1).copied().unwrap_or(0),
            segments.get(2).copied().unwrap_or(0),
        );
        if let Some(pre) = pre {
            parsed.pre =
                semver::Prerelease::new(pre).map_err(|_| VERSION_EXPECTATION.to_string())?;
        }
        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn increment_major(&self) -> Self {
        Self::from_semver(semver::Version::new(self.parsed.major + 1, 0, 0))
    }

    #[must_use]
    pub fn increment_minor(&self) -> Self {
        Self::from_semver(semver::Version::new(
            self.parsed.major,
            self.parsed.minor + 1,
            0,
        ))
    }

    #[must_use]
    pub fn increment_patch(&self) -> Self {
        Self::from_semver(semver::Version::new(
            self.parsed.major,
            self.parsed.minor,
            self.parsed.patch + 1,
        ))
    }

    fn from_semver(parsed: semver::Version) -> Self {
        Self {
            raw: parsed.to_string(),
            parsed,
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub(crate) const TIMESTAMP_EXPECTATION: &str =
    "ISO-8601 date (YYYY-MM-DD), date-time (YYYY-MM-DDThh:mm:ss) or date-time with offset (YYYY-MM-DDThh:mm:ss+hh:mm)";

/// One of the three accepted ISO-8601 timestamp shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Timestamp {
    Date(NaiveDate),
    Local(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, String> {
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::Offset(value));
        }
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::Local(value));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|_| TIMESTAMP_EXPECTATION.to_string())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Local(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Offset(value) => f.write_str(&value.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn accepts_valid_iri() {
        let iri = Iri::new("https://example.org/resource").expect("valid IRI");
        assert_eq!(iri.as_str(), "https://example.org/resource");
    }

    #[test]
    fn rejects_invalid_iri() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, IriError::Invalid { value } if value == "not an iri"));
    }

    #[rstest]
    #[case("http://sys-bio.org/B0032/1.0.0", true)]
    #[case("B0032/1.0.0", true)]
    #[case("part", true)]
    #[case("has space", false)]
    #[case("a//b", false)]
    #[case("", false)]
    fn uri_check(#[case] value: &str, #[case] accepted: bool) {
        assert_eq!(check_uri(value).is_ok(), accepted, "{value}");
    }

    #[rstest]
    #[case("B0032", true)]
    #[case("_private", true)]
    #[case("pTet_1", true)]
    #[case("0032B", false)]
    #[case("bad-id", false)]
    #[case("with space", false)]
    #[case("", false)]
    fn display_id_check(#[case] value: &str, #[case] accepted: bool) {
        assert_eq!(check_display_id(value).is_ok(), accepted, "{value}");
    }

    #[rstest]
    #[case("1", "1.3.1")]
    #[case("1.3.1", "2.0-beta")]
    #[case("1", "2.0-beta")]
    #[case("2.0-beta", "2.0")]
    #[case("1.9", "1.10")]
    #[case("1.0.0-alpha", "1.0.0-beta")]
    fn versions_order_semantically(#[case] lower: &str, #[case] higher: &str) {
        let lower = Version::parse(lower).expect("lower");
        let higher = Version::parse(higher).expect("higher");
        assert!(lower < higher, "{lower} < {higher}");
    }

    #[rstest]
    #[case("")]
    #[case("v1")]
    #[case("1..2")]
    #[case("1.2.3.4")]
    #[case("1.x")]
    fn rejects_malformed_versions(#[case] raw: &str) {
        assert!(Version::parse(raw).is_err(), "{raw}");
    }

    #[test]
    fn short_versions_equal_their_padded_form() {
        assert_eq!(
            Version::parse("1").expect("short"),
            Version::parse("1.0.0").expect("padded")
        );
    }

    #[test]
    fn increments_reset_lower_segments() {
        let version = Version::parse("1.2.3").expect("version");
        assert_eq!(version.increment_major().as_str(), "2.0.0");
        assert_eq!(version.increment_minor().as_str(), "1.3.0");
        assert_eq!(version.increment_patch().as_str(), "1.2.4");
        assert_eq!(
            Version::parse("1").expect("short").increment_patch().as_str(),
            "1.0.1"
        );
    }

    #[rstest]
    #[case("2024-03-01")]
    #[case("2024-03-01T12:30:00")]
    #[case("2024-03-01T12:30:00.250")]
    #[case("2024-03-01T12:30:00Z")]
    #[case("2024-03-01T12:30:00+02:00")]
    fn accepts_iso_timestamps(#[case] raw: &str) {
        assert!(Timestamp::parse(raw).is_ok(), "{raw}");
    }

    #[rstest]
    #[case("01/03/2024")]
    #[case("2024-13-01")]
    #[case("2024-03-01 12:30:00")]
    #[case("yesterday")]
    fn rejects_other_timestamps(#[case] raw: &str) {
        let err = Timestamp::parse(raw).expect_err("malformed timestamp");
        assert!(err.contains("ISO-8601"));
    }

    #[test]
    fn timestamp_variants_follow_the_input_shape() {
        assert!(matches!(
            Timestamp::parse("2024-03-01"),
            Ok(Timestamp::Date(_))
        ));
        assert!(matches!(
            Timestamp::parse("2024-03-01T08:00:00"),
            Ok(Timestamp::Local(_))
        ));
        assert!(matches!(
            Timestamp::parse("2024-03-01T08:00:00-05:00"),
            Ok(Timestamp::Offset(_))
        ));
    }
}
