use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use unscanny::Scanner;

/// One dot-separated segment of a pre-release or build component.
///
/// The parser commits to the tag once, at construction: a segment made up
/// entirely of ASCII digits with no leading zero becomes [`Identifier::Numeric`],
/// anything else stays [`Identifier::Alphanumeric`]. Zero-padded digit runs such
/// as `01` are kept textual rather than rejected, so they round-trip as written.
///
/// Numeric identifiers always have lower precedence than alphanumeric ones,
/// which the `Ord` implementation encodes directly. The derived ordering of
/// `Vec<Identifier>` then matches the SemVer rules for dotted sequences: the
/// first unequal position decides, and a strict prefix sorts below the longer
/// sequence.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Identifier {
    /// An all-digit segment, compared numerically
    Numeric(u64),
    /// A segment containing at least one non-digit, compared by ASCII code point
    Alphanumeric(String),
}

impl Identifier {
    /// Tag a segment whose characters are already known to be in `[0-9A-Za-z-]`.
    fn classify(text: &str) -> Result<Self, VersionParseError> {
        if text.bytes().all(|byte| byte.is_ascii_digit()) {
            if text.len() > 1 && text.starts_with('0') {
                // Zero-padded numeric identifiers stay textual so they format
                // back exactly as written
                return Ok(Self::Alphanumeric(text.to_string()));
            }
            return text
                .parse::<u64>()
                .map(Self::Numeric)
                .map_err(|_| ErrorKind::IdentifierTooLarge(text.to_string()).into());
        }
        Ok(Self::Alphanumeric(text.to_string()))
    }
}

impl FromStr for Identifier {
    type Err = VersionParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty()
            || !text
                .bytes()
                .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
        {
            return Err(ErrorKind::InvalidIdentifier(text.to_string()).into());
        }
        Self::classify(text)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(number) => write!(f, "{number}"),
            Self::Alphanumeric(string) => write!(f, "{string}"),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(n1), Self::Numeric(n2)) => n1.cmp(n2),
            (Self::Alphanumeric(s1), Self::Alphanumeric(s2)) => s1.cmp(s2),
            (Self::Numeric(_), Self::Alphanumeric(_)) => Ordering::Less,
            (Self::Alphanumeric(_), Self::Numeric(_)) => Ordering::Greater,
        }
    }
}

/// A semantic version such as `1.2.3` or `1.2.3-alpha.1+build.5`.
///
/// Versions are immutable once parsed and ordered by the SemVer precedence
/// rules: `major.minor.patch` numerically, then pre-release identifiers, while
/// build metadata is never inspected. Equality follows the same rules, so two
/// versions that differ only in build metadata compare equal.
///
/// Parse with [`Version::from_str`]:
///
/// ```rust
/// use std::str::FromStr;
/// use semver_rs::Version;
///
/// let version = Version::from_str("1.2.3-alpha.1").unwrap();
/// assert!(version < Version::from_str("1.2.3").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    /// The major version, incompatible API changes
    pub major: u64,
    /// The minor version, backwards compatible functionality
    pub minor: u64,
    /// The patch version, backwards compatible fixes
    pub patch: u64,
    /// The dot-separated pre-release identifiers, empty for a stable release
    ///
    /// A non-empty pre-release sorts below the plain `major.minor.patch`
    /// version, and its presence also changes range matching: pre-release
    /// versions only match ranges that opt into them.
    pub prerelease: Vec<Identifier>,
    /// The dot-separated build metadata identifiers behind `+`, if any
    ///
    /// Build metadata round-trips through formatting but never participates
    /// in comparison or equality.
    pub build: Vec<Identifier>,
}

impl Version {
    /// The lowest possible version, `0.0.0`
    pub const MIN: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
        prerelease: Vec::new(),
        build: Vec::new(),
    };

    /// Constructor for a plain release version such as `1.2.3`
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Set the pre-release identifiers
    #[must_use]
    pub fn with_prerelease(mut self, prerelease: Vec<Identifier>) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Set the build metadata identifiers
    #[must_use]
    pub fn with_build(mut self, build: Vec<Identifier>) -> Self {
        self.build = build;
        self
    }

    /// Parse a version string, equivalent to [`Version::from_str`]
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        text.parse()
    }

    /// Parse a version string, returning `None` instead of an error on
    /// invalid input
    pub fn try_parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Whether the string parses as a version
    pub fn can_parse(text: &str) -> bool {
        text.parse::<Self>().is_ok()
    }

    /// Whether this version carries pre-release identifiers
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Classify how `other` differs from this version, or `None` when the two
    /// are equal by precedence.
    ///
    /// The highest differing field decides, and the `pre*` variants apply
    /// whenever either side carries a pre-release:
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use semver_rs::{ReleaseType, Version};
    ///
    /// let version = Version::from_str("1.2.3").unwrap();
    /// let difference = version.difference(&Version::from_str("1.3.0").unwrap());
    /// assert_eq!(difference, Some(ReleaseType::Minor));
    /// ```
    pub fn difference(&self, other: &Version) -> Option<ReleaseType> {
        let prerelease = self.is_prerelease() || other.is_prerelease();
        if self.major != other.major {
            return Some(if prerelease {
                ReleaseType::Premajor
            } else {
                ReleaseType::Major
            });
        }
        if self.minor != other.minor {
            return Some(if prerelease {
                ReleaseType::Preminor
            } else {
                ReleaseType::Minor
            });
        }
        if self.patch != other.patch {
            return Some(if prerelease {
                ReleaseType::Prepatch
            } else {
                ReleaseType::Patch
            });
        }
        if self != other {
            return Some(ReleaseType::Prerelease);
        }
        None
    }

    /// Returns the version resulting from a bump by release type.
    ///
    /// Bumping `major`, `minor` or `patch` on a pre-release settles the
    /// pending release instead of skipping past it, so `1.2.3-alpha` bumped
    /// by patch is `1.2.3`. The `pre*` types start a `-0` pre-release on the
    /// bumped version, and `prerelease` on an existing pre-release increments
    /// its rightmost numeric identifier. Build metadata is carried over. A
    /// component already at `u64::MAX` saturates there instead of wrapping.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use semver_rs::{ReleaseType, Version};
    ///
    /// let version = Version::from_str("1.2.3").unwrap();
    /// assert_eq!(version.increment(ReleaseType::Minor).to_string(), "1.3.0");
    /// assert_eq!(version.increment(ReleaseType::Prerelease).to_string(), "1.2.4-0");
    /// ```
    pub fn increment(&self, release: ReleaseType) -> Version {
        self.increment_impl(release, None, None)
    }

    /// Like [`Version::increment`], but with a custom pre-release identifier
    /// and a build metadata override.
    ///
    /// The identifier restarts the pre-release series when it differs from the
    /// current one: `1.2.0-beta.1` bumped with identifier `beta` is
    /// `1.2.0-beta.2`, while identifier `rc` yields `1.2.0-rc.0`. Passing an
    /// empty build string clears the build metadata.
    pub fn increment_with(
        &self,
        release: ReleaseType,
        options: IncrementOptions<'_>,
    ) -> Result<Version, VersionParseError> {
        let identifier = options
            .prerelease
            .map(|text| text.parse::<Identifier>())
            .transpose()?;
        let build = match options.build {
            None => None,
            Some("") => Some(Vec::new()),
            Some(text) => {
                let mut s = Scanner::new(text);
                let build = parse_identifiers(&mut s, "build", '+')?;
                if !s.done() {
                    return Err(ErrorKind::UnexpectedEnd {
                        version: s.before().to_string(),
                        remaining: s.after().to_string(),
                    }
                    .into());
                }
                Some(build)
            }
        };
        Ok(self.increment_impl(release, identifier, build))
    }

    fn increment_impl(
        &self,
        release: ReleaseType,
        identifier: Option<Identifier>,
        build: Option<Vec<Identifier>>,
    ) -> Version {
        let build = build.unwrap_or_else(|| self.build.clone());
        let (major, minor, patch, prerelease) = match release {
            ReleaseType::Major => {
                // 1.0.0-alpha becomes 1.0.0, not 2.0.0
                if self.is_prerelease() && self.minor == 0 && self.patch == 0 {
                    (self.major, 0, 0, Vec::new())
                } else {
                    (self.major.saturating_add(1), 0, 0, Vec::new())
                }
            }
            ReleaseType::Minor => {
                if self.is_prerelease() && self.patch == 0 {
                    (self.major, self.minor, 0, Vec::new())
                } else {
                    (self.major, self.minor.saturating_add(1), 0, Vec::new())
                }
            }
            ReleaseType::Patch => {
                if self.is_prerelease() {
                    (self.major, self.minor, self.patch, Vec::new())
                } else {
                    (self.major, self.minor, self.patch.saturating_add(1), Vec::new())
                }
            }
            ReleaseType::Premajor => (
                self.major.saturating_add(1),
                0,
                0,
                initial_prerelease(identifier),
            ),
            ReleaseType::Preminor => (
                self.major,
                self.minor.saturating_add(1),
                0,
                initial_prerelease(identifier),
            ),
            ReleaseType::Prepatch => (
                self.major,
                self.minor,
                self.patch.saturating_add(1),
                initial_prerelease(identifier),
            ),
            ReleaseType::Prerelease => {
                if self.is_prerelease() {
                    (
                        self.major,
                        self.minor,
                        self.patch,
                        bump_prerelease(&self.prerelease, identifier),
                    )
                } else {
                    (
                        self.major,
                        self.minor,
                        self.patch.saturating_add(1),
                        initial_prerelease(identifier),
                    )
                }
            }
        };
        Version {
            major,
            minor,
            patch,
            prerelease,
            build,
        }
    }
}

/// The pre-release sequence a fresh `pre*` bump starts with
fn initial_prerelease(identifier: Option<Identifier>) -> Vec<Identifier> {
    match identifier {
        Some(identifier) => vec![identifier, Identifier::Numeric(0)],
        None => vec![Identifier::Numeric(0)],
    }
}

/// Increment the rightmost numeric identifier, or append a `0` when there is
/// none. A requested identifier that doesn't match the leading `name.number`
/// pair restarts the series at `<identifier>.0`.
fn bump_prerelease(prerelease: &[Identifier], identifier: Option<Identifier>) -> Vec<Identifier> {
    let mut values = prerelease.to_vec();
    let mut bumped = false;
    for value in values.iter_mut().rev() {
        if let Identifier::Numeric(number) = value {
            *value = Identifier::Numeric(number.saturating_add(1));
            bumped = true;
            break;
        }
    }
    if !bumped {
        values.push(Identifier::Numeric(0));
    }
    if let Some(identifier) = identifier {
        let continues_series = values.first() == Some(&identifier)
            && matches!(values.get(1), Some(Identifier::Numeric(_)));
        if !continues_series {
            values = vec![identifier, Identifier::Numeric(0)];
        }
    }
    values
}

/// Options for [`Version::increment_with`]
#[derive(Debug, Default, Clone, Copy)]
pub struct IncrementOptions<'a> {
    /// The pre-release identifier to use for the bumped version, such as
    /// `alpha` in `1.2.4-alpha.0`
    pub prerelease: Option<&'a str>,
    /// Replacement build metadata as a dotted identifier string; an empty
    /// string clears the build metadata of the result
    pub build: Option<&'a str>,
}

/// The release types, used to classify the difference between two versions
/// and as the step for [`Version::increment`]
#[derive(Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub enum ReleaseType {
    /// The major version differs, or is being bumped
    Major,
    /// A major difference involving a pre-release on either side
    Premajor,
    /// The minor version differs, or is being bumped
    Minor,
    /// A minor difference involving a pre-release on either side
    Preminor,
    /// The patch version differs, or is being bumped
    Patch,
    /// A patch difference involving a pre-release on either side
    Prepatch,
    /// Only the pre-release identifiers differ
    Prerelease,
}

impl FromStr for ReleaseType {
    type Err = ReleaseTypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "major" => Ok(Self::Major),
            "premajor" => Ok(Self::Premajor),
            "minor" => Ok(Self::Minor),
            "preminor" => Ok(Self::Preminor),
            "patch" => Ok(Self::Patch),
            "prepatch" => Ok(Self::Prepatch),
            "prerelease" => Ok(Self::Prerelease),
            other => Err(ReleaseTypeParseError {
                got: other.to_string(),
            }),
        }
    }
}

impl Display for ReleaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let release = match self {
            Self::Major => "major",
            Self::Premajor => "premajor",
            Self::Minor => "minor",
            Self::Preminor => "preminor",
            Self::Patch => "patch",
            Self::Prepatch => "prepatch",
            Self::Prerelease => "prerelease",
        };
        write!(f, "{release}")
    }
}

/// An error when a release type is not one of the seven known names
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseTypeParseError {
    pub(crate) got: String,
}

impl std::error::Error for ReleaseTypeParseError {}

impl Display for ReleaseTypeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No such release type `{}`, must be one of major, premajor, minor, preminor, patch, prepatch, prerelease",
            self.got
        )
    }
}

/// Shows the canonical version format; the exact inverse of parsing except
/// for zero-padded pre-release identifiers, which round-trip as written
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", join_identifiers(&self.prerelease))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", join_identifiers(&self.build))?;
        }
        Ok(())
    }
}

pub(crate) fn join_identifiers(identifiers: &[Identifier]) -> String {
    identifiers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(".")
}

impl PartialEq<Self> for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Custom implementation ignoring build metadata, because `PartialEq` does
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.hash(state);
    }
}

impl PartialOrd<Self> for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// 1.0.0-alpha < 1.0.0-alpha.1 < 1.0.0-alpha.beta < 1.0.0-beta
    /// < 1.0.0-beta.2 < 1.0.0-beta.11 < 1.0.0-rc.1 < 1.0.0
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| compare_prerelease(&self.prerelease, &other.prerelease))
    }
}

/// Compare pre-release sequences of versions with an equal release triple.
///
/// An empty sequence is the stable release and outranks every pre-release;
/// two non-empty sequences compare element-wise with the prefix rule, which
/// is exactly the derived ordering of `Vec<Identifier>`.
fn compare_prerelease(this: &[Identifier], other: &[Identifier]) -> Ordering {
    match (this.is_empty(), other.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => this.cmp(other),
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses a version such as `1.2.3`, `1.2.3-alpha.1` or `1.2.3+build.5`.
    ///
    /// The grammar is strict: exactly three numeric components without leading
    /// zeros, and no surrounding whitespace or `v` prefix.
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        if version.is_empty() {
            return Err(ErrorKind::Empty.into());
        }
        let mut s = Scanner::new(version);
        let major = parse_component(&mut s, "major")?;
        expect_dot(&mut s, "minor")?;
        let minor = parse_component(&mut s, "minor")?;
        expect_dot(&mut s, "patch")?;
        let patch = parse_component(&mut s, "patch")?;
        let prerelease = if s.eat_if('-') {
            parse_identifiers(&mut s, "pre-release", '-')?
        } else {
            Vec::new()
        };
        let build = if s.eat_if('+') {
            parse_identifiers(&mut s, "build", '+')?
        } else {
            Vec::new()
        };
        if !s.done() {
            return Err(ErrorKind::UnexpectedEnd {
                version: s.before().to_string(),
                remaining: s.after().to_string(),
            }
            .into());
        }
        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }
}

/// Eat one numeric version component, rejecting leading zeros
pub(crate) fn parse_component(
    s: &mut Scanner,
    component: &'static str,
) -> Result<u64, VersionParseError> {
    let digits = s.eat_while(|c: char| c.is_ascii_digit());
    if digits.is_empty() {
        return Err(ErrorKind::MissingComponent {
            component,
            got: s.after().to_string(),
        }
        .into());
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(ErrorKind::LeadingZero {
            component,
            text: digits.to_string(),
        }
        .into());
    }
    digits.parse::<u64>().map_err(|_| {
        ErrorKind::ComponentTooLarge {
            component,
            text: digits.to_string(),
        }
        .into()
    })
}

fn expect_dot(s: &mut Scanner, component: &'static str) -> Result<(), VersionParseError> {
    if s.eat_if('.') {
        Ok(())
    } else {
        Err(ErrorKind::MissingSeparator {
            component,
            got: s.after().to_string(),
        }
        .into())
    }
}

/// Eat a dotted identifier sequence for a pre-release (`kind` = "pre-release",
/// `precursor` = '-') or build (`kind` = "build", `precursor` = '+') component
pub(crate) fn parse_identifiers(
    s: &mut Scanner,
    kind: &'static str,
    precursor: char,
) -> Result<Vec<Identifier>, VersionParseError> {
    let mut identifiers = Vec::new();
    let mut precursor = precursor;
    loop {
        let part = s.eat_while(|c: char| c.is_ascii_alphanumeric() || c == '-');
        if part.is_empty() {
            return Err(ErrorKind::EmptyIdentifier { kind, precursor }.into());
        }
        identifiers.push(Identifier::classify(part)?);
        if !s.eat_if('.') {
            break;
        }
        precursor = '.';
    }
    Ok(identifiers)
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        FromStr::from_str(&string).map_err(de::Error::custom)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// An error when parsing a version string
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionParseError {
    // Boxed to keep the error, and with it every parse `Result`, small
    kind: Box<ErrorKind>,
}

impl std::error::Error for VersionParseError {}

impl Display for VersionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self.kind {
            ErrorKind::Empty => write!(f, "Version string is empty"),
            ErrorKind::MissingComponent { component, ref got } => {
                if got.is_empty() {
                    write!(
                        f,
                        "Unexpected end of version, expected a numeric {component} component"
                    )
                } else {
                    write!(
                        f,
                        "Expected a numeric {component} component, found `{got}`"
                    )
                }
            }
            ErrorKind::MissingSeparator { component, ref got } => {
                if got.is_empty() {
                    write!(
                        f,
                        "Unexpected end of version, expected a `.` before the {component} component"
                    )
                } else {
                    write!(
                        f,
                        "Expected a `.` before the {component} component, found `{got}`"
                    )
                }
            }
            ErrorKind::LeadingZero { component, ref text } => {
                write!(
                    f,
                    "The {component} component `{text}` must not have a leading zero"
                )
            }
            ErrorKind::ComponentTooLarge { component, ref text } => {
                write!(
                    f,
                    "The {component} component `{text}` does not fit in a 64-bit integer"
                )
            }
            ErrorKind::EmptyIdentifier { kind, precursor } => {
                write!(f, "Expected a {kind} identifier after `{precursor}`")
            }
            ErrorKind::InvalidIdentifier(ref text) => {
                write!(f, "`{text}` is not a valid identifier, expected `[0-9A-Za-z-]+`")
            }
            ErrorKind::IdentifierTooLarge(ref text) => {
                write!(
                    f,
                    "The numeric identifier `{text}` does not fit in a 64-bit integer"
                )
            }
            ErrorKind::UnexpectedEnd {
                ref version,
                ref remaining,
            } => {
                write!(
                    f,
                    "After parsing `{version}`, found `{remaining}`, which is not part of a valid version"
                )
            }
        }
    }
}

/// The specific kind of error that can occur when parsing a version
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ErrorKind {
    /// The input was empty
    Empty,
    /// A numeric component was missing where one was required
    MissingComponent {
        component: &'static str,
        got: String,
    },
    /// The `.` between two components was missing
    MissingSeparator {
        component: &'static str,
        got: String,
    },
    /// A numeric component had a leading zero
    LeadingZero {
        component: &'static str,
        text: String,
    },
    /// A numeric component overflowed a `u64`
    ComponentTooLarge {
        component: &'static str,
        text: String,
    },
    /// A pre-release or build identifier was empty
    EmptyIdentifier { kind: &'static str, precursor: char },
    /// An identifier contained characters outside `[0-9A-Za-z-]`
    InvalidIdentifier(String),
    /// An all-digit identifier overflowed a `u64`
    IdentifierTooLarge(String),
    /// The version was followed by trailing text
    UnexpectedEnd { version: String, remaining: String },
}

impl From<ErrorKind> for VersionParseError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_parse_valid() {
        let versions = [
            "0.0.0",
            "1.2.3",
            "10.20.30",
            "1.1.2-prerelease+meta",
            "1.1.2+meta",
            "1.1.2+meta-valid",
            "1.0.0-alpha",
            "1.0.0-beta",
            "1.0.0-alpha.beta",
            "1.0.0-alpha.1",
            "1.0.0-alpha.0valid",
            "1.0.0-rc.1+build.1",
            "1.2.3-beta",
            "10.2.3-DEV-SNAPSHOT",
            "1.2.3-SNAPSHOT-123",
            "2.0.0+build.1848",
            "2.0.1-alpha.1227",
            "1.0.0-alpha+beta",
            "1.2.3----RC-SNAPSHOT.12.9.1--.12+788",
            "1.0.0-0A.is.legal",
            "18446744073709551615.0.0",
        ];
        for version in versions {
            assert!(
                Version::from_str(version).is_ok(),
                "`{version}` should parse"
            );
        }
    }

    #[test]
    fn test_parse_invalid() {
        let versions = [
            "",
            "1",
            "1.2",
            "1.2.3.4",
            "1.2.3-",
            "1.2.3+",
            "1.2.3-+",
            "1.2.3-.",
            "1.2.3-alpha..beta",
            "1.2.3-alpha_beta",
            "01.2.3",
            "1.02.3",
            "1.2.03",
            "v1.2.3",
            "=1.2.3",
            " 1.2.3",
            "1.2.3 ",
            "1 .2.3",
            "a.b.c",
            "1.2.3-α",
            "-1.2.3",
            "18446744073709551616.0.0",
        ];
        for version in versions {
            assert!(
                Version::from_str(version).is_err(),
                "`{version}` should not parse"
            );
        }
    }

    #[test]
    fn test_parse_structure() {
        let version = Version::from_str("1.2.3-alpha.1.x-y+build.01.2").unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
        assert_eq!(
            version.prerelease,
            vec![
                Identifier::Alphanumeric("alpha".to_string()),
                Identifier::Numeric(1),
                Identifier::Alphanumeric("x-y".to_string()),
            ]
        );
        assert_eq!(
            version.build,
            vec![
                Identifier::Alphanumeric("build".to_string()),
                Identifier::Alphanumeric("01".to_string()),
                Identifier::Numeric(2),
            ]
        );
    }

    #[test]
    fn test_zero_padded_prerelease_stays_textual() {
        let version = Version::from_str("1.2.3-01").unwrap();
        assert_eq!(
            version.prerelease,
            vec![Identifier::Alphanumeric("01".to_string())]
        );
        // and round-trips as written
        assert_eq!(version.to_string(), "1.2.3-01");
        // a textual `01` outranks the numeric `1`
        assert!(Version::from_str("1.2.3-1").unwrap() < version);
    }

    #[test]
    fn test_format_round_trip() {
        let versions = [
            "0.0.0",
            "1.2.3",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta.2+build.5",
            "1.2.3+meta-valid",
            "1.2.3-01.alpha",
        ];
        for version in versions {
            assert_eq!(Version::from_str(version).unwrap().to_string(), version);
        }
    }

    #[test]
    fn test_precedence_chain() {
        // The ordering example of the SemVer specification, section 11
        let versions = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0",
            "2.0.0",
        ];
        let versions: Vec<Version> = versions
            .iter()
            .map(|version| Version::from_str(version).unwrap())
            .collect();
        for (index, lower) in versions.iter().enumerate() {
            for higher in &versions[index + 1..] {
                assert_eq!(lower.cmp(higher), Ordering::Less, "{lower} < {higher}");
                assert_eq!(higher.cmp(lower), Ordering::Greater, "{higher} > {lower}");
            }
            assert_eq!(lower.cmp(lower), Ordering::Equal);
        }
    }

    #[test]
    fn test_compare() {
        let less_than = [
            ("1.2.3", "1.2.4"),
            ("1.2.3", "1.3.0"),
            ("1.2.3", "2.0.0"),
            ("1.0.0-alpha", "1.0.0"),
            ("1.0.0-alpha", "1.0.0-alpha.1"),
            ("1.0.0-alpha.beta", "1.0.0-beta"),
            ("1.0.0-2", "1.0.0-11"),
            ("1.0.0-1", "1.0.0-alpha"),
        ];
        for (left, right) in less_than {
            let left = Version::from_str(left).unwrap();
            let right = Version::from_str(right).unwrap();
            assert!(left < right, "{left} < {right}");
            assert!(right > left, "{right} > {left}");
        }
    }

    #[test]
    fn test_build_metadata_ignored() {
        let plain = Version::from_str("1.2.3").unwrap();
        let with_build = Version::from_str("1.2.3+build.42").unwrap();
        let other_build = Version::from_str("1.2.3+other").unwrap();
        assert_eq!(plain, with_build);
        assert_eq!(with_build, other_build);
        assert_eq!(with_build.cmp(&other_build), Ordering::Equal);

        let hash = |version: &Version| {
            let mut hasher = DefaultHasher::new();
            version.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&with_build), hash(&other_build));
    }

    #[test]
    fn test_can_parse() {
        assert!(Version::can_parse("1.2.3"));
        assert!(!Version::can_parse("invalid"));
        assert!(!Version::can_parse("1.2.3.4"));
    }

    #[test]
    fn test_try_parse() {
        assert_eq!(
            Version::try_parse("1.2.3"),
            Some(Version::new(1, 2, 3))
        );
        assert_eq!(Version::try_parse(" invalid "), None);
    }

    #[test]
    fn test_min() {
        assert_eq!(Version::MIN, Version::from_str("0.0.0").unwrap());
        assert!(Version::MIN < Version::from_str("0.0.1").unwrap());
        // 0.0.0 pre-releases still sort below MIN
        assert!(Version::from_str("0.0.0-0").unwrap() < Version::MIN);
    }

    #[test]
    fn test_difference() {
        let difference = |left: &str, right: &str| {
            Version::from_str(left)
                .unwrap()
                .difference(&Version::from_str(right).unwrap())
        };
        assert_eq!(difference("1.2.3", "1.2.4"), Some(ReleaseType::Patch));
        assert_eq!(difference("1.2.3", "1.3.0"), Some(ReleaseType::Minor));
        assert_eq!(difference("1.2.3", "2.0.0"), Some(ReleaseType::Major));
        assert_eq!(difference("1.2.3", "1.2.3"), None);
        assert_eq!(difference("1.2.3+a", "1.2.3+b"), None);
        assert_eq!(difference("1.2.3", "2.0.0-alpha"), Some(ReleaseType::Premajor));
        assert_eq!(difference("1.2.3", "1.3.0-alpha"), Some(ReleaseType::Preminor));
        assert_eq!(difference("1.2.3-alpha", "1.2.4"), Some(ReleaseType::Prepatch));
        assert_eq!(
            difference("1.2.3-alpha", "1.2.3-beta"),
            Some(ReleaseType::Prerelease)
        );
    }

    #[test]
    fn test_increment() {
        let increment = |version: &str, release: ReleaseType| {
            Version::from_str(version).unwrap().increment(release).to_string()
        };
        assert_eq!(increment("1.2.3", ReleaseType::Major), "2.0.0");
        assert_eq!(increment("1.2.3", ReleaseType::Minor), "1.3.0");
        assert_eq!(increment("1.2.3", ReleaseType::Patch), "1.2.4");
        assert_eq!(increment("1.2.3", ReleaseType::Premajor), "2.0.0-0");
        assert_eq!(increment("1.2.3", ReleaseType::Preminor), "1.3.0-0");
        assert_eq!(increment("1.2.3", ReleaseType::Prepatch), "1.2.4-0");
        assert_eq!(increment("1.2.3", ReleaseType::Prerelease), "1.2.4-0");

        // a pending pre-release settles instead of skipping a version
        assert_eq!(increment("1.0.0-alpha", ReleaseType::Major), "1.0.0");
        assert_eq!(increment("1.2.0-alpha", ReleaseType::Minor), "1.2.0");
        assert_eq!(increment("1.2.3-alpha", ReleaseType::Patch), "1.2.3");
        assert_eq!(increment("1.0.1-alpha", ReleaseType::Major), "2.0.0");

        // prerelease bumps the rightmost numeric identifier
        assert_eq!(increment("1.2.3-beta.0", ReleaseType::Prerelease), "1.2.3-beta.1");
        assert_eq!(increment("1.2.3-beta", ReleaseType::Prerelease), "1.2.3-beta.0");
        assert_eq!(
            increment("1.2.3-beta.1.alpha", ReleaseType::Prerelease),
            "1.2.3-beta.2.alpha"
        );

        // build metadata carries over
        assert_eq!(increment("1.2.3+build.5", ReleaseType::Patch), "1.2.4+build.5");

        // components at the numeric ceiling saturate instead of wrapping
        let max = "18446744073709551615";
        assert_eq!(
            increment(&format!("{max}.0.0"), ReleaseType::Major),
            format!("{max}.0.0")
        );
        assert_eq!(
            increment(&format!("1.2.{max}"), ReleaseType::Prepatch),
            format!("1.2.{max}-0")
        );
        assert_eq!(
            increment(&format!("1.2.3-{max}"), ReleaseType::Prerelease),
            format!("1.2.3-{max}")
        );
    }

    #[test]
    fn test_increment_with() {
        let version = Version::from_str("1.2.3").unwrap();
        let incremented = version
            .increment_with(
                ReleaseType::Prerelease,
                IncrementOptions {
                    prerelease: Some("alpha"),
                    build: None,
                },
            )
            .unwrap();
        assert_eq!(incremented.to_string(), "1.2.4-alpha.0");

        // the same identifier continues the series, a new one restarts it
        let beta = Version::from_str("1.2.0-beta.1").unwrap();
        let options = |identifier| IncrementOptions {
            prerelease: Some(identifier),
            build: None,
        };
        assert_eq!(
            beta.increment_with(ReleaseType::Prerelease, options("beta"))
                .unwrap()
                .to_string(),
            "1.2.0-beta.2"
        );
        assert_eq!(
            beta.increment_with(ReleaseType::Prerelease, options("rc"))
                .unwrap()
                .to_string(),
            "1.2.0-rc.0"
        );

        // build metadata can be replaced or cleared
        let built = Version::from_str("1.2.3+build.5").unwrap();
        assert_eq!(
            built
                .increment_with(
                    ReleaseType::Patch,
                    IncrementOptions {
                        prerelease: None,
                        build: Some("nightly.1"),
                    }
                )
                .unwrap()
                .to_string(),
            "1.2.4+nightly.1"
        );
        assert_eq!(
            built
                .increment_with(
                    ReleaseType::Patch,
                    IncrementOptions {
                        prerelease: None,
                        build: Some(""),
                    }
                )
                .unwrap()
                .to_string(),
            "1.2.4"
        );

        // invalid identifiers are parse errors, not panics
        assert!(
            version
                .increment_with(ReleaseType::Prerelease, options("al pha"))
                .is_err()
        );
    }

    #[test]
    fn test_release_type_str() {
        for release in [
            ReleaseType::Major,
            ReleaseType::Premajor,
            ReleaseType::Minor,
            ReleaseType::Preminor,
            ReleaseType::Patch,
            ReleaseType::Prepatch,
            ReleaseType::Prerelease,
        ] {
            assert_eq!(
                ReleaseType::from_str(&release.to_string()).unwrap(),
                release
            );
        }
        assert_eq!(
            ReleaseType::from_str("majour").unwrap_err().to_string(),
            "No such release type `majour`, must be one of major, premajor, minor, preminor, patch, prepatch, prerelease"
        );
    }

    #[test]
    fn test_error_messages() {
        let cases = [
            ("", "Version string is empty"),
            (
                "bogus",
                "Expected a numeric major component, found `bogus`",
            ),
            (
                "1",
                "Unexpected end of version, expected a `.` before the minor component",
            ),
            (
                "1.2",
                "Unexpected end of version, expected a `.` before the patch component",
            ),
            (
                "1-2.3",
                "Expected a `.` before the minor component, found `-2.3`",
            ),
            (
                "01.2.3",
                "The major component `01` must not have a leading zero",
            ),
            (
                "18446744073709551616.0.0",
                "The major component `18446744073709551616` does not fit in a 64-bit integer",
            ),
            (
                "1.2.3-",
                "Expected a pre-release identifier after `-`",
            ),
            (
                "1.2.3-alpha..beta",
                "Expected a pre-release identifier after `.`",
            ),
            (
                "1.2.3+",
                "Expected a build identifier after `+`",
            ),
            (
                "1.2.3.4",
                "After parsing `1.2.3`, found `.4`, which is not part of a valid version",
            ),
            (
                "1.2.3-alpha_beta",
                "After parsing `1.2.3-alpha`, found `_beta`, which is not part of a valid version",
            ),
        ];
        for (version, message) in cases {
            assert_eq!(
                Version::from_str(version).unwrap_err().to_string(),
                message,
                "`{version}`"
            );
        }
    }

    #[test]
    fn test_identifier_from_str() {
        assert_eq!(
            Identifier::from_str("42").unwrap(),
            Identifier::Numeric(42)
        );
        assert_eq!(
            Identifier::from_str("042").unwrap(),
            Identifier::Alphanumeric("042".to_string())
        );
        assert_eq!(
            Identifier::from_str("rc-1").unwrap(),
            Identifier::Alphanumeric("rc-1".to_string())
        );
        assert!(Identifier::from_str("").is_err());
        assert!(Identifier::from_str("nope!").is_err());
    }
}
