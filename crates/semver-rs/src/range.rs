use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Bound, Deref};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use unscanny::Scanner;

use crate::version::{self, Identifier, Version, VersionParseError};

/// One of `=` `<` `<=` `>` `>=`
#[derive(Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub enum Operator {
    /// `=1.2.3`, also what a bare version in a range means
    Equal,
    /// `<1.2.3`
    LessThan,
    /// `<=1.2.3`
    LessThanEqual,
    /// `>1.2.3`
    GreaterThan,
    /// `>=1.2.3`
    GreaterThanEqual,
}

impl FromStr for Operator {
    type Err = OperatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Self::Equal),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessThanEqual),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterThanEqual),
            other => Err(OperatorParseError {
                got: other.to_string(),
            }),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
        };
        write!(f, "{operator}")
    }
}

/// An error when an operator is not one of `=` `<` `<=` `>` `>=`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorParseError {
    pub(crate) got: String,
}

impl std::error::Error for OperatorParseError {}

impl Display for OperatorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No such comparison operator `{}`, must be one of = < <= > >=",
            self.got
        )
    }
}

/// A single operator-plus-version constraint such as `>=1.2.3`.
///
/// Comparators are the primitives that ranges are made of; the range parser
/// desugars every convenience (wildcards, `~`, `^`, hyphen ranges) down to
/// them. Parse one directly with [`Comparator::from_str`], which accepts an
/// optional operator (defaulting to `=`) followed by a complete version:
///
/// ```rust
/// use std::str::FromStr;
/// use semver_rs::{Comparator, Version};
///
/// let comparator = Comparator::from_str(">=1.2.3").unwrap();
/// assert!(comparator.matches(&Version::from_str("1.3.0").unwrap()));
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Comparator {
    /// The operator to compare candidate versions with
    pub operator: Operator,
    /// The version on the right-hand side of the operator
    pub version: Version,
}

impl Comparator {
    /// Build a comparator from its parts
    pub fn new(operator: Operator, version: Version) -> Self {
        Self { operator, version }
    }

    /// Whether the version fulfills this single comparator under the
    /// precedence order.
    ///
    /// This is the raw operator test; the pre-release opt-in policy lives in
    /// [`Range::contains`], where the surrounding group is known.
    pub fn matches(&self, version: &Version) -> bool {
        match self.operator {
            Operator::Equal => version == &self.version,
            Operator::LessThan => version < &self.version,
            Operator::LessThanEqual => version <= &self.version,
            Operator::GreaterThan => version > &self.version,
            Operator::GreaterThanEqual => version >= &self.version,
        }
    }

    /// The lower bound this comparator places on matching versions
    pub(crate) fn lower_bound(&self) -> Bound<&Version> {
        match self.operator {
            Operator::GreaterThan => Bound::Excluded(&self.version),
            Operator::GreaterThanEqual | Operator::Equal => Bound::Included(&self.version),
            Operator::LessThan | Operator::LessThanEqual => Bound::Unbounded,
        }
    }

    /// The upper bound this comparator places on matching versions
    pub(crate) fn upper_bound(&self) -> Bound<&Version> {
        match self.operator {
            Operator::LessThan => Bound::Excluded(&self.version),
            Operator::LessThanEqual | Operator::Equal => Bound::Included(&self.version),
            Operator::GreaterThan | Operator::GreaterThanEqual => Bound::Unbounded,
        }
    }
}

impl FromStr for Comparator {
    type Err = ComparatorParseError;

    /// Parses a primitive comparator such as `>=1.2.3` or `1.0.0-alpha`.
    ///
    /// The version must be complete; wildcard, tilde, caret and hyphen sugar
    /// belong to the range grammar and are rejected here.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut s = Scanner::new(text);
        let operator = s.eat_while(['<', '>', '=', '~', '^']);
        let operator = if operator.is_empty() {
            Operator::Equal
        } else {
            Operator::from_str(operator).map_err(ParseErrorKind::InvalidOperator)?
        };
        let version = s.after();
        if version.is_empty() {
            return Err(ParseErrorKind::MissingVersion.into());
        }
        let version = Version::from_str(version).map_err(ParseErrorKind::InvalidVersion)?;
        Ok(Self { operator, version })
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Comparator {
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
impl Serialize for Comparator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A version range such as `>=1.2.7 <1.3.0 || 2.x`.
///
/// A range is a disjunction of comparator groups: the groups separated by
/// `||` are OR-combined, and the whitespace-separated comparators inside a
/// group are AND-combined. Wildcard (`1.x`), tilde (`~1.2.3`), caret
/// (`^1.2.3`) and hyphen (`1.2.3 - 2.3.4`) terms are desugared to primitive
/// comparators during parsing, so the parsed structure only ever holds the
/// five primitive operators.
///
/// ```rust
/// use std::str::FromStr;
/// use semver_rs::{Range, Version};
///
/// let range = Range::from_str(">=1.2.7 <1.3.0").unwrap();
/// assert!(range.contains(&Version::from_str("1.2.8").unwrap()));
/// assert!(!range.contains(&Version::from_str("1.3.0").unwrap()));
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Range(Vec<Vec<Comparator>>);

impl Deref for Range {
    type Target = [Vec<Comparator>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Range {
    /// Parse a range string, equivalent to [`Range::from_str`]
    pub fn parse(text: &str) -> Result<Self, RangeParseError> {
        text.parse()
    }

    /// Parse a range string, returning `None` instead of an error on invalid
    /// input
    pub fn try_parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Whether the version satisfies this range.
    ///
    /// True when every comparator of at least one group matches. A version
    /// carrying a pre-release is additionally required to be opted in by the
    /// matching group: some comparator there must itself carry a pre-release
    /// on the same `major.minor.patch` triple. This keeps `3.4.5-alpha.9` out
    /// of `>1.2.3-alpha.3` even though it is greater by precedence.
    pub fn contains(&self, version: &Version) -> bool {
        self.0.iter().any(|group| group_matches(group, version))
    }

    /// Whether this range and `other` can both be satisfied by some version.
    ///
    /// ```rust
    /// use std::str::FromStr;
    /// use semver_rs::Range;
    ///
    /// let range = Range::from_str(">=1.0.0 <2.0.0").unwrap();
    /// assert!(range.intersects(&Range::from_str(">=1.2.3 <1.2.4").unwrap()));
    /// assert!(!range.intersects(&Range::from_str(">=2.0.0").unwrap()));
    /// ```
    pub fn intersects(&self, other: &Range) -> bool {
        self.0.iter().any(|left| {
            other
                .0
                .iter()
                .any(|right| groups_intersect(left, right))
        })
    }

    /// Whether every version that can satisfy this range is strictly below
    /// `version`.
    ///
    /// Each group must have an upper bound that `version` exceeds; a group
    /// without one can be satisfied by arbitrarily high versions, making the
    /// answer `false`. Note that a range with a gap in the middle leaves
    /// versions inside the gap neither contained, entirely above, nor
    /// entirely below.
    pub fn entirely_below(&self, version: &Version) -> bool {
        self.0.iter().all(|group| {
            let mut upper: Bound<&Version> = Bound::Unbounded;
            for comparator in group {
                upper = tighten_upper(upper, comparator.upper_bound());
            }
            match upper {
                Bound::Unbounded => false,
                Bound::Included(high) => version > high,
                Bound::Excluded(high) => version >= high,
            }
        })
    }

    /// Whether every version that can satisfy this range is strictly above
    /// `version`, the mirror of [`Range::entirely_below`]
    pub fn entirely_above(&self, version: &Version) -> bool {
        self.0.iter().all(|group| {
            let mut lower: Bound<&Version> = Bound::Unbounded;
            for comparator in group {
                lower = tighten_lower(lower, comparator.lower_bound());
            }
            match lower {
                Bound::Unbounded => false,
                Bound::Included(low) => version < low,
                Bound::Excluded(low) => version <= low,
            }
        })
    }

    /// The highest of the given versions that satisfies this range, if any
    pub fn max_satisfying<'a>(&self, versions: &'a [Version]) -> Option<&'a Version> {
        versions.iter().filter(|version| self.contains(version)).max()
    }

    /// The lowest of the given versions that satisfies this range, if any
    pub fn min_satisfying<'a>(&self, versions: &'a [Version]) -> Option<&'a Version> {
        versions.iter().filter(|version| self.contains(version)).min()
    }
}

fn group_matches(group: &[Comparator], version: &Version) -> bool {
    if !group.iter().all(|comparator| comparator.matches(version)) {
        return false;
    }
    if version.is_prerelease() {
        // Pre-release versions are opt-in: the group must pin a pre-release
        // on the same major.minor.patch triple
        return group.iter().any(|comparator| {
            comparator.version.is_prerelease()
                && comparator.version.major == version.major
                && comparator.version.minor == version.minor
                && comparator.version.patch == version.patch
        });
    }
    true
}

fn groups_intersect(left: &[Comparator], right: &[Comparator]) -> bool {
    let mut lower: Bound<&Version> = Bound::Unbounded;
    let mut upper: Bound<&Version> = Bound::Unbounded;
    for comparator in left.iter().chain(right) {
        lower = tighten_lower(lower, comparator.lower_bound());
        upper = tighten_upper(upper, comparator.upper_bound());
    }
    match (lower, upper) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
        (Bound::Included(low), Bound::Included(high)) => low <= high,
        (Bound::Included(low), Bound::Excluded(high))
        | (Bound::Excluded(low), Bound::Included(high))
        | (Bound::Excluded(low), Bound::Excluded(high)) => low < high,
    }
}

/// The tighter of two lower bounds; on a value tie the exclusive bound wins
fn tighten_lower<'a>(current: Bound<&'a Version>, candidate: Bound<&'a Version>) -> Bound<&'a Version> {
    let (cur, cur_strict) = match current {
        Bound::Unbounded => return candidate,
        Bound::Included(version) => (version, false),
        Bound::Excluded(version) => (version, true),
    };
    let (cand, cand_strict) = match candidate {
        Bound::Unbounded => return current,
        Bound::Included(version) => (version, false),
        Bound::Excluded(version) => (version, true),
    };
    match cur.cmp(cand) {
        Ordering::Less => candidate,
        Ordering::Greater => current,
        Ordering::Equal if cand_strict && !cur_strict => candidate,
        Ordering::Equal => current,
    }
}

/// The tighter of two upper bounds; on a value tie the exclusive bound wins
fn tighten_upper<'a>(current: Bound<&'a Version>, candidate: Bound<&'a Version>) -> Bound<&'a Version> {
    let (cur, cur_strict) = match current {
        Bound::Unbounded => return candidate,
        Bound::Included(version) => (version, false),
        Bound::Excluded(version) => (version, true),
    };
    let (cand, cand_strict) = match candidate {
        Bound::Unbounded => return current,
        Bound::Included(version) => (version, false),
        Bound::Excluded(version) => (version, true),
    };
    match cur.cmp(cand) {
        Ordering::Less => current,
        Ordering::Greater => candidate,
        Ordering::Equal if cand_strict && !cur_strict => candidate,
        Ordering::Equal => current,
    }
}

impl FromStr for Range {
    type Err = RangeParseError;

    /// Parses a range such as `>=1.2.7 <1.3.0`, `^1.2.3 || 2.x` or
    /// `1.2.3 - 2.3.4`
    fn from_str(range: &str) -> Result<Self, Self::Err> {
        let mut groups = Vec::new();
        let mut start: usize = 0;
        let separator = "||";
        for group in range.split(separator) {
            match parse_comparator_group(group) {
                Err(err) => {
                    return Err(RangeParseError {
                        inner: Box::new(RangeParseErrorInner {
                            err,
                            line: range.to_string(),
                            start,
                            end: start + group.len(),
                        }),
                    });
                }
                Ok(comparators) => {
                    groups.push(comparators);
                }
            }
            start += group.len();
            start += separator.len();
        }
        Ok(Self(groups))
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, group) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " || ")?;
            }
            for (position, comparator) in group.iter().enumerate() {
                if position > 0 {
                    write!(f, " ")?;
                }
                // the `=` stays implicit only where reparsing is unambiguous
                if comparator.operator == Operator::Equal && group.len() == 1 {
                    write!(f, "{}", comparator.version)?;
                } else {
                    write!(f, "{comparator}")?;
                }
            }
        }
        Ok(())
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Range {
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
impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Parse one `||` branch: whitespace-separated comparator terms and hyphen
/// ranges
fn parse_comparator_group(text: &str) -> Result<Vec<Comparator>, ComparatorParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ParseErrorKind::EmptyGroup.into());
    }
    let mut comparators = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        if tokens[index] == "-" {
            return Err(ParseErrorKind::DanglingHyphen.into());
        }
        if tokens.get(index + 1) == Some(&"-") {
            let Some(upper) = tokens.get(index + 2) else {
                return Err(ParseErrorKind::DanglingHyphen.into());
            };
            parse_hyphen(tokens[index], upper, &mut comparators)?;
            index += 3;
        } else {
            parse_term(tokens[index], &mut comparators)?;
            index += 1;
        }
    }
    Ok(comparators)
}

/// The sugar level of a single term, before desugaring
enum Sugar {
    Primitive(Operator),
    Tilde,
    Caret,
}

/// A version with wildcard or omitted components, as written in range terms.
/// `None` stands for `x`, `X`, `*` or an omitted trailing component.
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    prerelease: Vec<Identifier>,
    build: Vec<Identifier>,
}

impl Partial {
    /// The version of a partial whose three components are all present
    fn into_version(self, major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major,
            minor,
            patch,
            prerelease: self.prerelease,
            build: self.build,
        }
    }
}

fn parse_term(term: &str, comparators: &mut Vec<Comparator>) -> Result<(), ComparatorParseError> {
    let mut s = Scanner::new(term);
    let operator = s.eat_while(['<', '>', '=', '~', '^']);
    let sugar = match operator {
        "" | "=" => Sugar::Primitive(Operator::Equal),
        "<" => Sugar::Primitive(Operator::LessThan),
        "<=" => Sugar::Primitive(Operator::LessThanEqual),
        ">" => Sugar::Primitive(Operator::GreaterThan),
        ">=" => Sugar::Primitive(Operator::GreaterThanEqual),
        "~" => Sugar::Tilde,
        "^" => Sugar::Caret,
        other => {
            return Err(ParseErrorKind::InvalidOperator(OperatorParseError {
                got: other.to_string(),
            })
            .into());
        }
    };
    let rest = s.after();
    if rest.is_empty() {
        return Err(ParseErrorKind::MissingVersion.into());
    }
    let partial = parse_partial(rest)?;
    #[cfg(feature = "tracing")]
    {
        if !partial.build.is_empty() {
            tracing::warn!("Build metadata in `{term}` is ignored when matching versions");
        }
    }
    desugar(sugar, partial, comparators)
}

fn parse_partial(text: &str) -> Result<Partial, ComparatorParseError> {
    let mut s = Scanner::new(text);
    let major = parse_wildcard_component(&mut s, "major")?;
    let mut partial = Partial {
        major,
        minor: None,
        patch: None,
        prerelease: Vec::new(),
        build: Vec::new(),
    };
    if s.eat_if('.') {
        partial.minor = parse_wildcard_component(&mut s, "minor")?;
        if s.eat_if('.') {
            partial.patch = parse_wildcard_component(&mut s, "patch")?;
            // the qualifier is only valid behind a full three-component tuple
            if s.eat_if('-') {
                partial.prerelease = version::parse_identifiers(&mut s, "pre-release", '-')
                    .map_err(ParseErrorKind::InvalidVersion)?;
            }
            if s.eat_if('+') {
                partial.build = version::parse_identifiers(&mut s, "build", '+')
                    .map_err(ParseErrorKind::InvalidVersion)?;
            }
        }
    }
    if !s.done() {
        return Err(ParseErrorKind::InvalidVersion(
            version::ErrorKind::UnexpectedEnd {
                version: s.before().to_string(),
                remaining: s.after().to_string(),
            }
            .into(),
        )
        .into());
    }
    Ok(partial)
}

/// Eat one version component that may also be a wildcard (`x`, `X` or `*`)
fn parse_wildcard_component(
    s: &mut Scanner,
    component: &'static str,
) -> Result<Option<u64>, ComparatorParseError> {
    if s.eat_if('x') || s.eat_if('X') || s.eat_if('*') {
        return Ok(None);
    }
    version::parse_component(s, component)
        .map(Some)
        .map_err(|err| ParseErrorKind::InvalidVersion(err).into())
}

fn ge(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(Operator::GreaterThanEqual, Version::new(major, minor, patch))
}

fn lt(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(Operator::LessThan, Version::new(major, minor, patch))
}

/// The successor of a component, needed wherever a partial term implies a
/// bound at the next release; a component at `u64::MAX` has no successor
fn bump(component: &'static str, value: u64) -> Result<u64, ComparatorParseError> {
    value
        .checked_add(1)
        .ok_or_else(|| ParseErrorKind::BoundOverflow { component, value }.into())
}

/// Expand one term into its primitive comparators.
///
/// A wildcard component makes everything below it a wildcard as well; the
/// qualifier of a wildcard term carries no meaning and is dropped. A term
/// that can match nothing (such as `>*`) becomes `<0.0.0`. Terms whose
/// expansion needs the successor of a `u64::MAX` component are rejected.
fn desugar(
    sugar: Sugar,
    partial: Partial,
    comparators: &mut Vec<Comparator>,
) -> Result<(), ComparatorParseError> {
    let components = (partial.major, partial.minor, partial.patch);
    match sugar {
        Sugar::Primitive(Operator::Equal) => match components {
            (None, _, _) => comparators.push(ge(0, 0, 0)),
            (Some(major), None, _) => {
                let upper = lt(bump("major", major)?, 0, 0);
                comparators.push(ge(major, 0, 0));
                comparators.push(upper);
            }
            (Some(major), Some(minor), None) => {
                let upper = lt(major, bump("minor", minor)?, 0);
                comparators.push(ge(major, minor, 0));
                comparators.push(upper);
            }
            (Some(major), Some(minor), Some(patch)) => {
                comparators.push(Comparator::new(
                    Operator::Equal,
                    partial.into_version(major, minor, patch),
                ));
            }
        },
        Sugar::Primitive(Operator::GreaterThan) => match components {
            (None, _, _) => comparators.push(lt(0, 0, 0)),
            (Some(major), None, _) => comparators.push(ge(bump("major", major)?, 0, 0)),
            (Some(major), Some(minor), None) => {
                comparators.push(ge(major, bump("minor", minor)?, 0));
            }
            (Some(major), Some(minor), Some(patch)) => {
                comparators.push(Comparator::new(
                    Operator::GreaterThan,
                    partial.into_version(major, minor, patch),
                ));
            }
        },
        Sugar::Primitive(Operator::GreaterThanEqual) => match components {
            (None, _, _) => comparators.push(ge(0, 0, 0)),
            (Some(major), None, _) => comparators.push(ge(major, 0, 0)),
            (Some(major), Some(minor), None) => comparators.push(ge(major, minor, 0)),
            (Some(major), Some(minor), Some(patch)) => {
                comparators.push(Comparator::new(
                    Operator::GreaterThanEqual,
                    partial.into_version(major, minor, patch),
                ));
            }
        },
        Sugar::Primitive(Operator::LessThan) => match components {
            (None, _, _) => comparators.push(lt(0, 0, 0)),
            (Some(major), None, _) => comparators.push(lt(major, 0, 0)),
            (Some(major), Some(minor), None) => comparators.push(lt(major, minor, 0)),
            (Some(major), Some(minor), Some(patch)) => {
                comparators.push(Comparator::new(
                    Operator::LessThan,
                    partial.into_version(major, minor, patch),
                ));
            }
        },
        Sugar::Primitive(Operator::LessThanEqual) => match components {
            (None, _, _) => comparators.push(ge(0, 0, 0)),
            (Some(major), None, _) => comparators.push(lt(bump("major", major)?, 0, 0)),
            (Some(major), Some(minor), None) => {
                comparators.push(lt(major, bump("minor", minor)?, 0));
            }
            (Some(major), Some(minor), Some(patch)) => {
                comparators.push(Comparator::new(
                    Operator::LessThanEqual,
                    partial.into_version(major, minor, patch),
                ));
            }
        },
        Sugar::Tilde => match components {
            (None, _, _) => comparators.push(ge(0, 0, 0)),
            (Some(major), None, _) => {
                let upper = lt(bump("major", major)?, 0, 0);
                comparators.push(ge(major, 0, 0));
                comparators.push(upper);
            }
            (Some(major), Some(minor), None) => {
                let upper = lt(major, bump("minor", minor)?, 0);
                comparators.push(ge(major, minor, 0));
                comparators.push(upper);
            }
            (Some(major), Some(minor), Some(patch)) => {
                let upper = lt(major, bump("minor", minor)?, 0);
                comparators.push(Comparator::new(
                    Operator::GreaterThanEqual,
                    partial.into_version(major, minor, patch),
                ));
                comparators.push(upper);
            }
        },
        Sugar::Caret => match components {
            (None, _, _) => comparators.push(ge(0, 0, 0)),
            (Some(major), None, _) => {
                let upper = lt(bump("major", major)?, 0, 0);
                comparators.push(ge(major, 0, 0));
                comparators.push(upper);
            }
            (Some(0), Some(minor), None) => {
                let upper = lt(0, bump("minor", minor)?, 0);
                comparators.push(ge(0, minor, 0));
                comparators.push(upper);
            }
            (Some(major), Some(minor), None) => {
                let upper = lt(bump("major", major)?, 0, 0);
                comparators.push(ge(major, minor, 0));
                comparators.push(upper);
            }
            (Some(major), Some(minor), Some(patch)) => {
                // the upper bound sits behind the left-most non-zero component
                let upper = if major > 0 {
                    lt(bump("major", major)?, 0, 0)
                } else if minor > 0 {
                    lt(0, bump("minor", minor)?, 0)
                } else {
                    lt(0, 0, bump("patch", patch)?)
                };
                comparators.push(Comparator::new(
                    Operator::GreaterThanEqual,
                    partial.into_version(major, minor, patch),
                ));
                comparators.push(upper);
            }
        },
    }
    Ok(())
}

/// Expand `A - B` into its bounds; a partial `A` fills with zeros, a partial
/// `B` excludes the next release boundary
fn parse_hyphen(
    lower: &str,
    upper: &str,
    comparators: &mut Vec<Comparator>,
) -> Result<(), ComparatorParseError> {
    let low = parse_partial(lower)?;
    let high = parse_partial(upper)?;
    let before = comparators.len();
    match (low.major, low.minor, low.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(ge(major, 0, 0)),
        (Some(major), Some(minor), None) => comparators.push(ge(major, minor, 0)),
        (Some(major), Some(minor), Some(patch)) => {
            comparators.push(Comparator::new(
                Operator::GreaterThanEqual,
                low.into_version(major, minor, patch),
            ));
        }
    }
    match (high.major, high.minor, high.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(lt(bump("major", major)?, 0, 0)),
        (Some(major), Some(minor), None) => {
            comparators.push(lt(major, bump("minor", minor)?, 0));
        }
        (Some(major), Some(minor), Some(patch)) => {
            comparators.push(Comparator::new(
                Operator::LessThanEqual,
                high.into_version(major, minor, patch),
            ));
        }
    }
    if comparators.len() == before {
        // `* - *` still has to produce a group that spans everything
        comparators.push(ge(0, 0, 0));
    }
    Ok(())
}

/// An error when parsing a single comparator term
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparatorParseError {
    // Boxed to keep the error, and with it every parse `Result`, small
    kind: Box<ParseErrorKind>,
}

impl std::error::Error for ComparatorParseError {}

impl Display for ComparatorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Nested errors are rendered into the message instead of being
        // exposed through source(), which keeps the error self-contained
        match *self.kind {
            ParseErrorKind::InvalidOperator(ref err) => err.fmt(f),
            ParseErrorKind::InvalidVersion(ref err) => err.fmt(f),
            ParseErrorKind::MissingVersion => {
                write!(f, "Unexpected end of range term, expected a version")
            }
            ParseErrorKind::EmptyGroup => {
                write!(
                    f,
                    "Range groups separated by `||` must contain at least one comparator"
                )
            }
            ParseErrorKind::DanglingHyphen => {
                write!(f, "A hyphen range requires a version on both sides of `-`")
            }
            ParseErrorKind::BoundOverflow { component, value } => {
                write!(
                    f,
                    "The implied bound above the {component} component `{value}` does not fit in a 64-bit integer"
                )
            }
        }
    }
}

/// The specific kind of error that occurs when parsing a comparator term
#[derive(Clone, Debug, Eq, PartialEq)]
enum ParseErrorKind {
    InvalidOperator(OperatorParseError),
    InvalidVersion(VersionParseError),
    MissingVersion,
    EmptyGroup,
    DanglingHyphen,
    BoundOverflow { component: &'static str, value: u64 },
}

impl From<ParseErrorKind> for ComparatorParseError {
    fn from(kind: ParseErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

/// An error with span information inside the parsed range line
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeParseError {
    // Boxed to keep the error small, the span fields make the inner type wide
    inner: Box<RangeParseErrorInner>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RangeParseErrorInner {
    /// The underlying error that occurred
    err: ComparatorParseError,
    /// The string that failed to parse
    line: String,
    /// The starting byte offset of the offending group
    start: usize,
    /// The ending byte offset of the offending group
    end: usize,
}

impl RangeParseError {
    /// The string that failed to parse
    pub fn line(&self) -> &str {
        &self.inner.line
    }
}

impl std::error::Error for RangeParseError {}

impl Display for RangeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use unicode_width::UnicodeWidthStr;

        let RangeParseErrorInner {
            ref err,
            ref line,
            start,
            end,
        } = *self.inner;
        writeln!(f, "Failed to parse range: {err}:")?;
        writeln!(f, "{line}")?;
        // the raw span covers the whole `||` branch, whitespace included;
        // narrow the underline onto the group text itself
        let group = &line[start..end];
        let leading = group.len() - group.trim_start().len();
        let narrowed = group.trim();
        if narrowed.is_empty() {
            // a blank group leaves nothing to underline, point at the gap
            writeln!(f, "{}^", " ".repeat(line[..start].width()))?;
        } else {
            let indent = line[..start + leading].width();
            writeln!(f, "{}{}", " ".repeat(indent), "^".repeat(narrowed.width()))?;
        }
        Ok(())
    }
}
