//! A library for semantic version numbers and version ranges, implementing
//! [Semantic Versioning 2.0.0](https://semver.org) together with the
//! node-semver range grammar
//!
//! ```rust
//! use std::str::FromStr;
//! use semver_rs::{Range, Version};
//!
//! let version = Version::from_str("1.2.3").unwrap();
//! let range = Range::from_str(">=1.0.0 <2.0.0").unwrap();
//! assert!(range.contains(&version));
//! assert!(version < Version::from_str("1.2.4").unwrap());
//! ```
//!
//! The precedence rules have a few subtleties worth calling out:
//!
//! * Pre-release versions sort below their release (`1.0.0-alpha < 1.0.0`),
//!   numeric pre-release identifiers sort below alphanumeric ones, and a
//!   shorter identifier sequence sorts below a longer one it prefixes
//! * Build metadata (`1.2.3+build.5`) round-trips through formatting but is
//!   invisible to comparison, so versions differing only in build metadata
//!   compare equal
//! * Range matching excludes pre-release versions unless a comparator in the
//!   matching group carries a pre-release on the same `major.minor.patch`
//!   triple: `>=1.0.0` does not match `1.2.3-alpha`, while `>1.2.3-alpha`
//!   matches `1.2.3-beta` but not `1.2.4-beta`
//! * Range conveniences (`1.x`, `~1.2.3`, `^0.2.3`, `1.2.3 - 2.3.4`) are
//!   desugared to the five primitive operators while parsing, so the parsed
//!   [`Range`] only ever holds `=` `<` `<=` `>` `>=` comparators
#![deny(missing_docs)]

pub use {
    range::{
        Comparator, ComparatorParseError, Operator, OperatorParseError, Range, RangeParseError,
    },
    version::{
        Identifier, IncrementOptions, ReleaseType, ReleaseTypeParseError, Version,
        VersionParseError,
    },
};

mod range;
mod version;
