//! Go module version parsing and precedence
//!
//! Module versions are semantic versions with a mandatory `v` prefix
//! (`v1.2.3`, `v1.2.3-rc.1`, `v2.0.0+incompatible`). The shorthand forms
//! `v1` and `v1.2` are accepted and padded with zeros, as the go command does.

use std::cmp::Ordering;
use std::fmt;

/// A parsed module version that keeps its original spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersion {
    raw: String,
    parsed: semver::Version,
}

impl ModuleVersion {
    /// Parse a module version, returning None if it is not a valid version
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let body = raw.strip_prefix('v')?;

        let core_end = body.find(['-', '+']).unwrap_or(body.len());
        let (core, suffix) = body.split_at(core_end);
        let parts: Vec<&str> = core.split('.').collect();

        let padded = match parts.len() {
            3 => body.to_string(),
            // Shorthand is only valid without pre-release or build suffixes
            1 | 2 if suffix.is_empty() => {
                let mut full = core.to_string();
                for _ in parts.len()..3 {
                    full.push_str(".0");
                }
                full
            }
            _ => return None,
        };

        let parsed = semver::Version::parse(&padded).ok()?;
        Some(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// The version as originally written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if the version carries a pre-release component
    pub fn is_prerelease(&self) -> bool {
        !self.parsed.pre.is_empty()
    }

    /// Compare by semantic version precedence, ignoring build metadata
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.parsed, &other.parsed);
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| match (a.pre.is_empty(), b.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.pre.cmp(&b.pre),
            })
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
