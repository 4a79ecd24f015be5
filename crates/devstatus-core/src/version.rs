//! Declared-version parsing.
//!
//! Python packages publish PEP 440 versions, which are mostly but not
//! entirely semver. Parsing normalises the common shapes onto
//! [`semver::Version`] so ordering follows the usual release rules
//! (`1.0.0rc1 < 1.0.0 < 1.0.0.post1`). Anything else becomes
//! [`ParsedVersion::Invalid`], which fails every comparison.

use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

/// A declared version that either parsed or did not. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedVersion {
    Valid(Version),
    Invalid(String),
}

impl ParsedVersion {
    pub fn parse(input: &str) -> Self {
        match normalise(input) {
            Some(version) => Self::Valid(version),
            None => Self::Invalid(input.to_string()),
        }
    }

    pub fn as_version(&self) -> Option<&Version> {
        match self {
            Self::Valid(v) => Some(v),
            Self::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// `self >= floor`. False for an invalid version.
    pub fn at_least(&self, floor: &Version) -> bool {
        self.as_version().is_some_and(|v| v >= floor)
    }

    /// `self < ceiling`. False for an invalid version.
    pub fn below(&self, ceiling: &Version) -> bool {
        self.as_version().is_some_and(|v| v < ceiling)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(v) => write!(f, "{v}"),
            Self::Invalid(raw) => write!(f, "{raw:?} (unparsable)"),
        }
    }
}

impl From<&str> for ParsedVersion {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

fn normalise(input: &str) -> Option<Version> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = Version::parse(trimmed) {
        return Some(v);
    }

    // Release segment: up to three dot-separated integers.
    let release_end = trimmed
        .char_indices()
        .find(|(i, c)| {
            !(c.is_ascii_digit() || (*c == '.' && next_is_digit(trimmed, *i)))
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let (release, suffix) = trimmed.split_at(release_end);

    let parts: Vec<u64> = release
        .split('.')
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut version = Version::new(
        parts[0],
        parts.get(1).copied().unwrap_or(0),
        parts.get(2).copied().unwrap_or(0),
    );

    let (pre, build) = pep440_suffix(suffix)?;
    if let Some(pre) = pre {
        version.pre = Prerelease::new(&pre).ok()?;
    }
    if let Some(build) = build {
        version.build = BuildMetadata::new(&build).ok()?;
    }
    Some(version)
}

fn next_is_digit(s: &str, dot_at: usize) -> bool {
    s[dot_at + 1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

/// Map a PEP 440 suffix onto semver pre-release / build identifiers.
///
/// Returns `None` when the suffix is not understood.
fn pep440_suffix(suffix: &str) -> Option<(Option<String>, Option<String>)> {
    let mut rest = suffix.to_ascii_lowercase();
    let mut pre = None;
    let mut build = None;

    while !rest.is_empty() {
        let stripped = rest.trim_start_matches(['.', '-', '_']).to_string();
        let tag_len = stripped
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(stripped.len());
        let (tag, tail) = stripped.split_at(tag_len);
        let num_len = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (num, tail) = tail.split_at(num_len);
        let n: u64 = if num.is_empty() { 0 } else { num.parse().ok()? };

        match tag {
            "a" | "alpha" if pre.is_none() => pre = Some(format!("alpha.{n}")),
            "b" | "beta" if pre.is_none() => pre = Some(format!("beta.{n}")),
            "c" | "rc" | "pre" | "preview" if pre.is_none() => pre = Some(format!("rc.{n}")),
            // dev releases sort before every other pre-release of the same version
            "dev" => {
                pre = Some(match pre {
                    Some(p) => format!("{p}.dev.{n}"),
                    None => format!("alpha.0.dev.{n}"),
                })
            }
            "post" | "rev" | "r" if build.is_none() => build = Some(format!("post.{n}")),
            _ => return None,
        }
        rest = tail.to_string();
    }

    Some((pre, build))
}
