//! Release token classification and range splitting.

use regex::Regex;
use std::sync::LazyLock;

static RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v[0-9]+$").expect("release regex is valid"));

// Lazy left side so `a...b` splits as `a` / `...` / `b`
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<left>.*?)(?P<sep>\.{2,3})(?P<right>.*)$").expect("range regex is valid")
});

/// What a user-supplied token refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// No token: the latest release
    Empty,
    /// A named release such as `v42`
    Release,
    /// Anything else; handed to git untouched
    Opaque,
}

impl TokenKind {
    /// Classify a token
    pub fn classify(token: &str) -> Self {
        if token.is_empty() {
            Self::Empty
        } else if RELEASE_RE.is_match(token) {
            Self::Release
        } else {
            Self::Opaque
        }
    }

    /// Whether tokens of this kind go through release resolution
    pub fn is_resolvable(self) -> bool {
        !matches!(self, Self::Opaque)
    }
}

/// A revision range such as `v101..v103` or `v1...master`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange<'a> {
    /// Left side, possibly empty
    pub left: &'a str,
    /// `..` or `...`, kept verbatim
    pub separator: &'a str,
    /// Right side, possibly empty
    pub right: &'a str,
}

impl<'a> RevisionRange<'a> {
    /// Split a token at its first `..` / `...`
    ///
    /// Bare `..` and `...` are not ranges.
    pub fn parse(token: &'a str) -> Option<Self> {
        if token == ".." || token == "..." {
            return None;
        }

        let caps = RANGE_RE.captures(token)?;
        let (left, sep, right) = (caps.name("left")?, caps.name("sep")?, caps.name("right")?);
        Some(Self {
            left: left.as_str(),
            separator: sep.as_str(),
            right: right.as_str(),
        })
    }
}
