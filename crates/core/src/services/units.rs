use std::fmt;
use std::str::FromStr;

/// Unit path pattern in import-path style: `...` matches any run of
/// characters, and a trailing `/...` also matches the bare prefix
/// (`net/...` matches `net` and `net/http`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPattern {
    raw: String,
}

impl UnitPattern {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        if wildcard_match(&self.raw, path) {
            return true;
        }
        match self.raw.strip_suffix("/...") {
            Some(prefix) => wildcard_match(prefix, path),
            None => false,
        }
    }
}

impl FromStr for UnitPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for UnitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Anchored match where every `...` in `pattern` is a wildcard.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pieces: Vec<&str> = pattern.split("...").collect();
    let (first, rest) = match pieces.split_first() {
        Some(split) => split,
        None => return text.is_empty(),
    };
    let Some(mut remaining) = text.strip_prefix(first) else {
        return false;
    };
    let Some((last, middle)) = rest.split_last() else {
        // No wildcard at all: exact match.
        return remaining.is_empty();
    };
    for piece in middle {
        match remaining.find(piece) {
            Some(at) => remaining = &remaining[at + piece.len()..],
            None => return false,
        }
    }
    remaining.len() >= last.len() && remaining.ends_with(last)
}
