//! Ordering and rendering of copy sites.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::CopySite;
use crate::model::Position;

/// An owned, rendered-ready copy-site finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub position: Position,
    /// Function identity, e.g. `func (shapes.Bigger).M(x shapes.Big) shapes.Bigger`.
    pub function: String,
    pub should_be: Vec<String>,
}

impl Diagnostic {
    pub fn from_site(site: &CopySite<'_>) -> Self {
        Self {
            position: site.function.position.clone(),
            function: site.identity(),
            should_be: site.should_be.clone(),
        }
    }

    /// `<positions> should be made into a pointer|pointers`
    pub fn message(&self) -> String {
        let noun = if self.should_be.len() > 1 { "pointers" } else { "a pointer" };
        format!("{} should be made into {noun}", sentence(&self.should_be))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.position, self.message(), self.function)
    }
}

/// Join phrases as an English list: `A`, `A and B`, `A, B, and C`.
pub fn sentence<S: AsRef<str>>(parts: &[S]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|p| p.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Order by (file, line, column). Stable, so identical positions keep scan order.
pub fn sort_by_position<T>(items: &mut [T], position: impl Fn(&T) -> &Position) {
    items.sort_by(|a, b| {
        let (a, b) = (position(a), position(b));
        (a.file.as_str(), a.line, a.column).cmp(&(b.file.as_str(), b.line, b.column))
    });
}

/// Sort copy sites and convert them into diagnostics.
pub fn diagnostics(mut sites: Vec<CopySite<'_>>) -> Vec<Diagnostic> {
    sort_by_position(&mut sites, |site| &site.function.position);
    sites.iter().map(Diagnostic::from_site).collect()
}

/// Sort copy sites and render one line per site.
pub fn report(sites: Vec<CopySite<'_>>) -> Vec<String> {
    diagnostics(sites).iter().map(ToString::to_string).collect()
}
