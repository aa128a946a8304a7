//! Result of resolving one request path.

/// Why a particular target was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An entry matched the request path.
    Matched,
    /// The table was fetched but no entry matched.
    NoMatch,
    /// The table could not be fetched or was empty.
    Unavailable,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::NoMatch => "no_match",
            Outcome::Unavailable => "unavailable",
        }
    }
}

/// The redirect target selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: String,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn matched(target: String) -> Self {
        Self {
            target,
            outcome: Outcome::Matched,
        }
    }

    pub fn fallback(default_url: &str, outcome: Outcome) -> Self {
        Self {
            target: default_url.to_string(),
            outcome,
        }
    }

    pub fn is_match(&self) -> bool {
        self.outcome == Outcome::Matched
    }
}
