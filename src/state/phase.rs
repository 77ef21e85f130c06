use std::fmt;

/// One hop level of the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// The seed page itself
    First,
    /// Pages linked from the seed
    Second,
    /// Pages linked from second-phase pages
    Third,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 3] = [Phase::First, Phase::Second, Phase::Third];

    /// Label used in the "... phase completed" progress line
    pub fn label(&self) -> &'static str {
        match self {
            Phase::First => "First",
            Phase::Second => "Second",
            Phase::Third => "Third",
        }
    }

    /// 1-based hop number
    pub fn number(&self) -> u8 {
        match self {
            Phase::First => 1,
            Phase::Second => 2,
            Phase::Third => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}", self.number())
    }
}

/// Upper bound on the number of links kept from one page
///
/// A raw value of `0` (in config files and on the command line) means
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Limited(usize),
    Unbounded,
}

impl Cap {
    /// Maximum number of items to take, for use with `Iterator::take`
    pub fn limit(&self) -> usize {
        match self {
            Cap::Limited(n) => *n,
            Cap::Unbounded => usize::MAX,
        }
    }
}

impl From<usize> for Cap {
    fn from(raw: usize) -> Self {
        if raw == 0 {
            Cap::Unbounded
        } else {
            Cap::Limited(raw)
        }
    }
}

impl fmt::Display for Cap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cap::Limited(n) => write!(f, "{}", n),
            Cap::Unbounded => write!(f, "unbounded"),
        }
    }
}
