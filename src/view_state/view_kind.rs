//! Which sub-view fills the content area.

use std::fmt;
use std::str::FromStr;

/// Content sub-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    /// Card grid.
    #[default]
    Grid,
    /// Single-column list.
    List,
    /// Master-detail split.
    Split,
}

impl ViewKind {
    /// Accepted names, in cycle order.
    pub const NAMES: [&'static str; 3] = ["grid", "list", "split"];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Split => "split",
        }
    }

    /// Next view in the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Split,
            Self::Split => Self::Grid,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized view name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view '{0}' (expected grid, list or split)")]
pub struct UnknownViewKind(pub String);

impl FromStr for ViewKind {
    type Err = UnknownViewKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "split" => Ok(Self::Split),
            other => Err(UnknownViewKind(other.to_string())),
        }
    }
}
