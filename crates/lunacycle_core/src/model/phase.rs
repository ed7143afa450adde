//! Cycle phase classification result.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the four physiological segments of a cycle.
///
/// Mutually exclusive and collectively exhaustive for any reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menstrual => "menstrual",
            Self::Follicular => "follicular",
            Self::Ovulation => "ovulation",
            Self::Luteal => "luteal",
        }
    }

    /// Capitalized label for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Menstrual => "Menstrual",
            Self::Follicular => "Follicular",
            Self::Ovulation => "Ovulation",
            Self::Luteal => "Luteal",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
