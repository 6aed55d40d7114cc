//! Group requirement tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownTagError;

/// Most tags a single selection may carry.
pub const MAX_REQUIREMENT_TAGS: usize = 3;

/// Utility requirements the initiator can advertise for the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RequirementTag {
    /// Bloodlust / Heroism.
    #[serde(rename = "BL")]
    Bloodlust,
    /// Combat resurrection.
    #[serde(rename = "CR")]
    CombatRez,
    /// A dispel for the run's affixes.
    #[serde(rename = "Disp")]
    Dispel,
}

impl RequirementTag {
    /// Wire label, as rendered in selection menus.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bloodlust => "BL",
            Self::CombatRez => "CR",
            Self::Dispel => "Disp",
        }
    }
}

impl fmt::Display for RequirementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementTag {
    type Err = UnknownTagError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "BL" => Ok(Self::Bloodlust),
            "CR" => Ok(Self::CombatRez),
            // The menu shows "Dispel" while the wire value stays "Disp".
            "Disp" | "Dispel" => Ok(Self::Dispel),
            other => Err(UnknownTagError(other.to_string())),
        }
    }
}
