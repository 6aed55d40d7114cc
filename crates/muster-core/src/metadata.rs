//! Activity metadata carried through a session.

use serde::{Deserialize, Serialize};

/// What the party is setting out to do with the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Beat the timer.
    Time,
    /// Just finish the run.
    Completion,
}

impl Objective {
    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Completion => "completion",
        }
    }
}

/// Details of the run the initiator is recruiting for.
///
/// Captured from the opening command and handed to the announcer unchanged;
/// the core never interprets these fields beyond the activity name in the
/// prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    /// Dungeon to run.
    pub activity: String,
    /// Time the key or just complete it.
    pub objective: Objective,
    /// Optional listed-as name for the group; generated downstream when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_as: Option<String>,
    /// Free-form notes from the group creator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_notes: Option<String>,
}

impl ActivityMetadata {
    /// Metadata with no optional fields set.
    pub fn new(activity: impl Into<String>, objective: Objective) -> Self {
        Self {
            activity: activity.into(),
            objective,
            listed_as: None,
            creator_notes: None,
        }
    }
}
