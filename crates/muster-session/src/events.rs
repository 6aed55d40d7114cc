//! Typed inbound events for a formation session.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use muster_core::{RequirementTag, RoleId};

/// The composition menu result: either a committed set of roles, or the
/// sentinel the widget sends when it was opened before a role was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositionChoice {
    /// The menu's placeholder entry; nothing was committed.
    NoneSelected,
    /// Roles the initiator still wants other people to fill.
    Roles(BTreeSet<RoleId>),
}

/// Payload of one inbound selection or lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Difficulty menu pick.
    Difficulty(u8),
    /// The initiator's own role.
    OwnRole(RoleId),
    /// Composition menu pick.
    Composition(CompositionChoice),
    /// Requirement tag picks (0–3).
    Requirements(BTreeSet<RequirementTag>),
    /// Create-group button.
    Confirm,
    /// Cancel button.
    Cancel,
}

impl EventKind {
    /// Stable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Difficulty(_) => "difficulty",
            Self::OwnRole(_) => "own_role",
            Self::Composition(_) => "composition",
            Self::Requirements(_) => "requirements",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
        }
    }
}

/// One event as delivered by the transport, attributed to its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Id of the user the transport attributes this event to. Only events
    /// from the session's initiator are accepted.
    pub source_user_id: String,
    /// What was selected or pressed.
    pub kind: EventKind,
}

impl InboundEvent {
    /// Convenience constructor.
    pub fn new(source_user_id: impl Into<String>, kind: EventKind) -> Self {
        Self {
            source_user_id: source_user_id.into(),
            kind,
        }
    }
}
