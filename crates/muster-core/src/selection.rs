//! Mutable record of the initiator's in-flight choices.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::SelectionError;
use crate::{DifficultyBand, RequirementTag, RoleCatalog, RoleId};

/// Confirm-time validation result: the highest-priority missing field.
///
/// Priority is fixed — difficulty, then own role, then composition — no
/// matter what order the initiator filled things in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// No difficulty selected yet.
    Difficulty,
    /// No own role selected yet.
    OwnRole,
    /// No composition committed yet.
    Composition,
}

impl MissingField {
    /// Corrective notice appended to the prompt when confirmation is refused.
    pub fn corrective_message(&self) -> &'static str {
        match self {
            Self::Difficulty => "Please select a difficulty.",
            Self::OwnRole => "Please select your role.",
            Self::Composition => "Please select required roles.",
        }
    }
}

/// Read-only snapshot of all four selectable fields.
///
/// Passed to the render callback after every accepted mutation so the widget
/// layer can redraw each menu (placeholders for unset fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    /// Chosen keystone level, if any.
    pub difficulty: Option<u8>,
    /// The initiator's own role, if chosen.
    pub own_role: Option<RoleId>,
    /// Roles still wanted from other participants, in stable order.
    pub needed_roles: Option<Vec<RoleId>>,
    /// Advertised requirement tags, in stable order.
    pub requirements: Option<Vec<RequirementTag>>,
}

/// The initiator's current choices, owned exclusively by one session.
#[derive(Debug, Clone)]
pub struct SelectionState {
    band: DifficultyBand,
    difficulty: Option<u8>,
    own_role: Option<RoleId>,
    needed_roles: Option<BTreeSet<RoleId>>,
    requirements: Option<BTreeSet<RequirementTag>>,
}

impl SelectionState {
    /// Empty selection constrained to the given band.
    pub fn new(band: DifficultyBand) -> Self {
        Self {
            band,
            difficulty: None,
            own_role: None,
            needed_roles: None,
            requirements: None,
        }
    }

    /// The band this selection validates difficulty against.
    pub fn band(&self) -> DifficultyBand {
        self.band
    }

    /// Chosen keystone level, if any.
    pub fn difficulty(&self) -> Option<u8> {
        self.difficulty
    }

    /// The initiator's own role, if chosen.
    pub fn own_role(&self) -> Option<&RoleId> {
        self.own_role.as_ref()
    }

    /// Roles still wanted from other participants, if committed.
    pub fn needed_roles(&self) -> Option<&BTreeSet<RoleId>> {
        self.needed_roles.as_ref()
    }

    /// Advertised requirement tags, if any were picked.
    pub fn requirements(&self) -> Option<&BTreeSet<RequirementTag>> {
        self.requirements.as_ref()
    }

    /// Store a difficulty selection; out-of-band levels leave the state
    /// untouched.
    pub fn set_difficulty(&mut self, level: u8) -> Result<(), SelectionError> {
        if !self.band.contains(level) {
            return Err(SelectionError::DifficultyOutOfRange {
                level,
                lower: self.band.lower(),
                upper: self.band.upper(),
            });
        }
        self.difficulty = Some(level);
        Ok(())
    }

    /// Store the initiator's own role.
    ///
    /// Switching to a *different* role clears any composition picked under
    /// the previous role: the composition menu is role-dependent, so a stale
    /// choice must not silently carry over. Re-selecting the current role
    /// preserves the composition.
    pub fn set_own_role(
        &mut self,
        catalog: &RoleCatalog,
        role: RoleId,
    ) -> Result<(), SelectionError> {
        if !catalog.contains(&role) {
            return Err(SelectionError::UnknownRole(role.to_string()));
        }
        if self.own_role.as_ref() != Some(&role) {
            self.needed_roles = None;
        }
        self.own_role = Some(role);
        Ok(())
    }

    /// Store the set of roles still wanted from other participants,
    /// verbatim.
    pub fn set_needed_roles(
        &mut self,
        catalog: &RoleCatalog,
        roles: BTreeSet<RoleId>,
    ) -> Result<(), SelectionError> {
        for role in &roles {
            if !catalog.contains(role) {
                return Err(SelectionError::UnknownRole(role.to_string()));
            }
        }
        self.needed_roles = Some(roles);
        Ok(())
    }

    /// Store requirement tags verbatim; independent of every other field.
    pub fn set_requirements(&mut self, tags: BTreeSet<RequirementTag>) {
        self.requirements = Some(tags);
    }

    /// Highest-priority field still missing for confirmation, if any.
    pub fn first_missing(&self) -> Option<MissingField> {
        if self.difficulty.is_none() {
            Some(MissingField::Difficulty)
        } else if self.own_role.is_none() {
            Some(MissingField::OwnRole)
        } else if self.needed_roles.is_none() {
            Some(MissingField::Composition)
        } else {
            None
        }
    }

    /// Snapshot of all four fields for render callbacks.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            difficulty: self.difficulty,
            own_role: self.own_role.clone(),
            needed_roles: self
                .needed_roles
                .as_ref()
                .map(|roles| roles.iter().cloned().collect()),
            requirements: self
                .requirements
                .as_ref()
                .map(|tags| tags.iter().copied().collect()),
        }
    }
}
