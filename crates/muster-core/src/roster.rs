//! Roster allocation: expanding a composition choice into concrete slots.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;
use crate::{PoolId, RoleCatalog, RoleId};

/// Marker appended to the initiator's display label.
pub const LEADER_MARKER: &str = "🚩";

/// The participant who opened the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable user id, as attributed by the transport.
    pub user_id: String,
    /// Display name shown in the roster.
    pub display_name: String,
}

impl Participant {
    /// Convenience constructor.
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// One occupied roster position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSlot {
    /// The role this slot covers.
    pub role: RoleId,
    /// Occupant id: the initiator's user id, or a synthesized placeholder id.
    pub occupant_id: String,
    /// Label shown for the occupant.
    pub display_label: String,
    /// Whether the occupant is a synthesized stand-in rather than a real
    /// participant.
    pub is_placeholder: bool,
}

/// Immutable list of occupied slots, produced once at confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    slots: Vec<RoleSlot>,
}

impl Roster {
    /// Slots in allocation order: the initiator first, then placeholders in
    /// catalog order.
    pub fn slots(&self) -> &[RoleSlot] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the roster holds no slots (never the case for a valid
    /// allocation, which always seats the initiator).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The single non-placeholder slot.
    pub fn initiator_slot(&self) -> Option<&RoleSlot> {
        self.slots.iter().find(|slot| !slot.is_placeholder)
    }

    /// Placeholder slots in allocation order.
    pub fn placeholders(&self) -> impl Iterator<Item = &RoleSlot> {
        self.slots.iter().filter(|slot| slot.is_placeholder)
    }
}

/// Result of one allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// The occupied slots.
    pub roster: Roster,
    /// Pools at capacity after the pass; informational only, for the
    /// caller's follow-up UI (e.g. disabling exhausted menu entries).
    pub exhausted_pools: BTreeSet<PoolId>,
}

/// Expand the initiator's composition choice into a concrete roster.
///
/// Roles in `needed_roles` stay open for real applicants. The initiator's
/// own role is always covered by their slot. Every other catalog role is
/// declared already covered and is backfilled with a placeholder occupant,
/// unless its pool has reached capacity — the initiator's slot counts toward
/// their own pool's fill level.
///
/// Placeholder occupant ids are `{label}{n}`; the suffix starts at 0 and
/// advances once per catalog role processed, whether or not a slot was
/// emitted, so numbering stays stable and reproducible. Output is
/// deterministic for fixed inputs: iteration follows catalog order only.
pub fn allocate(
    catalog: &RoleCatalog,
    initiator: &Participant,
    own_role: &RoleId,
    needed_roles: &BTreeSet<RoleId>,
) -> Result<Allocation, AllocationError> {
    if !catalog.contains(own_role) {
        return Err(AllocationError::UnknownOwnRole(own_role.to_string()));
    }
    for role in needed_roles {
        if !catalog.contains(role) {
            return Err(AllocationError::UnknownNeededRole(role.to_string()));
        }
    }

    let mut fill: BTreeMap<PoolId, usize> = BTreeMap::new();
    let mut slots = Vec::with_capacity(catalog.role_count());

    slots.push(RoleSlot {
        role: own_role.clone(),
        occupant_id: initiator.user_id.clone(),
        display_label: format!("{} {LEADER_MARKER}", initiator.display_name),
        is_placeholder: false,
    });
    if let Some(pool) = catalog.pool_of(own_role) {
        *fill.entry(pool.clone()).or_default() += 1;
    }

    let label = catalog.placeholder_label();
    let mut counter = 0usize;
    for def in catalog.roles() {
        if def.id == *own_role || needed_roles.contains(&def.id) {
            continue;
        }
        let filled = fill.entry(def.pool.clone()).or_default();
        if *filled < catalog.pool_capacity(&def.pool) {
            slots.push(RoleSlot {
                role: def.id.clone(),
                occupant_id: format!("{label}{counter}"),
                display_label: label.to_string(),
                is_placeholder: true,
            });
            *filled += 1;
        }
        // Capacity-skipped roles still consume a suffix so the numbering
        // stays reproducible.
        counter += 1;
    }

    let exhausted_pools = fill
        .iter()
        .filter(|(pool, filled)| **filled >= catalog.pool_capacity(pool))
        .map(|(pool, _)| pool.clone())
        .collect();

    Ok(Allocation {
        roster: Roster { slots },
        exhausted_pools,
    })
}
