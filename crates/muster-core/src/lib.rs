//! Party-formation core for timed cooperative runs.
//!
//! Pure domain types: the role catalog with its shared capacity pools, the
//! initiator's selection state with its dependency-aware reset rules, and the
//! deterministic composition allocator that expands a "roles still needed"
//! choice into a concrete roster of filled and placeholder slots.
//!
//! No I/O and no async here; the session runtime lives in `muster-session`.

mod difficulty;
mod error;
mod metadata;
mod requirements;
mod roles;
mod roster;
mod selection;

pub use difficulty::DifficultyBand;
pub use error::{
    AllocationError, BandParseError, CatalogError, SelectionError, UnknownTagError,
};
pub use metadata::{ActivityMetadata, Objective};
pub use requirements::{MAX_REQUIREMENT_TAGS, RequirementTag};
pub use roles::{
    DEFAULT_DAMAGE_POOL_CAPACITY, DEFAULT_PLACEHOLDER_LABEL, PoolDef, PoolId, RoleCatalog,
    RoleDef, RoleId,
};
pub use roster::{Allocation, LEADER_MARKER, Participant, RoleSlot, Roster, allocate};
pub use selection::{MissingField, SelectionSnapshot, SelectionState};
