//! Role identifiers and the capacity-pool catalog.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifier of a single selectable role (e.g. `Tank`, `DPS2`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Wrap a role identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a shared capacity pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(String);

impl PoolId {
    /// Wrap a pool identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One catalog entry: a role and the pool whose capacity binds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDef {
    /// The role.
    pub id: RoleId,
    /// The pool this role draws capacity from.
    pub pool: PoolId,
}

impl RoleDef {
    /// Convenience constructor.
    pub fn new(id: impl Into<RoleId>, pool: impl Into<PoolId>) -> Self {
        Self {
            id: id.into(),
            pool: pool.into(),
        }
    }
}

/// One capacity pool; several distinct roles may share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDef {
    /// The pool.
    pub id: PoolId,
    /// Slots this pool can hold across all of its roles.
    pub capacity: usize,
}

impl PoolDef {
    /// Convenience constructor.
    pub fn new(id: impl Into<PoolId>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// Default capacity of the shared damage pool.
pub const DEFAULT_DAMAGE_POOL_CAPACITY: usize = 3;

/// Default label for synthesized placeholder occupants.
pub const DEFAULT_PLACEHOLDER_LABEL: &str = "Filled";

/// Ordered, read-only description of the selectable roles.
///
/// Every role belongs to exactly one pool; the pool capacity is the binding
/// constraint, regardless of how many distinct roles share the pool.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<RoleDef>,
    pools: BTreeMap<PoolId, usize>,
    placeholder_label: String,
}

impl RoleCatalog {
    /// Build a catalog with the default placeholder label.
    pub fn new(pools: Vec<PoolDef>, roles: Vec<RoleDef>) -> Result<Self, CatalogError> {
        Self::with_placeholder_label(pools, roles, DEFAULT_PLACEHOLDER_LABEL)
    }

    /// Build a catalog, validating the role/pool invariants.
    pub fn with_placeholder_label(
        pools: Vec<PoolDef>,
        roles: Vec<RoleDef>,
        placeholder_label: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let mut pool_caps = BTreeMap::new();
        for pool in pools {
            if pool.capacity == 0 {
                return Err(CatalogError::ZeroCapacity(pool.id.to_string()));
            }
            if pool_caps.insert(pool.id.clone(), pool.capacity).is_some() {
                return Err(CatalogError::DuplicatePool(pool.id.to_string()));
            }
        }

        let mut seen = BTreeSet::new();
        for role in &roles {
            if !seen.insert(role.id.clone()) {
                return Err(CatalogError::DuplicateRole(role.id.to_string()));
            }
            if !pool_caps.contains_key(&role.pool) {
                return Err(CatalogError::UndeclaredPool {
                    role: role.id.to_string(),
                    pool: role.pool.to_string(),
                });
            }
        }

        Ok(Self {
            roles,
            pools: pool_caps,
            placeholder_label: placeholder_label.into(),
        })
    }

    /// The stock keystone catalog: one tank, one healer, and three damage
    /// roles sharing the damage pool.
    pub fn keystone(damage_pool_capacity: usize) -> Result<Self, CatalogError> {
        Self::keystone_with_label(damage_pool_capacity, DEFAULT_PLACEHOLDER_LABEL)
    }

    /// The stock keystone catalog with a custom placeholder label.
    pub fn keystone_with_label(
        damage_pool_capacity: usize,
        placeholder_label: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        Self::with_placeholder_label(
            vec![
                PoolDef::new("tank", 1),
                PoolDef::new("healer", 1),
                PoolDef::new("damage", damage_pool_capacity),
            ],
            vec![
                RoleDef::new("Tank", "tank"),
                RoleDef::new("Healer", "healer"),
                RoleDef::new("DPS1", "damage"),
                RoleDef::new("DPS2", "damage"),
                RoleDef::new("DPS3", "damage"),
            ],
            placeholder_label,
        )
    }

    /// Roles in declared order.
    pub fn roles(&self) -> &[RoleDef] {
        &self.roles
    }

    /// Number of roles in the catalog.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Whether a role is declared.
    pub fn contains(&self, role: &RoleId) -> bool {
        self.roles.iter().any(|def| def.id == *role)
    }

    /// The pool a declared role draws capacity from.
    pub fn pool_of(&self, role: &RoleId) -> Option<&PoolId> {
        self.roles
            .iter()
            .find(|def| def.id == *role)
            .map(|def| &def.pool)
    }

    /// Capacity of a pool; zero for an undeclared pool.
    pub fn pool_capacity(&self, pool: &PoolId) -> usize {
        self.pools.get(pool).copied().unwrap_or(0)
    }

    /// Label used for synthesized placeholder occupants.
    pub fn placeholder_label(&self) -> &str {
        &self.placeholder_label
    }
}
