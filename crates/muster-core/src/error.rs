//! Error types for the party-formation core.
//!
//! Explicit error enums with context; recoverable selection errors are
//! surfaced to the initiator as corrective notices, catalog and allocation
//! errors indicate a misconfigured caller.

use thiserror::Error;

/// Errors raised while constructing a [`RoleCatalog`](crate::RoleCatalog).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A role id appears more than once in the catalog.
    #[error("duplicate role `{0}` in catalog")]
    DuplicateRole(String),

    /// A pool id appears more than once.
    #[error("duplicate pool `{0}` in catalog")]
    DuplicatePool(String),

    /// A role references a pool that was never declared.
    #[error("role `{role}` references undeclared pool `{pool}`")]
    UndeclaredPool {
        /// Offending role id.
        role: String,
        /// The pool the role asked for.
        pool: String,
    },

    /// A pool with zero capacity can never hold a slot.
    #[error("pool `{0}` has zero capacity")]
    ZeroCapacity(String),
}

/// Recoverable errors raised by selection mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Difficulty outside the band advertised by the listing channel.
    #[error("difficulty +{level} is outside the allowed band +{lower} to +{upper}")]
    DifficultyOutOfRange {
        /// The rejected level.
        level: u8,
        /// Band lower bound.
        lower: u8,
        /// Band upper bound.
        upper: u8,
    },

    /// Role not present in the catalog.
    #[error("unknown role `{0}`")]
    UnknownRole(String),
}

/// Errors raised by the composition allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The initiator's role is not in the catalog.
    #[error("initiator role `{0}` is not in the catalog")]
    UnknownOwnRole(String),

    /// A needed role is not in the catalog.
    #[error("needed role `{0}` is not in the catalog")]
    UnknownNeededRole(String),
}

/// Errors raised while deriving a difficulty band from context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BandParseError {
    /// The channel name carries no difficulty segments at all.
    #[error("channel name `{0}` carries no difficulty band")]
    NoBand(String),

    /// A difficulty segment did not parse as a keystone level.
    #[error("difficulty segment `{0}` is not a keystone level")]
    BadSegment(String),

    /// Lower bound above upper bound.
    #[error("band lower bound +{lower} exceeds upper bound +{upper}")]
    Inverted {
        /// Parsed lower bound.
        lower: u8,
        /// Parsed upper bound.
        upper: u8,
    },
}

/// A requirement-tag label that matches no known tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown requirement tag `{0}`")]
pub struct UnknownTagError(pub String);
