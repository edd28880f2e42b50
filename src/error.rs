//! Error types shared across the crate.
//!
//! Three families, matching how failures are surfaced to callers:
//! - [`CatalogError`]: malformed or unusable configuration data. Fatal to
//!   loading that resource; nothing downstream runs with a broken catalog.
//! - [`BattleError`]: invariant violations inside a running battle. These are
//!   programming errors, not recoverable game situations.
//! - [`LearnDenial`] / [`PartyError`]: ordinary outcomes of player-shaped
//!   requests, carrying the reason the presentation layer must show.

use thiserror::Error;

/// Failure loading or validating class, foe, or level-threshold data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{source_name}: unexpected end of data reading {field}")]
    UnexpectedEof {
        source_name: String,
        field: &'static str,
    },

    #[error("{source_name}: expected header {expected:?}, found {found:?}")]
    HeaderMismatch {
        source_name: String,
        expected: String,
        found: String,
    },

    #[error("{source_name}: {field} is not a number: {value:?}")]
    NonNumericField {
        source_name: String,
        field: &'static str,
        value: String,
    },

    #[error("{source_name}: {field} code {code} is out of range")]
    InvalidCode {
        source_name: String,
        field: &'static str,
        code: i64,
    },

    #[error("{source_name}: {field} must be strictly positive, got {value}")]
    NonPositiveStat {
        source_name: String,
        field: &'static str,
        value: f64,
    },

    #[error("class {class:?}: {field} multiplier must be positive, got {value}")]
    InvalidMultiplier {
        class: String,
        field: &'static str,
        value: f64,
    },

    #[error("level threshold table is empty")]
    EmptyThresholdTable,

    #[error("foe pool has no drawable entries (all weights are zero)")]
    EmptyFoePool,

    #[error("unknown class {0:?}")]
    UnknownClass(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Invariant violation inside the battle engine.
#[derive(Debug, Error)]
pub enum BattleError {
    /// The acting side has no living member. Callers must check the
    /// battle-over predicate before asking for a fighter.
    #[error("no living fighter on the acting side")]
    NoLivingFighter,

    /// An ability was resolved without the AP to pay for it. Ability
    /// selection filters on affordability, so this never fires in a
    /// well-formed battle.
    #[error("cannot pay {cost} AP with {available} remaining")]
    InsufficientAp { cost: f64, available: f64 },
}

/// Failure while running a level progression.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Battle(#[from] BattleError),
}

/// Ability learning was denied. Not an exception: the collaborator surfaces
/// the reason to the player and play continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LearnDenial {
    #[error("not enough class points (have {have}, need {need})")]
    InsufficientClassPoints { have: i64, need: i64 },

    #[error("class level too low (level {have}, requires {need})")]
    ClassLevelTooLow { have: u32, need: u32 },

    #[error("ability {0:?} is not part of the active class")]
    UnknownAbility(String),

    #[error("ability {0:?} is already learned")]
    AlreadyLearned(String),
}

/// A party management request that could not be honored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    #[error("not enough stat points (have {have}, need {need})")]
    InsufficientStatPoints { have: u32, need: u32 },
}
