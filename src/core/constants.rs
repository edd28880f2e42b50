//! Game balance constants.

/// Stat points granted per account level-up.
pub const STAT_POINTS_PER_LEVEL: u32 = 10;

/// Class XP is divided by this to mint class points.
pub const CLASS_POINT_DIVISOR: f64 = 10.0;

/// Raw HP bought per stat point.
pub const HP_PER_STAT_POINT: f64 = 10.0;

/// Battles to win before a level run counts as completed.
pub const BATTLES_PER_LEVEL: u32 = 100;

/// Foe count range rolled per encounter.
pub const MIN_FOES_PER_ENCOUNTER: usize = 1;
pub const MAX_FOES_PER_ENCOUNTER: usize = 4;

/// Highest playable level run.
pub const MAX_LEVEL_NUMBER: u32 = 3;

/// Starting attribute line for a fresh character.
pub const STARTING_ATTRIBUTE: f64 = 20.0;
pub const STARTING_MAX_HP: f64 = 1000.0;
pub const STARTING_MAX_AP: f64 = 50.0;

/// Save file version magic ("SKRM" + format revision).
pub const SAVE_VERSION_MAGIC: u64 = 0x534B_524D_0000_0001;
