//! The level threshold table and experience application.
//!
//! Account XP and class XP share one table and one plateau rule: the entry
//! at `level + 1` is the XP needed for the next level, the final entry
//! repeats forever once the index runs past the table, and a value of zero
//! or below means no further level can be reached.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::character::roster::Character;
use crate::core::constants::{CLASS_POINT_DIVISOR, STAT_POINTS_PER_LEVEL};
use crate::error::CatalogError;

/// Ordered XP thresholds indexed by level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    thresholds: Vec<i64>,
}

impl LevelTable {
    /// An empty table can answer nothing and is rejected outright.
    pub fn new(thresholds: Vec<i64>) -> Result<Self, CatalogError> {
        if thresholds.is_empty() {
            return Err(CatalogError::EmptyThresholdTable);
        }
        Ok(Self { thresholds })
    }

    /// The default curve used when no external table is supplied.
    pub fn standard() -> Self {
        Self {
            thresholds: vec![0, 100, 300, 700, 1500, 3100, 6300, 12_700, 25_500, 51_100, -1],
        }
    }

    /// XP required to go from `level` to `level + 1`. The last entry acts
    /// as a plateau; a result of zero or below is the "no further level"
    /// sentinel.
    pub fn xp_for_next_level(&self, level: u32) -> i64 {
        let idx = level as usize + 1;
        if idx < self.thresholds.len() {
            self.thresholds[idx]
        } else {
            self.thresholds.last().copied().unwrap_or(-1)
        }
    }
}

/// A character reached a new account level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpNotice {
    pub character: String,
    pub new_level: u32,
}

/// A character's active class reached a new level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevelUpNotice {
    pub character: String,
    pub class: String,
    pub new_level: u32,
}

/// Adds account XP to every living character, leveling them up while the
/// next threshold is met. Each level grants stat points to the unspent pool.
pub fn apply_experience(
    amount: f64,
    party: &mut [Character],
    table: &LevelTable,
) -> Vec<LevelUpNotice> {
    let gained = amount.round() as i64;
    let mut notices = Vec::new();

    for member in party.iter_mut().filter(|c| c.stats().is_alive()) {
        member.xp += gained;
        let mut needed = table.xp_for_next_level(member.level);
        while needed > 0 && member.xp >= needed {
            member.level += 1;
            member.unspent_stat_points += STAT_POINTS_PER_LEVEL;
            info!(character = %member.name, level = member.level, "level up");
            notices.push(LevelUpNotice {
                character: member.name.clone(),
                new_level: member.level,
            });
            needed = table.xp_for_next_level(member.level);
        }
    }
    notices
}

/// Adds class XP to every living character's active class, leveling the
/// class while the next threshold is met, and mints class points from the
/// gained amount.
pub fn apply_class_experience(
    amount: f64,
    party: &mut [Character],
    table: &LevelTable,
) -> Vec<ClassLevelUpNotice> {
    let gained = amount.round() as i64;
    let points = (amount / CLASS_POINT_DIVISOR).round() as i64;
    let mut notices = Vec::new();

    for member in party.iter_mut().filter(|c| c.stats().is_alive()) {
        member.class_points += points;
        let who = member.name.clone();
        let class = member.active_class().to_string();

        let progress = member.active_progress_mut();
        progress.xp += gained;
        let mut needed = table.xp_for_next_level(progress.level);
        while needed > 0 && progress.xp >= needed {
            progress.level += 1;
            info!(character = %who, class = %class, level = progress.level, "class level up");
            notices.push(ClassLevelUpNotice {
                character: who.clone(),
                class: class.clone(),
                new_level: progress.level,
            });
            needed = table.xp_for_next_level(progress.level);
        }
    }
    notices
}
