//! Text-format catalog loaders.
//!
//! Three line-oriented formats are supported, unchanged from the original
//! data files:
//!
//! - **Ability file**: a class-name header, then repeated records of
//!   ability name + 9 fields (damage, damage-type code, description, AP
//!   cost, default flag, level required, CP cost, kind code, target code).
//!   A blank name line or end of file terminates the list.
//! - **Foe level file**: a `Level_N` header, then repeated records of foe
//!   name + 8 fields (six stats, weight, XP reward).
//! - **Threshold file**: one integer per line.
//!
//! Every loader fails closed: non-numeric fields, out-of-range enum codes,
//! mismatched headers, or stats that would break the combat formulas are
//! configuration errors, never silently defaulted.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::character::ability::{Ability, AbilityKind, DamageType, TargetShape};
use crate::combat::types::Foe;
use crate::character::stats::StatBlock;
use crate::core::experience::LevelTable;
use crate::error::CatalogError;

/// Loads one class's ability list from a file.
pub fn load_class_abilities(path: &Path, class_name: &str) -> Result<Vec<Ability>, CatalogError> {
    let text = fs::read_to_string(path)?;
    parse_class_abilities(&text, class_name, &path.display().to_string())
}

/// Parses an ability file body. `source_name` labels errors.
pub fn parse_class_abilities(
    text: &str,
    class_name: &str,
    source_name: &str,
) -> Result<Vec<Ability>, CatalogError> {
    let mut lines = text.lines().map(str::trim);

    let header = lines.next().ok_or_else(|| CatalogError::UnexpectedEof {
        source_name: source_name.to_string(),
        field: "class name header",
    })?;
    if header != class_name {
        return Err(CatalogError::HeaderMismatch {
            source_name: source_name.to_string(),
            expected: class_name.to_string(),
            found: header.to_string(),
        });
    }

    let mut abilities = Vec::new();
    loop {
        let name = match lines.next() {
            None | Some("") => break,
            Some(name) => name.to_string(),
        };
        let power = next_f64(&mut lines, "ability damage", source_name)?;
        let damage_code = next_i64(&mut lines, "damage type", source_name)?;
        let damage_type =
            DamageType::from_code(damage_code).ok_or_else(|| CatalogError::InvalidCode {
                source_name: source_name.to_string(),
                field: "damage type",
                code: damage_code,
            })?;
        let description = next_line(&mut lines, "description", source_name)?.to_string();
        let ap_cost = next_f64(&mut lines, "AP cost", source_name)?;
        let default_granted = next_i64(&mut lines, "default flag", source_name)? != 0;
        let level_required = next_i64(&mut lines, "level required", source_name)? as u32;
        let cp_cost = next_i64(&mut lines, "CP cost", source_name)?;
        let kind_code = next_i64(&mut lines, "ability kind", source_name)?;
        let kind = AbilityKind::from_code(kind_code).ok_or_else(|| CatalogError::InvalidCode {
            source_name: source_name.to_string(),
            field: "ability kind",
            code: kind_code,
        })?;
        let target_code = next_i64(&mut lines, "target shape", source_name)?;
        let target =
            TargetShape::from_code(target_code).ok_or_else(|| CatalogError::InvalidCode {
                source_name: source_name.to_string(),
                field: "target shape",
                code: target_code,
            })?;

        abilities.push(Ability {
            name,
            power,
            damage_type,
            description,
            ap_cost,
            kind,
            target,
            default_granted,
            level_required,
            cp_cost,
            learned: default_granted,
        });
    }

    debug!(class = class_name, count = abilities.len(), "abilities loaded");
    Ok(abilities)
}

/// Loads a level's foe templates from a file.
pub fn load_foe_level(path: &Path, level_number: u32) -> Result<Vec<Foe>, CatalogError> {
    let text = fs::read_to_string(path)?;
    parse_foe_level(&text, level_number, &path.display().to_string())
}

/// Parses a foe level file body. `source_name` labels errors.
pub fn parse_foe_level(
    text: &str,
    level_number: u32,
    source_name: &str,
) -> Result<Vec<Foe>, CatalogError> {
    let mut lines = text.lines().map(str::trim);

    let expected = format!("Level_{}", level_number);
    let header = lines.next().ok_or_else(|| CatalogError::UnexpectedEof {
        source_name: source_name.to_string(),
        field: "level header",
    })?;
    if header != expected {
        return Err(CatalogError::HeaderMismatch {
            source_name: source_name.to_string(),
            expected,
            found: header.to_string(),
        });
    }

    let mut templates = Vec::new();
    loop {
        let name = match lines.next() {
            None | Some("") => break,
            Some(name) => name.to_string(),
        };
        let phy_str = next_f64(&mut lines, "phy_str", source_name)?;
        let mag_pow = next_f64(&mut lines, "mag_pow", source_name)?;
        let phy_res = positive(
            next_f64(&mut lines, "phy_res", source_name)?,
            "phy_res",
            source_name,
        )?;
        let mag_res = positive(
            next_f64(&mut lines, "mag_res", source_name)?,
            "mag_res",
            source_name,
        )?;
        let max_hp = positive(
            next_f64(&mut lines, "max_hp", source_name)?,
            "max_hp",
            source_name,
        )?;
        let max_ap = next_f64(&mut lines, "max_ap", source_name)?;
        let weight = next_i64(&mut lines, "probability weight", source_name)? as u32;
        let xp_reward = next_i64(&mut lines, "XP reward", source_name)?;

        templates.push(Foe::new(
            name,
            StatBlock::new(phy_str, mag_pow, phy_res, mag_res, max_hp, max_ap),
            weight,
            xp_reward,
        ));
    }

    debug!(level = level_number, count = templates.len(), "foes loaded");
    Ok(templates)
}

/// Loads the level threshold table from a file.
pub fn load_level_table(path: &Path) -> Result<LevelTable, CatalogError> {
    let text = fs::read_to_string(path)?;
    parse_level_table(&text, &path.display().to_string())
}

/// Parses a threshold table body: one integer per non-empty line. Values of
/// zero or below load fine and act as the terminal sentinel at runtime.
pub fn parse_level_table(text: &str, source_name: &str) -> Result<LevelTable, CatalogError> {
    let mut thresholds = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let value = line
            .parse::<i64>()
            .map_err(|_| CatalogError::NonNumericField {
                source_name: source_name.to_string(),
                field: "threshold",
                value: line.to_string(),
            })?;
        thresholds.push(value);
    }
    LevelTable::new(thresholds)
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
    source_name: &str,
) -> Result<&'a str, CatalogError> {
    lines.next().ok_or_else(|| CatalogError::UnexpectedEof {
        source_name: source_name.to_string(),
        field,
    })
}

fn next_i64<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
    source_name: &str,
) -> Result<i64, CatalogError> {
    let raw = next_line(lines, field, source_name)?;
    raw.parse::<i64>().map_err(|_| CatalogError::NonNumericField {
        source_name: source_name.to_string(),
        field,
        value: raw.to_string(),
    })
}

fn next_f64<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
    source_name: &str,
) -> Result<f64, CatalogError> {
    let raw = next_line(lines, field, source_name)?;
    raw.parse::<f64>().map_err(|_| CatalogError::NonNumericField {
        source_name: source_name.to_string(),
        field,
        value: raw.to_string(),
    })
}

fn positive(value: f64, field: &'static str, source_name: &str) -> Result<f64, CatalogError> {
    if value <= 0.0 {
        return Err(CatalogError::NonPositiveStat {
            source_name: source_name.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}
