//! Shared combat math for the battle engine, simulator and tests.
//!
//! These pure functions compute damage and heal amounts without touching
//! combatant state. Resistances and caster max HP are strictly positive by
//! catalog validation, so the divisions here are always defined.

use crate::character::ability::{Ability, DamageType};
use crate::character::stats::StatBlock;

/// Damage an ability inflicts on one defender.
///
/// Physical and Magical damage scale with the attacker's offense over the
/// defender's matching resistance; Pure damage ignores mitigation.
pub fn attack_damage(ability: &Ability, attacker: &StatBlock, defender: &StatBlock) -> f64 {
    let raw = match ability.damage_type {
        DamageType::Physical => ability.power * (attacker.phy_str() / defender.phy_res()),
        DamageType::Magical => ability.power * (attacker.mag_pow() / defender.mag_res()),
        DamageType::Pure => ability.power,
    };
    raw.round()
}

/// HP an ability restores on one target.
///
/// A heal is amplified by the caster's offense and the target's matching
/// resistance, normalized by the caster's max HP. Pure heals multiply all
/// four stats. The target-resistance scaling (more resistance, bigger heal)
/// is the established rule, deliberately not the inverse of the damage
/// formula.
pub fn heal_amount(ability: &Ability, caster: &StatBlock, target: &StatBlock) -> f64 {
    let raw = match ability.damage_type {
        DamageType::Physical => {
            ability.power * caster.phy_str() * target.phy_res() / caster.max_hp()
        }
        DamageType::Magical => {
            ability.power * caster.mag_pow() * target.mag_res() / caster.max_hp()
        }
        DamageType::Pure => {
            ability.power * caster.phy_str() * caster.mag_pow() * target.phy_res()
                * target.mag_res()
                / caster.max_hp()
        }
    };
    raw.round()
}
