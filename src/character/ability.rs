//! Ability definitions: what a combatant can do on its turn.

use serde::{Deserialize, Serialize};

/// Which offense/resistance pair an ability is resolved with.
/// Pure ignores mitigation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magical,
    Pure,
}

impl DamageType {
    /// Numeric code used by the external catalog format.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DamageType::Physical),
            1 => Some(DamageType::Magical),
            2 => Some(DamageType::Pure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Attack,
    Heal,
    Buff,
    Other,
}

impl AbilityKind {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(AbilityKind::Attack),
            1 => Some(AbilityKind::Heal),
            2 => Some(AbilityKind::Buff),
            3 => Some(AbilityKind::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetShape {
    Single,
    AreaOfEffect,
}

impl TargetShape {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TargetShape::Single),
            1 => Some(TargetShape::AreaOfEffect),
            _ => None,
        }
    }
}

/// One ability as owned by a character-class instance.
///
/// The `learned` flag is per character and class, not global: two knights can
/// know different subsets of the knight ability list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    /// Damage or heal magnitude fed into the resolution formula.
    pub power: f64,
    pub damage_type: DamageType,
    pub description: String,
    pub ap_cost: f64,
    pub kind: AbilityKind,
    pub target: TargetShape,
    /// Granted automatically when the class is first entered.
    pub default_granted: bool,
    /// Class level required before the ability can be learned.
    pub level_required: u32,
    /// Class points spent to learn the ability.
    pub cp_cost: i64,
    pub learned: bool,
}

impl Ability {
    /// The universal fallback action: every combatant can always swing.
    /// Foes use nothing else.
    pub fn normal_attack() -> Self {
        Self {
            name: "Normal Attack".to_string(),
            power: 10.0,
            damage_type: DamageType::Physical,
            description: "A normal attack".to_string(),
            ap_cost: 0.0,
            kind: AbilityKind::Attack,
            target: TargetShape::Single,
            default_granted: true,
            level_required: 0,
            cp_cost: 0,
            learned: true,
        }
    }

    /// Learned and affordable with the given AP pool.
    pub fn is_usable_with(&self, ap: f64) -> bool {
        self.learned && self.ap_cost <= ap
    }
}
