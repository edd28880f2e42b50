//! Class definitions and per-character class progress.

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::stats::{Multipliers, StatBlock};
use crate::error::CatalogError;

/// Catalog-side description of a class: a multiplier profile plus the
/// ability list members of the class can learn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    pub multipliers: Multipliers,
    pub abilities: Vec<Ability>,
}

impl ClassDefinition {
    /// Builds a definition, rejecting zero or negative multipliers: the exit
    /// transform divides by them.
    pub fn new(
        name: impl Into<String>,
        multipliers: Multipliers,
        abilities: Vec<Ability>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        multipliers.validate(&name)?;
        Ok(Self {
            name,
            multipliers,
            abilities,
        })
    }

    /// Apply this class's multipliers to a stat block.
    pub fn enter(&self, stats: &mut StatBlock) {
        stats.apply_multipliers(self.multipliers);
    }

    /// Undo this class's multipliers, restoring pre-class values.
    /// `exit(enter(s))` is the identity up to float rounding.
    pub fn exit(&self, stats: &mut StatBlock) {
        stats.clear_multipliers();
    }

    /// Fresh progress for a character entering this class for the first
    /// time. Default-granted abilities start learned.
    pub fn starting_progress(&self) -> ClassProgress {
        let abilities = self
            .abilities
            .iter()
            .map(|a| {
                let mut ability = a.clone();
                ability.learned = ability.default_granted;
                ability
            })
            .collect();
        ClassProgress {
            level: 0,
            xp: 0,
            abilities,
        }
    }
}

/// A character's standing in one class. Progress is kept for every class the
/// character has ever held, keyed by class name, with exactly one active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProgress {
    pub level: u32,
    pub xp: i64,
    pub abilities: Vec<Ability>,
}

impl ClassProgress {
    /// Abilities the owner can actually use this turn.
    pub fn usable_abilities(&self, ap: f64) -> Vec<&Ability> {
        self.abilities
            .iter()
            .filter(|a| a.is_usable_with(ap))
            .collect()
    }

    pub fn ability_mut(&mut self, name: &str) -> Option<&mut Ability> {
        self.abilities.iter_mut().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ability::{AbilityKind, DamageType, TargetShape};

    fn test_ability(name: &str, ap_cost: f64, default_granted: bool) -> Ability {
        Ability {
            name: name.to_string(),
            power: 15.0,
            damage_type: DamageType::Physical,
            description: String::new(),
            ap_cost,
            kind: AbilityKind::Attack,
            target: TargetShape::Single,
            default_granted,
            level_required: 2,
            cp_cost: 30,
            learned: false,
        }
    }

    #[test]
    fn test_new_rejects_zero_multiplier() {
        let result = ClassDefinition::new(
            "Broken",
            Multipliers::new(1.0, 1.0, 0.0, 1.0, 1.0, 1.0),
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_enter_exit_round_trip() {
        let class = ClassDefinition::new(
            "Knight",
            Multipliers::new(1.2, 0.8, 1.2, 0.8, 1.2, 1.0),
            Vec::new(),
        )
        .unwrap();

        let mut stats = StatBlock::new(20.0, 20.0, 20.0, 20.0, 1000.0, 50.0);
        class.enter(&mut stats);
        assert!((stats.phy_str() - 24.0).abs() < 1e-9);
        class.exit(&mut stats);
        assert!((stats.phy_str() - 20.0).abs() < 1e-9);
        assert!((stats.max_hp() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_starting_progress_learns_defaults_only() {
        let class = ClassDefinition::new(
            "Knight",
            Multipliers::IDENTITY,
            vec![
                test_ability("Slash", 5.0, true),
                test_ability("Cleave", 15.0, false),
            ],
        )
        .unwrap();

        let progress = class.starting_progress();
        assert_eq!(progress.level, 0);
        assert_eq!(progress.xp, 0);
        assert!(progress.abilities[0].learned);
        assert!(!progress.abilities[1].learned);
    }

    #[test]
    fn test_usable_abilities_filters_on_learned_and_ap() {
        let class = ClassDefinition::new(
            "Knight",
            Multipliers::IDENTITY,
            vec![
                test_ability("Slash", 5.0, true),
                test_ability("Cleave", 15.0, true),
            ],
        )
        .unwrap();
        let progress = class.starting_progress();

        let usable = progress.usable_abilities(10.0);
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].name, "Slash");

        let usable = progress.usable_abilities(20.0);
        assert_eq!(usable.len(), 2);
    }
}
