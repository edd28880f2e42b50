//! Player characters and the party operations built on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::class::{ClassDefinition, ClassProgress};
use super::stats::{StatAllocation, StatBlock};
use crate::error::{LearnDenial, PartyError};

/// A player-controlled party member.
///
/// The class progress map keeps an entry for every class the character has
/// ever held; `active_class` names exactly one of them. Dormant classes keep
/// their level, XP and learned abilities untouched until re-entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    stats: StatBlock,
    pub level: u32,
    pub xp: i64,
    pub class_points: i64,
    pub unspent_stat_points: u32,
    active_class: String,
    classes: BTreeMap<String, ClassProgress>,
}

impl Character {
    /// Creates a character and immediately enters the starting class.
    pub fn new(name: impl Into<String>, mut stats: StatBlock, class: &ClassDefinition) -> Self {
        class.enter(&mut stats);
        let mut classes = BTreeMap::new();
        classes.insert(class.name.clone(), class.starting_progress());
        Self {
            name: name.into(),
            stats,
            level: 0,
            xp: 0,
            class_points: 0,
            unspent_stat_points: 0,
            active_class: class.name.clone(),
            classes,
        }
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn active_class(&self) -> &str {
        &self.active_class
    }

    pub fn active_progress(&self) -> &ClassProgress {
        self.classes
            .get(&self.active_class)
            .expect("active class is always present in the progress map")
    }

    pub fn active_progress_mut(&mut self) -> &mut ClassProgress {
        self.classes
            .get_mut(&self.active_class)
            .expect("active class is always present in the progress map")
    }

    /// Progress in a class the character has held, active or dormant.
    pub fn class_progress(&self, class_name: &str) -> Option<&ClassProgress> {
        self.classes.get(class_name)
    }

    /// Switch to another class: exit the old multipliers, enter the new
    /// ones. The outgoing class's progress stays in the map; first entry
    /// into a class instantiates fresh progress from the catalog.
    pub fn change_class(&mut self, new_class: &ClassDefinition) {
        self.stats.clear_multipliers();
        new_class.enter(&mut self.stats);
        self.classes
            .entry(new_class.name.clone())
            .or_insert_with(|| new_class.starting_progress());
        debug!(character = %self.name, from = %self.active_class, to = %new_class.name, "class change");
        self.active_class = new_class.name.clone();
    }

    /// Spend points from the unspent pool on base attributes.
    pub fn spend_stat_points(&mut self, alloc: &StatAllocation) -> Result<(), PartyError> {
        let cost = alloc.point_cost();
        if cost > self.unspent_stat_points {
            return Err(PartyError::InsufficientStatPoints {
                have: self.unspent_stat_points,
                need: cost,
            });
        }
        self.stats.add_base_points(alloc);
        self.unspent_stat_points -= cost;
        Ok(())
    }

    /// Learn an ability of the active class. A denial is an ordinary result
    /// carrying the reason to show the player.
    pub fn learn_ability(&mut self, ability_name: &str) -> Result<(), LearnDenial> {
        let class_points = self.class_points;
        let class_level = self.active_progress().level;
        let ability = self
            .active_progress_mut()
            .ability_mut(ability_name)
            .ok_or_else(|| LearnDenial::UnknownAbility(ability_name.to_string()))?;

        if ability.learned {
            return Err(LearnDenial::AlreadyLearned(ability_name.to_string()));
        }
        if class_points < ability.cp_cost {
            return Err(LearnDenial::InsufficientClassPoints {
                have: class_points,
                need: ability.cp_cost,
            });
        }
        if class_level < ability.level_required {
            return Err(LearnDenial::ClassLevelTooLow {
                have: class_level,
                need: ability.level_required,
            });
        }

        ability.learned = true;
        let cost = ability.cp_cost;
        self.class_points -= cost;
        debug!(character = %self.name, ability = ability_name, "ability learned");
        Ok(())
    }
}

/// Restore every member to full HP and AP (the between-level menu action).
pub fn heal_party(party: &mut [Character]) {
    for member in party.iter_mut() {
        member.stats_mut().restore_all();
    }
}

/// True while at least one member can still fight.
pub fn any_alive(party: &[Character]) -> bool {
    party.iter().any(|c| c.stats().is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ability::{Ability, AbilityKind, DamageType, TargetShape};
    use crate::character::stats::Multipliers;

    fn knight() -> ClassDefinition {
        ClassDefinition::new(
            "Knight",
            Multipliers::new(1.2, 0.8, 1.2, 0.8, 1.2, 1.0),
            vec![
                Ability {
                    name: "Slash".to_string(),
                    power: 15.0,
                    damage_type: DamageType::Physical,
                    description: String::new(),
                    ap_cost: 5.0,
                    kind: AbilityKind::Attack,
                    target: TargetShape::Single,
                    default_granted: true,
                    level_required: 0,
                    cp_cost: 0,
                    learned: false,
                },
                Ability {
                    name: "Cleave".to_string(),
                    power: 12.0,
                    damage_type: DamageType::Physical,
                    description: String::new(),
                    ap_cost: 15.0,
                    kind: AbilityKind::Attack,
                    target: TargetShape::AreaOfEffect,
                    default_granted: false,
                    level_required: 2,
                    cp_cost: 30,
                    learned: false,
                },
            ],
        )
        .unwrap()
    }

    fn wizard() -> ClassDefinition {
        ClassDefinition::new(
            "Wizard",
            Multipliers::new(0.8, 1.2, 0.8, 1.2, 0.8, 1.3),
            Vec::new(),
        )
        .unwrap()
    }

    fn base_stats() -> StatBlock {
        StatBlock::new(20.0, 20.0, 20.0, 20.0, 1000.0, 50.0)
    }

    fn is_learned(progress: &ClassProgress, name: &str) -> bool {
        progress.abilities.iter().any(|a| a.name == name && a.learned)
    }

    #[test]
    fn test_new_character_enters_starting_class() {
        let hero = Character::new("Owen", base_stats(), &knight());
        assert_eq!(hero.active_class(), "Knight");
        assert!((hero.stats().phy_str() - 24.0).abs() < 1e-9);
        assert!((hero.stats().max_hp() - 1200.0).abs() < 1e-9);
        assert!(hero.active_progress().abilities[0].learned);
        assert!(!hero.active_progress().abilities[1].learned);
    }

    #[test]
    fn test_change_class_swaps_multipliers_and_keeps_progress() {
        let knight_class = knight();
        let wizard_class = wizard();
        let mut hero = Character::new("Elaine", base_stats(), &knight_class);
        hero.active_progress_mut().level = 3;
        hero.active_progress_mut().xp = 120;

        hero.change_class(&wizard_class);
        assert_eq!(hero.active_class(), "Wizard");
        assert!((hero.stats().mag_pow() - 24.0).abs() < 1e-9);

        // Dormant knight progress survives and is restored on re-entry.
        let dormant = hero.class_progress("Knight").unwrap();
        assert_eq!(dormant.level, 3);
        assert_eq!(dormant.xp, 120);

        hero.change_class(&knight_class);
        assert_eq!(hero.active_progress().level, 3);
        assert!((hero.stats().phy_str() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_spend_stat_points_requires_pool() {
        let mut hero = Character::new("Owen", base_stats(), &knight());
        let alloc = StatAllocation {
            phy_str: 4,
            hp: 2,
            ..StatAllocation::default()
        };

        assert_eq!(
            hero.spend_stat_points(&alloc),
            Err(PartyError::InsufficientStatPoints { have: 0, need: 6 })
        );

        hero.unspent_stat_points = 10;
        assert!(hero.spend_stat_points(&alloc).is_ok());
        assert_eq!(hero.unspent_stat_points, 4);
        assert!((hero.stats().base().phy_str - 24.0).abs() < 1e-9);
        assert!((hero.stats().base().max_hp - 1020.0).abs() < 1e-9);
    }

    #[test]
    fn test_learn_ability_denials_state_their_reason() {
        let mut hero = Character::new("Owen", base_stats(), &knight());

        assert_eq!(
            hero.learn_ability("Cleave"),
            Err(LearnDenial::InsufficientClassPoints { have: 0, need: 30 })
        );

        hero.class_points = 50;
        assert_eq!(
            hero.learn_ability("Cleave"),
            Err(LearnDenial::ClassLevelTooLow { have: 0, need: 2 })
        );

        hero.active_progress_mut().level = 2;
        assert!(hero.learn_ability("Cleave").is_ok());
        assert_eq!(hero.class_points, 20);
        assert!(is_learned(hero.active_progress(), "Cleave"));

        assert_eq!(
            hero.learn_ability("Cleave"),
            Err(LearnDenial::AlreadyLearned("Cleave".to_string()))
        );
        assert_eq!(
            hero.learn_ability("Meteor"),
            Err(LearnDenial::UnknownAbility("Meteor".to_string()))
        );
    }

    #[test]
    fn test_heal_party_restores_everyone() {
        let class = knight();
        let mut party = vec![
            Character::new("Owen", base_stats(), &class),
            Character::new("Gawain", base_stats(), &class),
        ];
        party[0].stats_mut().take_damage(5000.0);
        party[1].stats_mut().spend_ap(50.0).unwrap();

        assert!(any_alive(&party));
        heal_party(&mut party);
        assert!((party[0].stats().hp() - party[0].stats().max_hp()).abs() < 1e-9);
        assert!((party[1].stats().ap() - party[1].stats().max_ap()).abs() < 1e-9);
    }

    #[test]
    fn test_any_alive_goes_false_on_wipe() {
        let class = knight();
        let mut party = vec![Character::new("Owen", base_stats(), &class)];
        assert!(any_alive(&party));
        party[0].stats_mut().take_damage(1e9);
        assert!(!any_alive(&party));
    }
}
