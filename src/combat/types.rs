//! Combatant polymorphism, foes, and the records a battle produces.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::ability::Ability;
use crate::character::roster::Character;
use crate::character::stats::StatBlock;
use crate::core::experience::{ClassLevelUpNotice, LevelUpNotice};

/// Shared surface of anything that can take a turn in battle.
///
/// Characters and foes differ in how they pick an ability; everything else
/// the engine needs is a name and a stat block.
pub trait Combatant {
    fn name(&self) -> &str;
    fn stats(&self) -> &StatBlock;
    fn stats_mut(&mut self) -> &mut StatBlock;

    /// The action this combatant takes on its turn.
    fn choose_ability<R: Rng>(&self, rng: &mut R) -> Ability;

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &StatBlock {
        Character::stats(self)
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        Character::stats_mut(self)
    }

    /// Uniform pick among learned abilities the character can pay for,
    /// falling back to the default swing when nothing qualifies.
    fn choose_ability<R: Rng>(&self, rng: &mut R) -> Ability {
        let usable = self.active_progress().usable_abilities(Character::stats(self).ap());
        if usable.is_empty() {
            Ability::normal_attack()
        } else {
            usable[rng.gen_range(0..usable.len())].clone()
        }
    }
}

/// A computer-controlled opponent. Templates live in the per-level catalog
/// and are cloned for each encounter; clones are discarded at battle end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foe {
    pub name: String,
    pub stats: StatBlock,
    /// Relative encounter frequency. Weights need not sum to 100.
    pub weight: u32,
    /// Experience awarded to the party when this foe is defeated.
    pub xp_reward: i64,
}

impl Foe {
    pub fn new(name: impl Into<String>, stats: StatBlock, weight: u32, xp_reward: i64) -> Self {
        Self {
            name: name.into(),
            stats,
            weight,
            xp_reward,
        }
    }
}

impl Combatant for Foe {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    /// Foes have no ability list: always the default swing.
    fn choose_ability<R: Rng>(&self, _rng: &mut R) -> Ability {
        Ability::normal_attack()
    }
}

/// Which side acted on a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Party,
    Foes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Damage,
    Heal,
}

/// What happened to one target of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub target: String,
    pub kind: EffectKind,
    pub amount: f64,
    pub hp_after: f64,
    /// Set when the target's HP reached exactly zero on this turn.
    pub ko: bool,
}

/// One resolved turn, as emitted to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub side: Side,
    pub actor: String,
    pub ability: String,
    pub effects: Vec<EffectRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// Everything a battle produced, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub turns: Vec<TurnRecord>,
    /// XP awarded to each surviving character (total foe XP over the number
    /// of living members; zero on defeat).
    pub xp_per_character: f64,
    pub level_ups: Vec<LevelUpNotice>,
    pub class_level_ups: Vec<ClassLevelUpNotice>,
}
