//! Level progression: encounters back to back until the cap or a wipe.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::character::roster::{any_alive, Character};
use crate::combat::engine::BattleEngine;
use crate::combat::types::{BattleReport, Foe};
use crate::core::constants::{BATTLES_PER_LEVEL, MAX_FOES_PER_ENCOUNTER, MIN_FOES_PER_ENCOUNTER};
use crate::core::encounter::generate_foes;
use crate::core::experience::LevelTable;
use crate::error::LevelError;

/// How a level run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// The battle cap was reached with the party still standing.
    Completed { battles: u32 },
    /// Every party member hit zero HP.
    PartyWiped { battle: u32 },
}

/// One encounter inside a level run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub battle: u32,
    /// Foe names as presented at encounter start.
    pub roster: Vec<String>,
    pub report: BattleReport,
}

/// Everything a level run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRunReport {
    pub level_number: u32,
    pub outcome: LevelOutcome,
    pub encounters: Vec<EncounterRecord>,
}

/// A playable level: a foe pool and a battle cap.
#[derive(Debug, Clone)]
pub struct LevelProgression {
    pub level_number: u32,
    pub foe_pool: Vec<Foe>,
    pub battle_cap: u32,
}

impl LevelProgression {
    pub fn new(level_number: u32, foe_pool: Vec<Foe>) -> Self {
        Self {
            level_number,
            foe_pool,
            battle_cap: BATTLES_PER_LEVEL,
        }
    }

    pub fn with_battle_cap(mut self, battle_cap: u32) -> Self {
        self.battle_cap = battle_cap;
        self
    }

    /// Runs battles until the cap is reached or the party is wiped. No
    /// healing happens between battles; only the engine's post-battle AP
    /// refill carries over.
    pub fn run(
        &self,
        party: &mut [Character],
        table: &LevelTable,
        rng: &mut impl Rng,
    ) -> Result<LevelRunReport, LevelError> {
        info!(level = self.level_number, cap = self.battle_cap, "level start");
        let mut encounters = Vec::new();
        let mut battle = 0;

        while any_alive(party) && battle < self.battle_cap {
            battle += 1;
            let count = rng.gen_range(MIN_FOES_PER_ENCOUNTER..=MAX_FOES_PER_ENCOUNTER);
            let mut foes = generate_foes(&self.foe_pool, count, rng)?;
            let roster: Vec<String> = foes.iter().map(|f| f.name.clone()).collect();
            debug!(battle, roster = ?roster, "encounter");

            let report = BattleEngine::new(party, &mut foes).fight(table, rng)?;
            encounters.push(EncounterRecord {
                battle,
                roster,
                report,
            });
        }

        let outcome = if any_alive(party) {
            LevelOutcome::Completed { battles: battle }
        } else {
            LevelOutcome::PartyWiped { battle }
        };
        info!(level = self.level_number, ?outcome, "level end");
        Ok(LevelRunReport {
            level_number: self.level_number,
            outcome,
            encounters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::ClassDefinition;
    use crate::character::stats::{Multipliers, StatBlock};
    use crate::combat::types::BattleOutcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squire() -> ClassDefinition {
        ClassDefinition::new("Squire", Multipliers::IDENTITY, Vec::new()).unwrap()
    }

    fn strong_party() -> Vec<Character> {
        vec![
            Character::new(
                "Owen",
                StatBlock::new(200.0, 200.0, 200.0, 200.0, 100000.0, 50.0),
                &squire(),
            ),
            Character::new(
                "Elaine",
                StatBlock::new(200.0, 200.0, 200.0, 200.0, 100000.0, 50.0),
                &squire(),
            ),
        ]
    }

    fn weak_party() -> Vec<Character> {
        vec![Character::new(
            "Vivienne",
            StatBlock::new(1.0, 1.0, 5.0, 5.0, 20.0, 10.0),
            &squire(),
        )]
    }

    fn rat_pool() -> Vec<Foe> {
        // Enough HP that even the strong test party needs a few turns,
        // guaranteeing the rats always get to swing back.
        vec![Foe::new(
            "Giant Rat",
            StatBlock::new(10.0, 5.0, 8.0, 8.0, 600.0, 10.0),
            100,
            50,
        )]
    }

    fn dragon_pool() -> Vec<Foe> {
        vec![Foe::new(
            "Dragon",
            StatBlock::new(500.0, 500.0, 200.0, 200.0, 100000.0, 50.0),
            100,
            5000,
        )]
    }

    #[test]
    fn test_strong_party_completes_the_cap() {
        let level = LevelProgression::new(1, rat_pool()).with_battle_cap(5);
        let mut party = strong_party();
        let table = LevelTable::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = level.run(&mut party, &table, &mut rng).unwrap();

        assert_eq!(report.outcome, LevelOutcome::Completed { battles: 5 });
        assert_eq!(report.encounters.len(), 5);
        for encounter in &report.encounters {
            assert_eq!(encounter.report.outcome, BattleOutcome::Won);
            assert!(!encounter.roster.is_empty());
            assert!(encounter.roster.len() <= MAX_FOES_PER_ENCOUNTER);
        }
        // Winning battles paid XP.
        assert!(party[0].xp > 0);
    }

    #[test]
    fn test_weak_party_gets_wiped() {
        let level = LevelProgression::new(3, dragon_pool()).with_battle_cap(50);
        let mut party = weak_party();
        let table = LevelTable::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let report = level.run(&mut party, &table, &mut rng).unwrap();

        match report.outcome {
            LevelOutcome::PartyWiped { battle } => assert_eq!(battle, 1),
            other => panic!("expected a wipe, got {:?}", other),
        }
        assert!(!any_alive(&party));
    }

    #[test]
    fn test_no_healing_between_battles() {
        let level = LevelProgression::new(1, rat_pool()).with_battle_cap(3);
        let mut party = strong_party();
        let table = LevelTable::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        level.run(&mut party, &table, &mut rng).unwrap();

        // Rats land hits across the battles and the party is never healed
        // between them.
        let scratched = party.iter().any(|c| c.stats().hp() < c.stats().max_hp());
        assert!(scratched);
    }

    #[test]
    fn test_empty_foe_pool_fails_the_run() {
        let level = LevelProgression::new(1, Vec::new()).with_battle_cap(3);
        let mut party = strong_party();
        let table = LevelTable::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        assert!(level.run(&mut party, &table, &mut rng).is_err());
    }

    #[test]
    fn test_duplicate_foes_are_numbered_in_roster() {
        let level = LevelProgression::new(1, rat_pool()).with_battle_cap(1);
        let mut party = strong_party();
        let table = LevelTable::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let report = level.run(&mut party, &table, &mut rng).unwrap();
        let roster = &report.encounters[0].roster;
        assert_eq!(roster[0], "Giant Rat");
        if roster.len() > 1 {
            assert_eq!(roster[1], "Giant Rat 2");
        }
    }
}
