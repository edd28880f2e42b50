//! The battle engine: one encounter from first turn to outcome.
//!
//! The engine is the sole mutator of combatant state while a battle runs.
//! Turn order alternates strictly between the party (odd turns) and the foe
//! side (even turns); each turn one random living member of the acting side
//! resolves one ability. The loop ends when a full side is at zero HP, then
//! victory rewards or defeat are applied and surviving characters get their
//! AP refilled.

use rand::Rng;
use tracing::debug;

use super::math::{attack_damage, heal_amount};
use super::types::{
    BattleOutcome, BattleReport, Combatant, EffectKind, EffectRecord, Foe, Side, TurnRecord,
};
use crate::character::ability::{Ability, AbilityKind, TargetShape};
use crate::character::roster::Character;
use crate::core::experience::{apply_class_experience, apply_experience, LevelTable};
use crate::error::BattleError;

/// Upper bound on rejection-sampling draws when picking a living fighter.
/// With the battle-over predicate already checked this never triggers; it
/// exists to keep a broken caller from spinning forever.
const FIGHTER_DRAW_LIMIT: u32 = 10_000;

/// Runs a single battle between a party and a foe roster.
pub struct BattleEngine<'a> {
    party: &'a mut [Character],
    foes: &'a mut [Foe],
    turns: Vec<TurnRecord>,
}

impl<'a> BattleEngine<'a> {
    pub fn new(party: &'a mut [Character], foes: &'a mut [Foe]) -> Self {
        Self {
            party,
            foes,
            turns: Vec::new(),
        }
    }

    /// One full side is wiped.
    pub fn is_over(&self) -> bool {
        self.party.iter().all(|c| !c.is_alive()) || self.foes.iter().all(|f| !f.is_alive())
    }

    /// Runs the battle to completion and applies end-of-battle rewards.
    pub fn fight(mut self, table: &LevelTable, rng: &mut impl Rng) -> Result<BattleReport, BattleError> {
        debug!(
            party = self.party.len(),
            foes = self.foes.len(),
            "battle start"
        );
        let mut turn: u32 = 1;
        while !self.is_over() {
            let record = if turn % 2 == 1 {
                act(turn, Side::Party, &mut *self.party, &mut *self.foes, rng)?
            } else {
                act(turn, Side::Foes, &mut *self.foes, &mut *self.party, rng)?
            };
            self.turns.push(record);
            turn += 1;
        }
        self.finish(table)
    }

    fn finish(self, table: &LevelTable) -> Result<BattleReport, BattleError> {
        let won = self.party.iter().any(|c| c.is_alive());
        let (xp_per_character, level_ups, class_level_ups) = if won {
            let total_xp: i64 = self.foes.iter().map(|f| f.xp_reward).sum();
            let living = self.party.iter().filter(|c| c.is_alive()).count();
            let share = total_xp as f64 / living as f64;
            let level_ups = apply_experience(share, self.party, table);
            let class_level_ups = apply_class_experience(share, self.party, table);
            (share, level_ups, class_level_ups)
        } else {
            (0.0, Vec::new(), Vec::new())
        };

        // Post-battle reset: survivors get their AP back, HP stays as it is.
        for member in self.party.iter_mut().filter(|c| c.is_alive()) {
            member.stats_mut().refill_ap();
        }

        let outcome = if won {
            BattleOutcome::Won
        } else {
            BattleOutcome::Lost
        };
        debug!(?outcome, turns = self.turns.len(), "battle end");
        Ok(BattleReport {
            outcome,
            turns: self.turns,
            xp_per_character,
            level_ups,
            class_level_ups,
        })
    }
}

/// Uniformly picks a living member of `side` by rejection sampling.
/// Precondition: the caller has verified at least one member is alive.
fn choose_living<T: Combatant>(side: &[T], rng: &mut impl Rng) -> Result<usize, BattleError> {
    if side.iter().all(|c| !c.is_alive()) {
        return Err(BattleError::NoLivingFighter);
    }
    for _ in 0..FIGHTER_DRAW_LIMIT {
        let idx = rng.gen_range(0..side.len());
        if side[idx].is_alive() {
            return Ok(idx);
        }
    }
    Err(BattleError::NoLivingFighter)
}

/// Resolves one turn for the acting side against the opposing side.
fn act<A: Combatant, D: Combatant>(
    turn: u32,
    side: Side,
    acting: &mut [A],
    opposing: &mut [D],
    rng: &mut impl Rng,
) -> Result<TurnRecord, BattleError> {
    let actor = choose_living(acting, rng)?;
    let ability = acting[actor].choose_ability(rng);

    match ability.kind {
        AbilityKind::Attack => {
            let targets: Vec<usize> = match ability.target {
                TargetShape::Single => vec![choose_living(opposing, rng)?],
                TargetShape::AreaOfEffect => (0..opposing.len()).collect(),
            };
            resolve_attack(turn, side, &mut acting[actor], opposing, &targets, &ability)
        }
        AbilityKind::Heal => {
            let targets: Vec<usize> = match ability.target {
                TargetShape::Single => vec![choose_living(acting, rng)?],
                TargetShape::AreaOfEffect => (0..acting.len()).collect(),
            };
            resolve_heal(turn, side, acting, actor, &targets, &ability)
        }
        AbilityKind::Buff | AbilityKind::Other => {
            // No buff resolution exists; the turn is spent with no effect
            // and no AP cost.
            Ok(TurnRecord {
                turn,
                side,
                actor: acting[actor].name().to_string(),
                ability: ability.name.clone(),
                effects: Vec::new(),
            })
        }
    }
}

/// Applies an attack to each target index. AP is paid before resolution;
/// already-dead targets are no-ops thanks to the zero floor.
fn resolve_attack<A: Combatant, D: Combatant>(
    turn: u32,
    side: Side,
    attacker: &mut A,
    defenders: &mut [D],
    targets: &[usize],
    ability: &Ability,
) -> Result<TurnRecord, BattleError> {
    attacker.stats_mut().spend_ap(ability.ap_cost)?;
    let attacker_stats = attacker.stats().clone();

    let mut effects = Vec::with_capacity(targets.len());
    for &idx in targets {
        let defender = &mut defenders[idx];
        let was_alive = defender.is_alive();
        let damage = attack_damage(ability, &attacker_stats, defender.stats());
        defender.stats_mut().take_damage(damage);
        let hp_after = defender.stats().hp();
        effects.push(EffectRecord {
            target: defender.name().to_string(),
            kind: EffectKind::Damage,
            amount: damage,
            hp_after,
            ko: was_alive && hp_after == 0.0,
        });
    }

    Ok(TurnRecord {
        turn,
        side,
        actor: attacker.name().to_string(),
        ability: ability.name.clone(),
        effects,
    })
}

/// Applies a heal to each target index on the caster's own side. The caster
/// stats are snapshotted first since the caster may also be a target.
fn resolve_heal<T: Combatant>(
    turn: u32,
    side: Side,
    allies: &mut [T],
    caster: usize,
    targets: &[usize],
    ability: &Ability,
) -> Result<TurnRecord, BattleError> {
    allies[caster].stats_mut().spend_ap(ability.ap_cost)?;
    let caster_stats = allies[caster].stats().clone();
    let actor = allies[caster].name().to_string();

    let mut effects = Vec::with_capacity(targets.len());
    for &idx in targets {
        let target = &mut allies[idx];
        let amount = heal_amount(ability, &caster_stats, target.stats());
        target.stats_mut().heal(amount);
        effects.push(EffectRecord {
            target: target.name().to_string(),
            kind: EffectKind::Heal,
            amount,
            hp_after: target.stats().hp(),
            ko: false,
        });
    }

    Ok(TurnRecord {
        turn,
        side,
        actor,
        ability: ability.name.clone(),
        effects,
    })
}
