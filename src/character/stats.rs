//! Stat blocks and the class multiplier transform.
//!
//! A [`StatBlock`] keeps the six raw attributes as an immutable-in-spirit
//! *base* line and recomputes every derived value as `base * multiplier` on
//! access. Class changes swap the multiplier set instead of dividing the
//! stored numbers back out, so repeated class switches cannot accumulate
//! rounding drift. Current HP and AP are the only mutable pools.

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, CatalogError};

/// The six scaling factors a class applies to a stat block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub phy_str: f64,
    pub mag_pow: f64,
    pub phy_res: f64,
    pub mag_res: f64,
    pub max_hp: f64,
    pub max_ap: f64,
}

impl Multipliers {
    /// The no-op multiplier set. Foes and classless stat blocks use this.
    pub const IDENTITY: Multipliers = Multipliers {
        phy_str: 1.0,
        mag_pow: 1.0,
        phy_res: 1.0,
        mag_res: 1.0,
        max_hp: 1.0,
        max_ap: 1.0,
    };

    pub fn new(
        phy_str: f64,
        mag_pow: f64,
        phy_res: f64,
        mag_res: f64,
        max_hp: f64,
        max_ap: f64,
    ) -> Self {
        Self {
            phy_str,
            mag_pow,
            phy_res,
            mag_res,
            max_hp,
            max_ap,
        }
    }

    /// Every multiplier must be strictly positive: a zero multiplier makes
    /// the exit transform undefined.
    pub fn validate(&self, class: &str) -> Result<(), CatalogError> {
        let fields: [(&'static str, f64); 6] = [
            ("phy_str", self.phy_str),
            ("mag_pow", self.mag_pow),
            ("phy_res", self.phy_res),
            ("mag_res", self.mag_res),
            ("max_hp", self.max_hp),
            ("max_ap", self.max_ap),
        ];
        for (field, value) in fields {
            if value <= 0.0 {
                return Err(CatalogError::InvalidMultiplier {
                    class: class.to_string(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// How many stat points to allocate to each attribute when spending the
/// unspent pool. HP is bought in points (1 point = 10 HP).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatAllocation {
    pub phy_str: u32,
    pub mag_pow: u32,
    pub phy_res: u32,
    pub mag_res: u32,
    pub hp: u32,
    pub ap: u32,
}

impl StatAllocation {
    /// Total points this allocation costs from the unspent pool.
    pub fn point_cost(&self) -> u32 {
        self.phy_str + self.mag_pow + self.phy_res + self.mag_res + self.hp + self.ap
    }

    /// Raw HP added to the base line.
    pub fn hp_gain(&self) -> f64 {
        f64::from(self.hp) * crate::core::constants::HP_PER_STAT_POINT
    }
}

/// The pre-class raw attribute line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub phy_str: f64,
    pub mag_pow: f64,
    pub phy_res: f64,
    pub mag_res: f64,
    pub max_hp: f64,
    pub max_ap: f64,
}

/// Attributes and resource pools of one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    base: BaseStats,
    mult: Multipliers,
    hp: f64,
    ap: f64,
}

impl StatBlock {
    /// A fresh stat block at full HP/AP with identity multipliers.
    pub fn new(
        phy_str: f64,
        mag_pow: f64,
        phy_res: f64,
        mag_res: f64,
        max_hp: f64,
        max_ap: f64,
    ) -> Self {
        Self {
            base: BaseStats {
                phy_str,
                mag_pow,
                phy_res,
                mag_res,
                max_hp,
                max_ap,
            },
            mult: Multipliers::IDENTITY,
            hp: max_hp,
            ap: max_ap,
        }
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn multipliers(&self) -> &Multipliers {
        &self.mult
    }

    pub fn phy_str(&self) -> f64 {
        self.base.phy_str * self.mult.phy_str
    }

    pub fn mag_pow(&self) -> f64 {
        self.base.mag_pow * self.mult.mag_pow
    }

    pub fn phy_res(&self) -> f64 {
        self.base.phy_res * self.mult.phy_res
    }

    pub fn mag_res(&self) -> f64 {
        self.base.mag_res * self.mult.mag_res
    }

    pub fn max_hp(&self) -> f64 {
        self.base.max_hp * self.mult.max_hp
    }

    pub fn max_ap(&self) -> f64 {
        self.base.max_ap * self.mult.max_ap
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn ap(&self) -> f64 {
        self.ap
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Swap the active multiplier set. Current HP/AP scale by the ratio
    /// between the new and old multipliers, so the fill fraction of each
    /// pool is preserved exactly as the in-place multiply/divide would.
    pub fn apply_multipliers(&mut self, mult: Multipliers) {
        self.hp *= mult.max_hp / self.mult.max_hp;
        self.ap *= mult.max_ap / self.mult.max_ap;
        self.mult = mult;
    }

    /// Return to the identity multiplier set (exiting a class).
    pub fn clear_multipliers(&mut self) {
        self.apply_multipliers(Multipliers::IDENTITY);
    }

    /// Damage floors HP at zero. The clamp is a game rule, not recovery.
    pub fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
    }

    /// Healing caps HP at the derived maximum.
    pub fn heal(&mut self, amount: f64) {
        self.hp = (self.hp + amount).min(self.max_hp());
    }

    /// Pay an ability's AP cost. Overspending is an invariant violation:
    /// ability selection filters on affordability first.
    pub fn spend_ap(&mut self, cost: f64) -> Result<(), BattleError> {
        if cost > self.ap {
            return Err(BattleError::InsufficientAp {
                cost,
                available: self.ap,
            });
        }
        self.ap -= cost;
        Ok(())
    }

    /// Post-battle reset: AP back to full. HP is untouched.
    pub fn refill_ap(&mut self) {
        self.ap = self.max_ap();
    }

    /// Full recovery (the between-level "heal party" action).
    pub fn restore_all(&mut self) {
        self.hp = self.max_hp();
        self.ap = self.max_ap();
    }

    /// Raise the base line by a spent allocation. Current HP/AP are topped
    /// up in proportion to how full each pool was before the raise.
    pub fn add_base_points(&mut self, alloc: &StatAllocation) {
        let hp_fill = self.hp / self.max_hp();
        let ap_fill = self.ap / self.max_ap();

        self.base.phy_str += f64::from(alloc.phy_str);
        self.base.mag_pow += f64::from(alloc.mag_pow);
        self.base.phy_res += f64::from(alloc.phy_res);
        self.base.mag_res += f64::from(alloc.mag_res);
        self.base.max_hp += alloc.hp_gain();
        self.base.max_ap += f64::from(alloc.ap);

        self.hp = (self.hp + alloc.hp_gain() * self.mult.max_hp * hp_fill).min(self.max_hp());
        self.ap = (self.ap + f64::from(alloc.ap) * self.mult.max_ap * ap_fill).min(self.max_ap());
    }
}
