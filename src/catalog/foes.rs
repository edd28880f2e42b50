//! Built-in foe pools, one per level.

use crate::combat::types::Foe;
use crate::character::stats::StatBlock;
use crate::core::constants::MAX_LEVEL_NUMBER;

fn foe(
    name: &str,
    phy_str: f64,
    mag_pow: f64,
    phy_res: f64,
    mag_res: f64,
    max_hp: f64,
    max_ap: f64,
    weight: u32,
    xp_reward: i64,
) -> Foe {
    Foe::new(
        name,
        StatBlock::new(phy_str, mag_pow, phy_res, mag_res, max_hp, max_ap),
        weight,
        xp_reward,
    )
}

/// Foe templates for a level. Numbers above the last defined level reuse its
/// pool, so an out-of-range request still produces a playable encounter set.
pub fn foes_for_level(level_number: u32) -> Vec<Foe> {
    match level_number.clamp(1, MAX_LEVEL_NUMBER) {
        1 => vec![
            foe("Giant Rat", 10.0, 4.0, 8.0, 8.0, 60.0, 10.0, 100, 40),
            foe("Goblin", 14.0, 6.0, 10.0, 8.0, 80.0, 10.0, 60, 70),
            foe("Wolf", 16.0, 4.0, 9.0, 9.0, 70.0, 10.0, 40, 65),
        ],
        2 => vec![
            foe("Orc", 22.0, 8.0, 14.0, 10.0, 160.0, 10.0, 80, 130),
            foe("Dark Adept", 10.0, 24.0, 10.0, 16.0, 110.0, 30.0, 50, 150),
            foe("Ogre", 30.0, 6.0, 16.0, 10.0, 260.0, 10.0, 25, 220),
        ],
        _ => vec![
            foe("Troll", 34.0, 10.0, 20.0, 14.0, 400.0, 10.0, 70, 300),
            foe("Wyvern", 38.0, 20.0, 22.0, 20.0, 500.0, 10.0, 40, 420),
            foe("Lich", 16.0, 44.0, 16.0, 30.0, 350.0, 60.0, 30, 500),
            foe("Dragon", 55.0, 40.0, 30.0, 30.0, 1200.0, 20.0, 5, 1500),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_a_pool() {
        for level in 1..=MAX_LEVEL_NUMBER {
            let pool = foes_for_level(level);
            assert!(!pool.is_empty());
            assert!(pool.iter().any(|f| f.weight > 0));
        }
    }

    #[test]
    fn test_out_of_range_levels_clamp() {
        assert_eq!(foes_for_level(0)[0].name, foes_for_level(1)[0].name);
        assert_eq!(
            foes_for_level(99)[0].name,
            foes_for_level(MAX_LEVEL_NUMBER)[0].name
        );
    }

    #[test]
    fn test_foe_stats_satisfy_formula_preconditions() {
        for level in 1..=MAX_LEVEL_NUMBER {
            for foe in foes_for_level(level) {
                assert!(foe.stats.phy_res() > 0.0, "{} phy_res", foe.name);
                assert!(foe.stats.mag_res() > 0.0, "{} mag_res", foe.name);
                assert!(foe.stats.max_hp() > 0.0, "{} max_hp", foe.name);
                assert!(foe.xp_reward > 0, "{} xp", foe.name);
            }
        }
    }

    #[test]
    fn test_later_levels_are_tougher() {
        let level1_hp: f64 = foes_for_level(1).iter().map(|f| f.stats.max_hp()).sum();
        let level3_hp: f64 = foes_for_level(3).iter().map(|f| f.stats.max_hp()).sum();
        assert!(level3_hp > level1_hp);
    }
}
