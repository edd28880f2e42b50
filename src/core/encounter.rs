//! Weighted foe generation for one encounter.

use std::collections::HashMap;

use rand::Rng;

use crate::combat::types::Foe;
use crate::error::CatalogError;

/// Draws `count` foes from a weighted template list.
///
/// Each template enters a flattened pool once per point of weight, and draws
/// are uniform with replacement, so weights are relative frequencies rather
/// than percentages. Every draw is cloned from its template; duplicate names
/// get a running occurrence counter (" 2", " 3", ...) while the first
/// occurrence keeps the bare name.
pub fn generate_foes(
    templates: &[Foe],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Foe>, CatalogError> {
    let mut pool = Vec::new();
    for (idx, template) in templates.iter().enumerate() {
        for _ in 0..template.weight {
            pool.push(idx);
        }
    }
    if pool.is_empty() {
        return Err(CatalogError::EmptyFoePool);
    }

    let mut occurrences: HashMap<String, u32> = HashMap::new();
    let mut roster = Vec::with_capacity(count);
    for _ in 0..count {
        let mut foe = templates[pool[rng.gen_range(0..pool.len())]].clone();
        let seen = occurrences.entry(foe.name.clone()).or_insert(0);
        *seen += 1;
        if *seen > 1 {
            foe.name = format!("{} {}", foe.name, seen);
        }
        roster.push(foe);
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::stats::StatBlock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn template(name: &str, weight: u32) -> Foe {
        Foe::new(
            name,
            StatBlock::new(10.0, 5.0, 8.0, 8.0, 60.0, 10.0),
            weight,
            50,
        )
    }

    #[test]
    fn test_zero_weight_template_is_never_drawn() {
        let templates = vec![template("A", 100), template("B", 0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let roster = generate_foes(&templates, 3, &mut rng).unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "A");
        assert_eq!(roster[1].name, "A 2");
        assert_eq!(roster[2].name, "A 3");
    }

    #[test]
    fn test_all_zero_weights_is_a_config_error() {
        let templates = vec![template("A", 0), template("B", 0)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(generate_foes(&templates, 2, &mut rng).is_err());
    }

    #[test]
    fn test_empty_template_list_is_a_config_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(generate_foes(&[], 1, &mut rng).is_err());
    }

    #[test]
    fn test_clones_are_independent_of_templates() {
        let templates = vec![template("A", 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let mut roster = generate_foes(&templates, 2, &mut rng).unwrap();
        roster[0].stats.take_damage(60.0);

        assert!(!roster[0].stats.is_alive());
        assert!(roster[1].stats.is_alive());
        assert!(templates[0].stats.is_alive());
    }

    #[test]
    fn test_weights_bias_the_draw() {
        let templates = vec![template("Common", 99), template("Rare", 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut common = 0;
        let mut rare = 0;
        for _ in 0..200 {
            let roster = generate_foes(&templates, 1, &mut rng).unwrap();
            if roster[0].name.starts_with("Common") {
                common += 1;
            } else {
                rare += 1;
            }
        }
        assert!(common > rare * 10, "common={} rare={}", common, rare);
    }

    #[test]
    fn test_distinct_names_stay_bare() {
        let templates = vec![template("A", 1), template("B", 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        // Large draw: both names must appear, and the first of each is bare.
        let roster = generate_foes(&templates, 20, &mut rng).unwrap();
        assert!(roster.iter().any(|f| f.name == "A"));
        assert!(roster.iter().any(|f| f.name == "B"));
        assert!(!roster.iter().any(|f| f.name == "A 1"));
    }
}
