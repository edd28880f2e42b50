//! The built-in class catalog.
//!
//! Multiplier profiles and ability sets for the fourteen stock classes,
//! defined in code the same way the world data is. Externally authored
//! classes come in through [`crate::catalog::loader`] instead.

use std::collections::BTreeMap;

use crate::character::ability::{Ability, AbilityKind, DamageType, TargetShape};
use crate::character::class::ClassDefinition;
use crate::character::roster::Character;
use crate::character::stats::{Multipliers, StatBlock};
use crate::core::constants::{STARTING_ATTRIBUTE, STARTING_MAX_AP, STARTING_MAX_HP};
use crate::error::CatalogError;

/// Lookup of class definitions by name.
#[derive(Debug, Clone)]
pub struct ClassCatalog {
    classes: BTreeMap<String, ClassDefinition>,
}

impl ClassCatalog {
    /// The stock catalog shipped with the game.
    pub fn builtin() -> Self {
        Self::from_definitions(builtin_classes())
    }

    pub fn from_definitions(definitions: Vec<ClassDefinition>) -> Self {
        let classes = definitions
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self { classes }
    }

    pub fn get(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The default four-member roster at the standard starting stat line.
pub fn starting_party(catalog: &ClassCatalog) -> Result<Vec<Character>, CatalogError> {
    let roster = [
        ("Owen", "Knight"),
        ("Gawain", "Knight"),
        ("Elaine", "Wizard"),
        ("Vivienne", "Squire"),
    ];
    roster
        .iter()
        .map(|(name, class_name)| {
            let class = catalog
                .get(class_name)
                .ok_or_else(|| CatalogError::UnknownClass(class_name.to_string()))?;
            Ok(Character::new(*name, starting_stats(), class))
        })
        .collect()
}

fn starting_stats() -> StatBlock {
    StatBlock::new(
        STARTING_ATTRIBUTE,
        STARTING_ATTRIBUTE,
        STARTING_ATTRIBUTE,
        STARTING_ATTRIBUTE,
        STARTING_MAX_HP,
        STARTING_MAX_AP,
    )
}

#[allow(clippy::too_many_arguments)]
fn ability(
    name: &str,
    power: f64,
    damage_type: DamageType,
    description: &str,
    ap_cost: f64,
    kind: AbilityKind,
    target: TargetShape,
    default_granted: bool,
    level_required: u32,
    cp_cost: i64,
) -> Ability {
    Ability {
        name: name.to_string(),
        power,
        damage_type,
        description: description.to_string(),
        ap_cost,
        kind,
        target,
        default_granted,
        level_required,
        cp_cost,
        learned: default_granted,
    }
}

fn class(name: &str, multipliers: Multipliers, abilities: Vec<Ability>) -> ClassDefinition {
    ClassDefinition::new(name, multipliers, abilities)
        .expect("builtin class multipliers are positive")
}

/// All fourteen stock classes.
pub fn builtin_classes() -> Vec<ClassDefinition> {
    use AbilityKind::{Attack, Buff, Heal};
    use DamageType::{Magical, Physical, Pure};
    use TargetShape::{AreaOfEffect, Single};

    vec![
        class(
            "Squire",
            Multipliers::new(0.8, 0.8, 0.8, 0.8, 0.8, 0.8),
            vec![
                ability("Bash", 12.0, Physical, "A clumsy but earnest blow.", 5.0, Attack, Single, true, 0, 0),
                ability("Shield Rush", 18.0, Physical, "Charge behind the shield.", 10.0, Attack, Single, false, 2, 20),
            ],
        ),
        class(
            "Knight",
            Multipliers::new(1.2, 0.8, 1.2, 0.8, 1.2, 1.0),
            vec![
                ability("Slash", 15.0, Physical, "A clean sword arc.", 5.0, Attack, Single, true, 0, 0),
                ability("Cleave", 12.0, Physical, "One swing through the whole line.", 15.0, Attack, AreaOfEffect, false, 2, 30),
                ability("Champion's Blow", 28.0, Physical, "Everything behind one strike.", 20.0, Attack, Single, false, 4, 60),
            ],
        ),
        class(
            "Wizard",
            Multipliers::new(0.8, 1.2, 0.8, 1.2, 0.8, 1.3),
            vec![
                ability("Fireball", 20.0, Magical, "A burning bolt.", 10.0, Attack, Single, true, 0, 0),
                ability("Thunderstorm", 15.0, Magical, "Lightning over the battlefield.", 20.0, Attack, AreaOfEffect, false, 2, 30),
                ability("Disintegrate", 30.0, Pure, "Unmakes what it touches.", 30.0, Attack, Single, false, 5, 80),
            ],
        ),
        class(
            "Rogue",
            Multipliers::new(1.1, 1.0, 1.0, 0.8, 1.1, 1.1),
            vec![
                ability("Stab", 14.0, Physical, "Quick and low.", 5.0, Attack, Single, true, 0, 0),
                ability("Fan of Knives", 10.0, Physical, "Steel in every direction.", 15.0, Attack, AreaOfEffect, false, 2, 25),
            ],
        ),
        class(
            "Archer",
            Multipliers::new(1.2, 1.0, 0.8, 0.8, 0.9, 1.0),
            vec![
                ability("Aimed Shot", 16.0, Physical, "One arrow, well placed.", 5.0, Attack, Single, true, 0, 0),
                ability("Arrow Rain", 11.0, Physical, "The sky goes dark.", 18.0, Attack, AreaOfEffect, false, 3, 35),
            ],
        ),
        class(
            "Monk",
            Multipliers::new(1.3, 1.3, 1.3, 1.3, 1.3, 1.0),
            vec![
                ability("Palm Strike", 14.0, Physical, "An open-handed blow.", 5.0, Attack, Single, true, 0, 0),
                ability("Inner Calm", 8.0, Physical, "Breath steadies the body.", 12.0, Heal, Single, false, 2, 25),
                ability("Hundred Fists", 22.0, Physical, "Too fast to count.", 20.0, Attack, Single, false, 4, 50),
            ],
        ),
        class(
            "Cleric",
            Multipliers::new(0.8, 1.2, 0.8, 1.0, 0.9, 1.2),
            vec![
                ability("Smite", 14.0, Magical, "Judgement, delivered.", 8.0, Attack, Single, true, 0, 0),
                ability("Prayer", 10.0, Magical, "A mending word.", 10.0, Heal, Single, true, 0, 0),
                ability("Mass Prayer", 8.0, Magical, "A word for everyone.", 25.0, Heal, AreaOfEffect, false, 3, 40),
            ],
        ),
        class(
            "Necromancer",
            Multipliers::new(1.4, 1.4, 1.0, 1.4, 1.0, 1.2),
            vec![
                ability("Soul Drain", 16.0, Magical, "Takes what keeps them standing.", 10.0, Attack, Single, true, 0, 0),
                ability("Plague Wind", 12.0, Magical, "It spreads.", 20.0, Attack, AreaOfEffect, false, 3, 45),
            ],
        ),
        class(
            "Holy Knight",
            Multipliers::new(1.5, 1.2, 1.5, 1.2, 1.1, 1.0),
            vec![
                ability("Radiant Slash", 18.0, Physical, "A blade full of daylight.", 8.0, Attack, Single, true, 0, 0),
                ability("Lay on Hands", 12.0, Physical, "Warmth closes the wound.", 15.0, Heal, Single, false, 2, 35),
            ],
        ),
        class(
            "Dark Knight",
            Multipliers::new(1.5, 1.2, 1.5, 1.2, 1.1, 1.0),
            vec![
                ability("Grim Slash", 18.0, Physical, "A blade that remembers.", 8.0, Attack, Single, true, 0, 0),
                ability("Doom Wave", 13.0, Magical, "Dread rolls outward.", 18.0, Attack, AreaOfEffect, false, 3, 40),
            ],
        ),
        class(
            "Barbarian",
            Multipliers::new(1.7, 0.5, 0.7, 0.7, 1.6, 0.9),
            vec![
                ability("Crush", 20.0, Physical, "Subtlety is for other people.", 5.0, Attack, Single, true, 0, 0),
                ability("Whirlwind", 14.0, Physical, "Everyone within reach.", 18.0, Attack, AreaOfEffect, false, 3, 40),
            ],
        ),
        class(
            "Scholar",
            Multipliers::new(0.8, 1.6, 0.9, 1.4, 1.0, 2.0),
            vec![
                ability("Thesis", 18.0, Magical, "A pointed argument.", 10.0, Attack, Single, true, 0, 0),
                ability("Field Triage", 9.0, Magical, "Applied theory.", 12.0, Heal, Single, false, 2, 30),
                ability("Peer Review", 0.0, Magical, "Devastating in principle.", 8.0, Buff, Single, false, 3, 20),
            ],
        ),
        class(
            "Ninja",
            Multipliers::new(1.4, 1.4, 1.0, 1.4, 1.0, 1.2),
            vec![
                ability("Shuriken", 13.0, Physical, "Already thrown.", 5.0, Attack, Single, true, 0, 0),
                ability("Shadow Dance", 16.0, Physical, "Strikes from three places at once.", 18.0, Attack, AreaOfEffect, false, 3, 45),
            ],
        ),
        class(
            "Beastmaster",
            Multipliers::new(1.5, 1.0, 1.5, 1.5, 2.0, 1.0),
            vec![
                ability("Maul", 17.0, Physical, "The pack strikes first.", 5.0, Attack, Single, true, 0, 0),
                ability("Stampede", 13.0, Physical, "Hooves, claws, and no order at all.", 20.0, Attack, AreaOfEffect, false, 3, 45),
            ],
        ),
    ]
}
