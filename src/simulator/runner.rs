//! Monte-Carlo runner: plays whole level runs with the stock party and
//! catalog, collecting statistics from the run reports.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::error;

use super::config::SimConfig;
use super::report::SimReport;
use crate::catalog::classes::{starting_party, ClassCatalog};
use crate::catalog::foes::foes_for_level;
use crate::core::experience::LevelTable;
use crate::core::level::{LevelOutcome, LevelProgression};
use crate::error::LevelError;

/// Statistics collected from one run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub completed: bool,
    pub battles_fought: u32,
    pub survivors: usize,
    pub party_size: usize,
    pub total_turns: u64,
    pub total_kos: u64,
    pub avg_final_level: f64,
    pub avg_final_class_level: f64,
}

/// Run the full simulation batch and aggregate a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + u64::from(run_idx)),
            None => ChaCha8Rng::from_entropy(),
        };

        match simulate_single_run(config, &mut rng) {
            Ok(stats) => {
                if config.verbosity >= 2 {
                    println!(
                        "Run {}/{} - {} after {} battles, {}/{} alive, avg level {:.1}",
                        run_idx + 1,
                        config.num_runs,
                        if stats.completed { "completed" } else { "wiped" },
                        stats.battles_fought,
                        stats.survivors,
                        stats.party_size,
                        stats.avg_final_level,
                    );
                }
                all_runs.push(stats);
            }
            Err(err) => {
                error!(run = run_idx, %err, "simulation run failed");
            }
        }
    }

    SimReport::from_runs(&all_runs)
}

fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> Result<RunStats, LevelError> {
    let catalog = ClassCatalog::builtin();
    let table = LevelTable::standard();
    let mut party = starting_party(&catalog)?;

    let level = LevelProgression::new(config.level_number, foes_for_level(config.level_number))
        .with_battle_cap(config.battle_cap);
    let report = level.run(&mut party, &table, rng)?;

    let (completed, battles_fought) = match report.outcome {
        LevelOutcome::Completed { battles } => (true, battles),
        LevelOutcome::PartyWiped { battle } => (false, battle),
    };

    let total_turns: u64 = report
        .encounters
        .iter()
        .map(|e| e.report.turns.len() as u64)
        .sum();
    let total_kos: u64 = report
        .encounters
        .iter()
        .flat_map(|e| e.report.turns.iter())
        .flat_map(|t| t.effects.iter())
        .filter(|effect| effect.ko)
        .count() as u64;

    let survivors = party.iter().filter(|c| c.stats().is_alive()).count();
    let avg_final_level =
        party.iter().map(|c| f64::from(c.level)).sum::<f64>() / party.len() as f64;
    let avg_final_class_level = party
        .iter()
        .map(|c| f64::from(c.active_progress().level))
        .sum::<f64>()
        / party.len() as f64;

    Ok(RunStats {
        completed,
        battles_fought,
        survivors,
        party_size: party.len(),
        total_turns,
        total_kos,
        avg_final_level,
        avg_final_class_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 2,
            seed: Some(42),
            level_number: 1,
            battle_cap: 5,
            verbosity: 0,
        };

        let first = run_simulation(&config);
        let second = run_simulation(&config);

        assert_eq!(first.runs, second.runs);
        assert_eq!(first.completed, second.completed);
        assert_eq!(first.avg_battles, second.avg_battles);
        assert_eq!(first.avg_turns_per_battle, second.avg_turns_per_battle);
    }

    #[test]
    fn test_single_run_produces_coherent_stats() {
        let config = SimConfig {
            num_runs: 1,
            seed: Some(7),
            level_number: 1,
            battle_cap: 3,
            verbosity: 0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let stats = simulate_single_run(&config, &mut rng).unwrap();

        assert_eq!(stats.party_size, 4);
        assert!(stats.battles_fought >= 1);
        assert!(stats.battles_fought <= 3);
        assert!(stats.survivors <= stats.party_size);
        assert!(stats.total_turns > 0);
        if stats.completed {
            assert!(stats.survivors >= 1);
        }
    }
}
