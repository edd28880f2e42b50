//! Aggregated simulation results.

use serde::{Deserialize, Serialize};

use super::runner::RunStats;

/// Batch-level aggregates over a set of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub runs: u32,
    pub completed: u32,
    pub completion_rate: f64,
    pub avg_battles: f64,
    pub avg_survivors: f64,
    pub avg_final_level: f64,
    pub avg_final_class_level: f64,
    pub avg_turns_per_battle: f64,
    pub total_kos: u64,
}

impl SimReport {
    pub fn from_runs(runs: &[RunStats]) -> Self {
        let count = runs.len() as u32;
        if runs.is_empty() {
            return Self {
                runs: 0,
                completed: 0,
                completion_rate: 0.0,
                avg_battles: 0.0,
                avg_survivors: 0.0,
                avg_final_level: 0.0,
                avg_final_class_level: 0.0,
                avg_turns_per_battle: 0.0,
                total_kos: 0,
            };
        }

        let n = runs.len() as f64;
        let completed = runs.iter().filter(|r| r.completed).count() as u32;
        let total_battles: u64 = runs.iter().map(|r| u64::from(r.battles_fought)).sum();
        let total_turns: u64 = runs.iter().map(|r| r.total_turns).sum();

        Self {
            runs: count,
            completed,
            completion_rate: f64::from(completed) / n,
            avg_battles: total_battles as f64 / n,
            avg_survivors: runs.iter().map(|r| r.survivors as f64).sum::<f64>() / n,
            avg_final_level: runs.iter().map(|r| r.avg_final_level).sum::<f64>() / n,
            avg_final_class_level: runs.iter().map(|r| r.avg_final_class_level).sum::<f64>() / n,
            avg_turns_per_battle: if total_battles > 0 {
                total_turns as f64 / total_battles as f64
            } else {
                0.0
            },
            total_kos: runs.iter().map(|r| r.total_kos).sum(),
        }
    }

    /// Human-readable summary for the CLI.
    pub fn to_text(&self) -> String {
        format!(
            "Runs:                 {}\n\
             Completed:            {} ({:.1}%)\n\
             Avg battles per run:  {:.1}\n\
             Avg survivors:        {:.2}\n\
             Avg final level:      {:.2}\n\
             Avg class level:      {:.2}\n\
             Avg turns per battle: {:.1}\n\
             Total KOs seen:       {}",
            self.runs,
            self.completed,
            self.completion_rate * 100.0,
            self.avg_battles,
            self.avg_survivors,
            self.avg_final_level,
            self.avg_final_class_level,
            self.avg_turns_per_battle,
            self.total_kos,
        )
    }

    /// JSON export for tooling.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
