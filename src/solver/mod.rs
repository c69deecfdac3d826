//! Solver adapter: the status taxonomy shared by both encodings, the
//! wall-clock budget handling, and the `save_model` debugging side-channel.

pub mod assignment;
pub mod pairwise;

use crate::data::{SolveConfig, TimetableInput};
use crate::schedule::Schedule;
use good_lp::ResolutionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Smallest budget actually handed to HiGHS when the configured limit is
/// zero or negative.
pub const MIN_TIME_LIMIT_SECONDS: f64 = 0.01;

/// Terminal status of one solve attempt.
///
/// `Infeasible` is a hard negative (no schedule exists for these capacities
/// and conflicts), while `NotSolved` means the budget ran out first and a
/// retry with a larger budget or the other encoding may still succeed.
/// `Unbounded` and `Abnormal` indicate a modeling defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    NotSolved,
    Abnormal,
}

impl SolveStatus {
    /// True for the statuses that come with variable values attached.
    pub fn has_schedule(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unbounded => "UNBOUNDED",
            SolveStatus::NotSolved => "NOT_SOLVED",
            SolveStatus::Abnormal => "ABNORMAL",
        };
        f.write_str(name)
    }
}

/// Which model formulation to hand to the solver. Both enforce the same
/// schedule feasibility contract and are interchangeable from the caller's
/// point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One section variable per subject plus reified same-section booleans.
    /// Quadratic-times-rooms constraint count; struggles on large inputs.
    Pairwise,
    /// One binary per (subject, room, section) triple; cubic variable count
    /// but plain linear rows throughout.
    #[default]
    Assignment,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Pairwise => f.write_str("pairwise"),
            Encoding::Assignment => f.write_str("assignment"),
        }
    }
}

/// Result of one solve attempt. `schedule` is present exactly when the
/// status carries variable values; a non-schedule status is never papered
/// over with a default timetable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub schedule: Option<Schedule>,
}

/// Validates the input and configuration, then builds and solves the model
/// under the chosen encoding. `Err` is reserved for input/configuration/IO
/// faults; solver outcomes (including `INFEASIBLE` and `NOT_SOLVED`) are
/// reported through the returned status.
pub fn solve(
    input: &TimetableInput,
    config: &SolveConfig,
    encoding: Encoding,
) -> Result<SolveOutcome, String> {
    input.validate()?;
    config.validate()?;
    match encoding {
        Encoding::Pairwise => pairwise::solve(input, config),
        Encoding::Assignment => assignment::solve(input, config),
    }
}

/// The configured budget, clamped to a minimal positive value so that a
/// zero/negative limit still reaches the solver as a real (tiny) budget and
/// surfaces as `NOT_SOLVED` rather than an error.
pub(crate) fn effective_time_limit(config: &SolveConfig) -> f64 {
    if config.time_limit_seconds > 0.0 {
        config.time_limit_seconds
    } else {
        MIN_TIME_LIMIT_SECONDS
    }
}

/// Maps a solver failure onto the status taxonomy. HiGHS reports budget
/// exhaustion through its termination message, which is all good_lp exposes
/// for non-optimal terminations.
pub(crate) fn status_for_failure(error: &ResolutionError) -> SolveStatus {
    match error {
        ResolutionError::Infeasible => SolveStatus::Infeasible,
        ResolutionError::Unbounded => SolveStatus::Unbounded,
        other => {
            if other.to_string().to_lowercase().contains("time") {
                SolveStatus::NotSolved
            } else {
                SolveStatus::Abnormal
            }
        }
    }
}

/// Size summary of a built model, written out when `save_model` is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    pub encoding: Encoding,
    pub num_variables: usize,
    pub num_constraints: usize,
    pub max_sections: usize,
    pub time_limit_seconds: f64,
}

impl ModelStats {
    pub(crate) fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json)
            .map_err(|e| format!("cannot write model summary {}: {}", path.display(), e))
    }
}
