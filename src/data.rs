use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Type aliases for clarity
pub type SubjectId = usize;
pub type RoomId = usize;
pub type SectionId = usize;

/// Default number of sections (time slots) per day.
pub const DEFAULT_SECTIONS_PER_DAY: usize = 4;

/// Default wall-clock budget handed to the solver, in seconds.
pub const DEFAULT_TIME_LIMIT_SECONDS: f64 = 600.0;

/// The complete input for one timetabling problem: a set of subjects
/// (identified by index, each with a student head count), a set of rooms
/// (each with a seat count), and the pairs of subjects that must never
/// run in the same section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableInput {
    pub student_counts: Vec<u32>,
    pub seat_counts: Vec<u32>,
    pub conflicts: Vec<(SubjectId, SubjectId)>,
}

impl TimetableInput {
    pub fn num_subjects(&self) -> usize {
        self.student_counts.len()
    }

    pub fn num_rooms(&self) -> usize {
        self.seat_counts.len()
    }

    /// Rejects inputs that can never form a well-posed model: empty subject
    /// or room sets, and conflict pairs referencing subjects outside
    /// `[0, num_subjects)` or pairing a subject with itself. Capacity
    /// shortfalls (a zero-seat room, say) are not input errors; they belong
    /// to the solver, which reports them as INFEASIBLE.
    pub fn validate(&self) -> Result<(), String> {
        if self.student_counts.is_empty() {
            return Err("input must contain at least one subject".to_string());
        }
        if self.seat_counts.is_empty() {
            return Err("input must contain at least one room".to_string());
        }
        let n = self.num_subjects();
        for &(a, b) in &self.conflicts {
            if a >= n || b >= n {
                return Err(format!(
                    "conflict pair ({}, {}) references a subject outside [0, {})",
                    a, b, n
                ));
            }
            if a == b {
                return Err(format!(
                    "conflict pair ({}, {}) pairs a subject with itself",
                    a, b
                ));
            }
        }
        Ok(())
    }
}

/// Tunables for one solve attempt. All fields have defaults, so an empty
/// JSON object (or omitting the config entirely) is a valid configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveConfig {
    /// Number of sections per day used when decomposing a section index
    /// into (day, slot). Must be at least 1.
    pub sections_per_day: usize,
    /// Overrides the number of days available. When unset, defaults to
    /// ceil(num_subjects / sections_per_day).
    pub num_days: Option<usize>,
    /// Wall-clock budget for the solver. Non-positive values are clamped
    /// to a minimal positive budget at solve time.
    pub time_limit_seconds: f64,
    /// Debugging side-channel: when set, a JSON summary of the built model
    /// is written to this path before solving.
    pub save_model: Option<PathBuf>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            sections_per_day: DEFAULT_SECTIONS_PER_DAY,
            num_days: None,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            save_model: None,
        }
    }
}

impl SolveConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.sections_per_day < 1 {
            return Err("sectionsPerDay must be at least 1".to_string());
        }
        if self.num_days == Some(0) {
            return Err("numDays must be at least 1 when set".to_string());
        }
        Ok(())
    }

    pub fn num_days(&self, num_subjects: usize) -> usize {
        self.num_days
            .unwrap_or_else(|| num_subjects.div_ceil(self.sections_per_day))
    }

    /// Upper bound on the number of distinct sections the schedule may use.
    /// One section per subject is always enough, so that is the default;
    /// an explicit day count overrides it.
    pub fn max_sections(&self, num_subjects: usize) -> usize {
        match self.num_days {
            Some(days) => days * self.sections_per_day,
            None => num_subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_input() -> TimetableInput {
        TimetableInput {
            student_counts: vec![10, 5, 8],
            seat_counts: vec![10, 8],
            conflicts: vec![(0, 1)],
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(small_input().validate().is_ok());
    }

    #[test]
    fn conflict_out_of_bounds_is_rejected() {
        let mut input = small_input();
        input.conflicts.push((1, 3));
        assert!(input.validate().is_err());
    }

    #[test]
    fn self_conflict_is_rejected() {
        let mut input = small_input();
        input.conflicts.push((2, 2));
        assert!(input.validate().is_err());
    }

    #[test]
    fn zero_seat_count_is_left_to_the_solver() {
        let mut input = small_input();
        input.seat_counts[1] = 0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn config_defaults() {
        let config = SolveConfig::default();
        assert_eq!(config.sections_per_day, 4);
        assert_eq!(config.time_limit_seconds, 600.0);
        assert_eq!(config.num_days(10), 3);
        assert_eq!(config.max_sections(10), 10);
    }

    #[test]
    fn day_override_bounds_the_section_range() {
        let config = SolveConfig {
            num_days: Some(2),
            ..SolveConfig::default()
        };
        assert_eq!(config.num_days(10), 2);
        assert_eq!(config.max_sections(10), 8);
    }

    #[test]
    fn degenerate_config_is_rejected() {
        let config = SolveConfig {
            sections_per_day: 0,
            ..SolveConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
