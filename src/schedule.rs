use crate::data::{RoomId, SectionId, SolveConfig, SubjectId, TimetableInput};
use itertools::Itertools;
use serde::Serialize;

/// One subject placed by the solver, before the day/slot decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAssignment {
    pub subject: SubjectId,
    pub room: RoomId,
    pub section: SectionId,
}

/// A single row of the final timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSubject {
    pub subject: SubjectId,
    pub student_count: u32,
    pub room: RoomId,
    pub seat_count: u32,
    pub day: usize,
    pub slot: usize,
}

/// The reconstructed timetable: one entry per subject, ordered day-major
/// and slot-minor, plus the solver's reported objective (the highest
/// section index in use, counting from 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub entries: Vec<ScheduledSubject>,
    pub objective: usize,
}

impl Schedule {
    /// Serializes the timetable as a CSV block. The header and row layout
    /// are a fixed output contract; repeated calls are byte-identical.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("subjects,number_student,rooms,num_seat,day,section\n");
        for e in &self.entries {
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                e.subject, e.student_count, e.room, e.seat_count, e.day, e.slot
            ));
        }
        out
    }
}

/// Turns raw (subject, room, section) triples back into a typed timetable.
/// Section indices decompose as `day = section / sections_per_day` and
/// `slot = section % sections_per_day`.
pub fn reconstruct(
    input: &TimetableInput,
    config: &SolveConfig,
    raw: &[RawAssignment],
    objective: usize,
) -> Schedule {
    let per_day = config.sections_per_day;
    let entries = raw
        .iter()
        .map(|a| ScheduledSubject {
            subject: a.subject,
            student_count: input.student_counts[a.subject],
            room: a.room,
            seat_count: input.seat_counts[a.room],
            day: a.section / per_day,
            slot: a.section % per_day,
        })
        .sorted_by_key(|e| (e.day, e.slot))
        .collect();

    Schedule { entries, objective }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SolveConfig;

    fn input() -> TimetableInput {
        TimetableInput {
            student_counts: vec![10, 5, 8],
            seat_counts: vec![10, 8],
            conflicts: vec![(0, 1)],
        }
    }

    fn raw() -> Vec<RawAssignment> {
        vec![
            RawAssignment {
                subject: 0,
                room: 0,
                section: 5,
            },
            RawAssignment {
                subject: 1,
                room: 1,
                section: 0,
            },
            RawAssignment {
                subject: 2,
                room: 0,
                section: 4,
            },
        ]
    }

    #[test]
    fn orders_day_major_slot_minor() {
        let schedule = reconstruct(&input(), &SolveConfig::default(), &raw(), 5);
        let order: Vec<_> = schedule.entries.iter().map(|e| e.subject).collect();
        assert_eq!(order, vec![1, 2, 0]);
        // section 5 with 4 slots per day lands on day 1, slot 1
        assert_eq!(schedule.entries[2].day, 1);
        assert_eq!(schedule.entries[2].slot, 1);
    }

    #[test]
    fn csv_layout_is_exact() {
        let schedule = reconstruct(&input(), &SolveConfig::default(), &raw(), 5);
        let expected = "subjects,number_student,rooms,num_seat,day,section\n\
                        1,5,1,8,0,0\n\
                        2,8,0,10,1,0\n\
                        0,10,0,10,1,1\n";
        assert_eq!(schedule.to_csv(), expected);
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let schedule = reconstruct(&input(), &SolveConfig::default(), &raw(), 5);
        let again = reconstruct(&input(), &SolveConfig::default(), &raw(), 5);
        assert_eq!(schedule, again);
        assert_eq!(schedule.to_csv(), again.to_csv());
    }

    #[test]
    fn slot_width_follows_config() {
        let config = SolveConfig {
            sections_per_day: 2,
            ..SolveConfig::default()
        };
        let schedule = reconstruct(&input(), &config, &raw(), 5);
        let subject0 = schedule.entries.iter().find(|e| e.subject == 0).unwrap();
        assert_eq!((subject0.day, subject0.slot), (2, 1));
    }
}
