//! Pairwise encoding: an integer section variable per subject, a binary
//! room indicator per (subject, room), and a reified same-section boolean
//! per ordered subject pair per room. The reification uses big-M rows:
//! `same = 1` forces the two section variables equal, `same = 0` forces
//! them apart (through a direction helper), and a guarded row keeps two
//! subjects out of the same room whenever `same` holds.

use crate::data::{SolveConfig, TimetableInput};
use crate::schedule::{self, RawAssignment};
use crate::solver::{self, Encoding, ModelStats, SolveOutcome, SolveStatus};
use good_lp::variable;
use good_lp::{
    Expression, ProblemVariables, Solution, SolverModel, Variable, constraint, default_solver,
};
use log::{info, trace};
use std::time::Instant;

pub fn solve(input: &TimetableInput, config: &SolveConfig) -> Result<SolveOutcome, String> {
    let start_time = Instant::now();
    let n = input.num_subjects();
    let m = input.num_rooms();
    // section variables and the objective live in [0, n]; one section per
    // subject is always enough
    let section_bound = n as f64;
    let big_m = (n + 1) as f64;

    info!(
        "Setting up pairwise MILP with {} subjects, {} rooms, and {} conflict pairs...",
        n,
        m,
        input.conflicts.len()
    );
    let mut problem = ProblemVariables::new();

    let section_of: Vec<Variable> = (0..n)
        .map(|_| problem.add(variable().integer().min(0).max(section_bound)))
        .collect();
    let in_room: Vec<Vec<Variable>> = (0..n)
        .map(|_| problem.add_vector(variable().binary(), m))
        .collect();

    // same-section indicator plus a direction helper for the "sections
    // differ" branch, one of each per ordered pair per room
    let mut links = Vec::with_capacity(n * n.saturating_sub(1) * m);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            for k in 0..m {
                let same = problem.add(variable().binary());
                let dir = problem.add(variable().binary());
                links.push((i, j, k, same, dir));
            }
        }
    }
    let conflict_dirs: Vec<Variable> = input
        .conflicts
        .iter()
        .map(|_| problem.add(variable().binary()))
        .collect();
    let num_sections = problem.add(variable().integer().min(0).max(section_bound));

    let stats = ModelStats {
        encoding: Encoding::Pairwise,
        num_variables: n + n * m + 2 * links.len() + conflict_dirs.len() + 1,
        num_constraints: n + 5 * links.len() + n + 2 * conflict_dirs.len() + n,
        max_sections: n,
        time_limit_seconds: config.time_limit_seconds,
    };
    trace!(
        "Pairwise model: {} variables, {} constraints.",
        stats.num_variables, stats.num_constraints
    );
    if let Some(path) = &config.save_model {
        stats.save(path)?;
    }

    let time_limit = solver::effective_time_limit(config);
    let mut model = problem
        .minimise(num_sections)
        .using(default_solver)
        .set_option("threads", 1) // limit to 1 thread for reproducibility
        .set_option("random_seed", 1234) //set seed for reproducibility
        .set_option("log_to_console", "false")
        .set_option("time_limit", time_limit);

    // each subject occupies exactly one room
    for i in 0..n {
        let one_room: Expression = in_room[i].iter().copied().sum();
        model.add_constraint(constraint!(one_room == 1));
    }

    info!("Adding {} same-section linkage constraints...", 5 * links.len());
    for &(i, j, k, same, dir) in &links {
        // same = 1  =>  section_of[i] == section_of[j]
        model.add_constraint(constraint!(
            section_of[i] - section_of[j] + big_m * same <= big_m
        ));
        model.add_constraint(constraint!(
            section_of[j] - section_of[i] + big_m * same <= big_m
        ));
        // same = 0  =>  the sections differ, in the direction picked by dir
        model.add_constraint(constraint!(
            section_of[i] - section_of[j] + big_m * same + big_m * dir >= 1
        ));
        model.add_constraint(constraint!(
            section_of[j] - section_of[i] + big_m * same - big_m * dir >= 1.0 - big_m
        ));
        // same = 1  =>  room k hosts at most one of the two
        model.add_constraint(constraint!(in_room[i][k] + in_room[j][k] + same <= 2));
    }

    // seats in the chosen room must cover the subject's students
    for i in 0..n {
        let seats: Expression = in_room[i]
            .iter()
            .zip(&input.seat_counts)
            .map(|(v, &s)| f64::from(s) * *v)
            .sum();
        model.add_constraint(constraint!(seats >= f64::from(input.student_counts[i])));
    }

    // conflicting subjects take different sections outright; no room check
    // needed, the conflict is room-independent
    for (&(a, b), &dir) in input.conflicts.iter().zip(&conflict_dirs) {
        model.add_constraint(constraint!(
            section_of[a] - section_of[b] + big_m * dir >= 1
        ));
        model.add_constraint(constraint!(
            section_of[b] - section_of[a] - big_m * dir >= 1.0 - big_m
        ));
    }

    // the objective dominates every section index in use
    for i in 0..n {
        model.add_constraint(constraint!(num_sections - section_of[i] >= 0));
    }

    info!("Starting HiGHS on the pairwise model (budget {:.2}s)...", time_limit);
    let solution = match model.solve() {
        Ok(s) => s,
        Err(e) => {
            let status = solver::status_for_failure(&e);
            info!("Pairwise solve ended without a schedule: {} ({})", status, e);
            return Ok(SolveOutcome {
                status,
                schedule: None,
            });
        }
    };
    info!("Pairwise solve finished in {:.2?}", start_time.elapsed());

    let mut raw = Vec::with_capacity(n);
    for (i, rooms) in in_room.iter().enumerate() {
        let room = rooms
            .iter()
            .position(|v| solution.value(*v) > 0.9)
            .ok_or_else(|| format!("solver returned no room for subject {}", i))?;
        let section = solution.value(section_of[i]).round() as usize;
        raw.push(RawAssignment {
            subject: i,
            room,
            section,
        });
    }
    let objective = solution.value(num_sections).round() as usize;

    Ok(SolveOutcome {
        status: SolveStatus::Optimal,
        schedule: Some(schedule::reconstruct(input, config, &raw, objective)),
    })
}
