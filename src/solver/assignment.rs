//! Assignment encoding: a binary decision per (subject, room, section)
//! triple over the full section range. Bigger variable cube than the
//! pairwise encoding, but every constraint is a plain linear row, which
//! suits LP-relaxation-based solving.

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
    let horizon = config.max_sections(n);

    info!(
        "Setting up assignment MILP with {} subjects, {} rooms, and {} sections...",
        n, m, horizon
    );
    let mut problem = ProblemVariables::new();

    // x[i][k][t] = 1 iff subject i sits in room k during section t
    let x: Vec<Vec<Vec<Variable>>> = (0..n)
        .map(|_| {
            (0..m)
                .map(|_| problem.add_vector(variable().binary(), horizon))
                .collect()
        })
        .collect();
    let num_sections = problem.add(variable().integer().min(0).max(horizon as f64));

    let stats = ModelStats {
        encoding: Encoding::Assignment,
        num_variables: n * m * horizon + 1,
        num_constraints: n + m * horizon + n * m + input.conflicts.len() * horizon + n * m * horizon,
        max_sections: horizon,
        time_limit_seconds: config.time_limit_seconds,
    };
    trace!(
        "Assignment model: {} variables, {} constraints.",
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

    // each subject gets exactly one (room, section) pair
    info!("Adding 'subject assigned once' constraints...");
    for i in 0..n {
        let assigned: Expression = x[i].iter().flatten().copied().sum();
        model.add_constraint(constraint!(assigned == 1));
    }

    // each (room, section) pair hosts at most one subject
    info!("Adding 'no room double-booking' constraints...");
    for k in 0..m {
        for t in 0..horizon {
            let occupied: Expression = (0..n).map(|i| x[i][k][t]).sum();
            model.add_constraint(constraint!(occupied <= 1));
        }
    }

    // seats claimed by a subject in a room never exceed its capacity; the
    // sum runs over all sections even though at most one is chosen
    info!("Adding room capacity constraints...");
    for i in 0..n {
        for k in 0..m {
            let claimed: Expression = x[i][k]
                .iter()
                .map(|v| f64::from(input.student_counts[i]) * *v)
                .sum();
            model.add_constraint(constraint!(claimed <= f64::from(input.seat_counts[k])));
        }
    }

    // conflicting subjects never share a section, whatever rooms they pick
    info!("Adding conflict separation constraints...");
    for t in 0..horizon {
        for &(a, b) in &input.conflicts {
            let together: Expression = (0..m).map(|k| x[a][k][t] + x[b][k][t]).sum();
            model.add_constraint(constraint!(together <= 1));
        }
    }

    // the objective dominates the section index of every chosen triple
    for rooms in &x {
        for slots in rooms {
            for (t, &var) in slots.iter().enumerate() {
                model.add_constraint(constraint!(num_sections - (t as f64) * var >= 0));
            }
        }
    }

    info!(
        "Starting HiGHS on the assignment model (budget {:.2}s)...",
        time_limit
    );
    let solution = match model.solve() {
        Ok(s) => s,
        Err(e) => {
            let status = solver::status_for_failure(&e);
            info!(
                "Assignment solve ended without a schedule: {} ({})",
                status, e
            );
            return Ok(SolveOutcome {
                status,
                schedule: None,
            });
        }
    };
    info!("Assignment solve finished in {:.2?}", start_time.elapsed());

    let mut raw = Vec::with_capacity(n);
    for (i, rooms) in x.iter().enumerate() {
        let mut chosen = None;
        for (k, slots) in rooms.iter().enumerate() {
            for (t, &var) in slots.iter().enumerate() {
                if solution.value(var) > 0.9 {
                    chosen = Some((k, t));
                }
            }
        }
        let (room, section) =
            chosen.ok_or_else(|| format!("solver returned no assignment for subject {}", i))?;
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
