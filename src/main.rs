use std::process::ExitCode;
use timetable_solver::data::SolveConfig;
use timetable_solver::input;
use timetable_solver::server;
use timetable_solver::solver::{self, Encoding};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(path) => run_file(&path, args.next().as_deref()),
        None => {
            server::run_server().await;
            ExitCode::SUCCESS
        }
    }
}

/// File mode: read the whitespace text format, solve with the default
/// configuration, print the CSV timetable to stdout.
fn run_file(path: &str, encoding_arg: Option<&str>) -> ExitCode {
    let encoding = match encoding_arg {
        Some("pairwise") => Encoding::Pairwise,
        Some("assignment") | None => Encoding::Assignment,
        Some(other) => {
            eprintln!(
                "unknown encoding '{}', expected 'pairwise' or 'assignment'",
                other
            );
            return ExitCode::FAILURE;
        }
    };

    let problem = match input::read_problem(path) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match solver::solve(&problem, &SolveConfig::default(), encoding) {
        Ok(outcome) => match outcome.schedule {
            Some(schedule) => {
                print!("{}", schedule.to_csv());
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("no schedule produced: status {}", outcome.status);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
