pub mod data;
pub mod input;
pub mod schedule;
pub mod server;
pub mod solver;
