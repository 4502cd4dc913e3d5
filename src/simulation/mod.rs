//! Simulated transfer traffic for demos, tests and benchmarks.

pub mod random_transfers;
