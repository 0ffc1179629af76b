//! Mock filesystem and canned `/proc` scenarios for tests.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
