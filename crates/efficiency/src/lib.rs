//! Benchmark runner for the Kinetic Conversion Efficiency `S = Δv / ΔE`.
//!
//! `S` is a comparative metric under controlled conditions, not a physical law. Profiles are
//! evaluated independently: a profile that fails validation is reported and the rest of the run
//! carries on.

pub mod catalog;
pub mod runner;

pub use kce_core::profile::{SystemProfile, default_profiles};
pub use runner::{BenchmarkEntry, BenchmarkReport, EfficiencyResult, InvalidProfile};
pub use runner::{compute, run_benchmark, run_twin_benchmark};
