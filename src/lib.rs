//! Kinetic Conversion Efficiency benchmark.
//!
//! Re-exports the workspace crates so front-ends (the `kinetic_benchmark` CLI, tests, other
//! tools) share one entry point: profiles and constants from `common`, catalog loading from
//! `config`, the runner from `efficiency`, the energy-quantum simulation from `twin`, and report
//! rendering from `export`.

pub use kce_config as config;
pub use kce_core as common;
pub use kce_efficiency as efficiency;
pub use kce_export as export;
pub use kce_twin as twin;

