//! Conversion of catalog records into runtime profiles and twin parameters.

use kce_config::{ProfileConfig, TwinConfig};
use kce_core::profile::SystemProfile;
use kce_twin::TwinParameters;

/// Convert a `ProfileConfig` into its runtime `SystemProfile`. Validation happens in
/// [`crate::compute`] so a bad record is reported alongside the others.
pub fn from_config(config: &ProfileConfig) -> SystemProfile {
    SystemProfile {
        name: config.name.clone(),
        mass_kg: config.mass_kg,
        v_initial_m_s: config.v_initial_m_s,
        v_final_m_s: config.v_final_m_s,
        energy_consumed_j: config.energy_consumed_j,
        efficiency: config.efficiency,
        abstract_proxy: config.abstract_proxy,
    }
}

pub fn profiles_from_configs(configs: &[ProfileConfig]) -> Vec<SystemProfile> {
    configs.iter().map(from_config).collect()
}

/// Convert a `TwinConfig` into simulation parameters.
pub fn twin_from_config(config: &TwinConfig) -> TwinParameters {
    TwinParameters {
        name: config.name.clone(),
        mass_kg: config.mass_kg,
        efficiency: config.efficiency,
        energy_budget_j: config.energy_budget_j,
        abstract_proxy: config.abstract_proxy,
    }
}

pub fn twins_from_configs(configs: &[TwinConfig]) -> Vec<TwinParameters> {
    configs.iter().map(twin_from_config).collect()
}
