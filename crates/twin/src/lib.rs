//! Energy-quantum digital twin.
//!
//! A system starts at rest and receives fixed energy quanta until its budget is spent. Each
//! quantum is converted into kinetic energy through the work-energy theorem,
//! `ΔK = η · ΔE`, so `v_new = sqrt(v_old² + 2·ΔK / m)`. For abstract systems the velocity is a
//! normalized progress-rate proxy.

use kce_core::constants::ENERGY_QUANTUM_J;
use kce_core::profile::SystemProfile;
use kce_core::units::kinetic_energy_j;
use serde::Serialize;
use thiserror::Error;

/// Immutable parameters defining a simulated system.
#[derive(Debug, Clone, PartialEq)]
pub struct TwinParameters {
    pub name: String,
    pub mass_kg: f64,
    /// Conversion factor, 0 < η ≤ 1.
    pub efficiency: f64,
    pub energy_budget_j: f64,
    pub abstract_proxy: bool,
}

/// Runtime state of a simulated system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TwinState {
    pub steps: usize,
    pub velocity_m_s: f64,
    /// Always `steps × quantum`, so rounding cannot stall progress on large budgets.
    pub energy_consumed_j: f64,
}

/// Per-step telemetry record.
#[derive(Debug, Clone, Serialize)]
pub struct TwinSample {
    pub step: usize,
    pub velocity_m_s: f64,
    pub energy_consumed_j: f64,
}

/// Final state of a completed simulation.
#[derive(Debug, Clone)]
pub struct TwinOutcome {
    pub name: String,
    pub mass_kg: f64,
    pub efficiency: f64,
    pub abstract_proxy: bool,
    pub final_velocity_m_s: f64,
    pub energy_consumed_j: f64,
    pub kinetic_energy_j: f64,
    pub samples: Vec<TwinSample>,
}

#[derive(Debug, Error, PartialEq)]
pub enum TwinError {
    #[error("twin '{name}': mass must be positive, got {value}")]
    InvalidMass { name: String, value: f64 },
    #[error("twin '{name}': efficiency must lie in (0, 1], got {value}")]
    InvalidEfficiency { name: String, value: f64 },
    #[error("twin '{name}': energy budget must be positive, got {value}")]
    InvalidBudget { name: String, value: f64 },
    #[error("energy quantum must be positive, got {0}")]
    InvalidQuantum(f64),
    #[error("twin '{name}': budget needs {steps:e} quanta, limit is {limit}")]
    TooManySteps { name: String, steps: f64, limit: usize },
}

/// Upper bound on quanta per simulation; each step keeps one sample.
pub const MAX_STEPS: usize = 1_000_000;

impl TwinParameters {
    fn validate(&self) -> Result<(), TwinError> {
        if !(self.mass_kg.is_finite() && self.mass_kg > 0.0) {
            return Err(TwinError::InvalidMass {
                name: self.name.clone(),
                value: self.mass_kg,
            });
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(TwinError::InvalidEfficiency {
                name: self.name.clone(),
                value: self.efficiency,
            });
        }
        if !(self.energy_budget_j.is_finite() && self.energy_budget_j > 0.0) {
            return Err(TwinError::InvalidBudget {
                name: self.name.clone(),
                value: self.energy_budget_j,
            });
        }
        Ok(())
    }
}

impl TwinOutcome {
    /// Benchmark profile for the run: from rest to the final velocity over the consumed energy.
    pub fn to_profile(&self) -> SystemProfile {
        SystemProfile {
            name: self.name.clone(),
            mass_kg: self.mass_kg,
            v_initial_m_s: 0.0,
            v_final_m_s: self.final_velocity_m_s,
            energy_consumed_j: Some(self.energy_consumed_j),
            efficiency: Some(self.efficiency),
            abstract_proxy: self.abstract_proxy,
        }
    }
}

/// Apply one energy quantum and report whether it was applied. A spent budget leaves the state
/// untouched; the last quantum may overshoot the budget.
pub fn apply_energy_step(
    state: &mut TwinState,
    params: &TwinParameters,
    energy_step_j: f64,
) -> bool {
    if state.energy_consumed_j >= params.energy_budget_j {
        return false;
    }
    let usable = params.efficiency * energy_step_j;
    let delta_v_squared = 2.0 * usable / params.mass_kg;
    state.velocity_m_s = (state.velocity_m_s * state.velocity_m_s + delta_v_squared).sqrt();
    state.steps += 1;
    state.energy_consumed_j = state.steps as f64 * energy_step_j;
    true
}

/// Run a full energy-budget simulation for a single system.
pub fn simulate(params: &TwinParameters, quantum_j: f64) -> Result<TwinOutcome, TwinError> {
    if !(quantum_j.is_finite() && quantum_j > 0.0) {
        return Err(TwinError::InvalidQuantum(quantum_j));
    }
    params.validate()?;

    let required = (params.energy_budget_j / quantum_j).ceil();
    if required > MAX_STEPS as f64 {
        return Err(TwinError::TooManySteps {
            name: params.name.clone(),
            steps: required,
            limit: MAX_STEPS,
        });
    }

    let mut state = TwinState::default();
    let mut samples = Vec::with_capacity(required as usize + 1);
    samples.push(TwinSample {
        step: 0,
        velocity_m_s: 0.0,
        energy_consumed_j: 0.0,
    });

    for _ in 0..required as usize {
        if !apply_energy_step(&mut state, params, quantum_j) {
            break;
        }
        samples.push(TwinSample {
            step: state.steps,
            velocity_m_s: state.velocity_m_s,
            energy_consumed_j: state.energy_consumed_j,
        });
    }

    tracing::debug!(
        twin = %params.name,
        steps = state.steps,
        velocity_m_s = state.velocity_m_s,
        "twin simulation finished"
    );

    Ok(TwinOutcome {
        name: params.name.clone(),
        mass_kg: params.mass_kg,
        efficiency: params.efficiency,
        abstract_proxy: params.abstract_proxy,
        final_velocity_m_s: state.velocity_m_s,
        energy_consumed_j: state.energy_consumed_j,
        kinetic_energy_j: kinetic_energy_j(params.mass_kg, state.velocity_m_s),
        samples,
    })
}

/// Simulate every twin in order. Invalid twins are returned as errors without stopping the rest.
pub fn simulate_suite(
    suite: &[TwinParameters],
    quantum_j: f64,
) -> Vec<Result<TwinOutcome, TwinError>> {
    suite
        .iter()
        .map(|params| {
            let outcome = simulate(params, quantum_j);
            if let Err(err) = &outcome {
                tracing::warn!(twin = %params.name, "skipping twin: {err}");
            }
            outcome
        })
        .collect()
}

/// Standardized archetypes for the digital-twin experiment.
pub fn default_suite() -> Vec<TwinParameters> {
    vec![
        TwinParameters {
            name: "Agile Robot".to_string(),
            mass_kg: 0.5,
            efficiency: 0.70,
            energy_budget_j: 60.0,
            abstract_proxy: false,
        },
        TwinParameters {
            name: "Electric Vehicle".to_string(),
            mass_kg: 1.0,
            efficiency: 0.80,
            energy_budget_j: 100.0,
            abstract_proxy: false,
        },
        TwinParameters {
            name: "AI Agent (Abstract)".to_string(),
            mass_kg: 1.0,
            efficiency: 0.50,
            energy_budget_j: 50.0,
            abstract_proxy: true,
        },
    ]
}

/// Default energy quantum per step (J).
pub const DEFAULT_QUANTUM_J: f64 = ENERGY_QUANTUM_J;
