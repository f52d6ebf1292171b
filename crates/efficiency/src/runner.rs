use kce_core::profile::SystemProfile;
use kce_twin::{TwinOutcome, TwinParameters, simulate_suite};
use thiserror::Error;

/// Derived efficiency figures for one valid profile.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyResult {
    pub name: String,
    pub delta_v: f64,
    pub delta_e: f64,
    /// Kinetic Conversion Efficiency, Δv / ΔE.
    pub s: f64,
    pub abstract_proxy: bool,
}

/// Reasons a profile cannot produce a ratio.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidProfile {
    #[error("profile '{name}' has no energy consumption value")]
    MissingEnergy { name: String },
    #[error("profile '{name}': energy consumed must be positive, got {value} J")]
    NonPositiveEnergy { name: String, value: f64 },
    #[error("profile '{name}': {field} is not a finite number")]
    NonFinite { name: String, field: &'static str },
    /// The digital twin could not produce the profile.
    #[error("{reason}")]
    Rejected { name: String, reason: String },
}

impl InvalidProfile {
    pub fn name(&self) -> &str {
        match self {
            Self::MissingEnergy { name }
            | Self::NonPositiveEnergy { name, .. }
            | Self::NonFinite { name, .. }
            | Self::Rejected { name, .. } => name,
        }
    }
}

/// Compute Δv, ΔE and S for a single profile. Pure; never divides by zero.
pub fn compute(profile: &SystemProfile) -> Result<EfficiencyResult, InvalidProfile> {
    let name = &profile.name;
    for (field, value) in [
        ("v_initial", profile.v_initial_m_s),
        ("v_final", profile.v_final_m_s),
    ] {
        if !value.is_finite() {
            return Err(InvalidProfile::NonFinite {
                name: name.clone(),
                field,
            });
        }
    }

    let delta_e = profile
        .energy_consumed_j
        .ok_or_else(|| InvalidProfile::MissingEnergy { name: name.clone() })?;
    if !delta_e.is_finite() {
        return Err(InvalidProfile::NonFinite {
            name: name.clone(),
            field: "energy_consumed",
        });
    }
    if delta_e <= 0.0 {
        return Err(InvalidProfile::NonPositiveEnergy {
            name: name.clone(),
            value: delta_e,
        });
    }

    // finite inputs can still overflow: huge opposite velocities, or a subnormal ΔE
    let delta_v = profile.delta_v();
    let s = delta_v / delta_e;
    for (field, value) in [("delta_v", delta_v), ("S", s)] {
        if !value.is_finite() {
            return Err(InvalidProfile::NonFinite {
                name: name.clone(),
                field,
            });
        }
    }
    Ok(EfficiencyResult {
        name: name.clone(),
        delta_v,
        delta_e,
        s,
        abstract_proxy: profile.abstract_proxy,
    })
}

/// One line of the report: the source profile and its outcome.
#[derive(Debug, Clone)]
pub struct BenchmarkEntry {
    pub profile: SystemProfile,
    pub outcome: Result<EfficiencyResult, InvalidProfile>,
}

impl BenchmarkEntry {
    /// Ratio when the profile was valid.
    pub fn s(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|r| r.s)
    }
}

/// Results of one benchmark run, in profile declaration order.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkReport {
    entries: Vec<BenchmarkEntry>,
}

impl BenchmarkReport {
    pub fn entries(&self) -> &[BenchmarkEntry] {
        &self.entries
    }

    /// Display view sorted by S descending; invalid entries trail in declaration order.
    pub fn ranked(&self) -> Vec<&BenchmarkEntry> {
        let mut view: Vec<&BenchmarkEntry> = self.entries.iter().collect();
        view.sort_by(|a, b| match (a.s(), b.s()) {
            (Some(sa), Some(sb)) => sb.total_cmp(&sa),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        view
    }

    pub fn results(&self) -> impl Iterator<Item = &EfficiencyResult> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &InvalidProfile> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

fn evaluate(profile: SystemProfile) -> BenchmarkEntry {
    let outcome = compute(&profile);
    match &outcome {
        Ok(result) => tracing::debug!(
            profile = %result.name,
            delta_v = result.delta_v,
            delta_e = result.delta_e,
            s = result.s,
            "computed efficiency"
        ),
        Err(err) => tracing::warn!(profile = %profile.name, "skipping profile: {err}"),
    }
    BenchmarkEntry { profile, outcome }
}

/// Apply [`compute`] to each profile in order, reporting invalid profiles without aborting.
pub fn run_benchmark(profiles: &[SystemProfile]) -> BenchmarkReport {
    BenchmarkReport {
        entries: profiles.iter().cloned().map(evaluate).collect(),
    }
}

/// Simulate each twin and benchmark its outcome. A rejected twin keeps its slot in the report as
/// an error entry, like an invalid profile.
pub fn run_twin_benchmark(
    suite: &[TwinParameters],
    quantum_j: f64,
) -> (BenchmarkReport, Vec<TwinOutcome>) {
    let mut entries = Vec::with_capacity(suite.len());
    let mut outcomes = Vec::with_capacity(suite.len());
    for (params, simulated) in suite.iter().zip(simulate_suite(suite, quantum_j)) {
        match simulated {
            Ok(outcome) => {
                entries.push(evaluate(outcome.to_profile()));
                outcomes.push(outcome);
            }
            Err(err) => entries.push(BenchmarkEntry {
                profile: SystemProfile {
                    name: params.name.clone(),
                    mass_kg: params.mass_kg,
                    v_initial_m_s: 0.0,
                    v_final_m_s: 0.0,
                    energy_consumed_j: None,
                    efficiency: Some(params.efficiency),
                    abstract_proxy: params.abstract_proxy,
                },
                outcome: Err(InvalidProfile::Rejected {
                    name: params.name.clone(),
                    reason: err.to_string(),
                }),
            }),
        }
    }
    (BenchmarkReport { entries }, outcomes)
}
