//! Core units, constants, and shared records for the kinetic efficiency workspace.

/// Benchmark constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Energy applied per digital-twin step (J).
    pub const ENERGY_QUANTUM_J: f64 = 5.0;
}

/// Energy helpers.
pub mod units {
    /// Kinetic energy of a mass moving at `velocity_m_s` (J).
    #[inline]
    pub fn kinetic_energy_j(mass_kg: f64, velocity_m_s: f64) -> f64 {
        0.5 * mass_kg * velocity_m_s * velocity_m_s
    }
}

/// Benchmarked system archetypes.
pub mod profile {
    /// Physical parameters of one benchmarked system.
    ///
    /// Velocities of abstract systems are a normalized progress proxy rather than m/s.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SystemProfile {
        pub name: String,
        pub mass_kg: f64,
        pub v_initial_m_s: f64,
        pub v_final_m_s: f64,
        /// Total energy consumed over the transition (J). `None` when the source omitted it.
        pub energy_consumed_j: Option<f64>,
        /// Energy conversion factor, 0 < η ≤ 1.
        pub efficiency: Option<f64>,
        pub abstract_proxy: bool,
    }

    impl SystemProfile {
        /// Physical profile with a known energy figure.
        pub fn new(
            name: impl Into<String>,
            mass_kg: f64,
            v_initial_m_s: f64,
            v_final_m_s: f64,
            energy_consumed_j: f64,
        ) -> Self {
            Self {
                name: name.into(),
                mass_kg,
                v_initial_m_s,
                v_final_m_s,
                energy_consumed_j: Some(energy_consumed_j),
                efficiency: None,
                abstract_proxy: false,
            }
        }

        pub fn with_efficiency(mut self, efficiency: f64) -> Self {
            self.efficiency = Some(efficiency);
            self
        }

        /// Mark the profile as non-physical (velocity is a progress proxy).
        pub fn into_abstract(mut self) -> Self {
            self.abstract_proxy = true;
            self
        }

        /// Velocity change across the transition.
        #[inline]
        pub fn delta_v(&self) -> f64 {
            self.v_final_m_s - self.v_initial_m_s
        }
    }

    /// Standard archetypes in declaration order: robot, vehicle, virtual agent.
    pub fn default_profiles() -> Vec<SystemProfile> {
        vec![
            SystemProfile::new("Agile Robot", 0.5, 0.0, 4.0, 50.0).with_efficiency(0.70),
            SystemProfile::new("Electric Vehicle", 1.0, 0.0, 25.0, 500.0).with_efficiency(0.80),
            SystemProfile::new("AI Agent (Abstract)", 1.0, 0.0, 3.0, 50.0)
                .with_efficiency(0.50)
                .into_abstract(),
        ]
    }

}
