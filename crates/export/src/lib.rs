//! Text and JSON rendering of benchmark reports.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors surfaced while rendering or writing a report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Open the report destination. `-` (or an empty path) is stdout; a file path gets its parent
/// directories created. Existing directories are refused rather than clobbered.
pub fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if path.as_os_str().is_empty() || path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is a directory", path.display()),
        ));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

pub mod trace {
    use std::io::Write;

    use kce_twin::{TwinOutcome, TwinSample};
    use serde::Serialize;

    use crate::ExportError;

    #[derive(Serialize)]
    struct TwinTrace<'a> {
        name: &'a str,
        mass_kg: f64,
        efficiency: f64,
        #[serde(rename = "abstract")]
        abstract_proxy: bool,
        final_velocity_m_s: f64,
        energy_consumed_j: f64,
        kinetic_energy_j: f64,
        samples: &'a [TwinSample],
    }

    /// Write the per-step telemetry of each simulated twin as a pretty JSON array.
    pub fn write_trace(writer: &mut dyn Write, outcomes: &[TwinOutcome]) -> Result<(), ExportError> {
        let traces: Vec<TwinTrace<'_>> = outcomes
            .iter()
            .map(|o| TwinTrace {
                name: &o.name,
                mass_kg: o.mass_kg,
                efficiency: o.efficiency,
                abstract_proxy: o.abstract_proxy,
                final_velocity_m_s: o.final_velocity_m_s,
                energy_consumed_j: o.energy_consumed_j,
                kinetic_energy_j: o.kinetic_energy_j,
                samples: &o.samples,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &traces)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

}


pub mod report {
    use std::fmt::Write as _;
    use std::io::Write;

    use kce_efficiency::{BenchmarkEntry, BenchmarkReport};
    use serde::{Deserialize, Serialize};

    use crate::ExportError;

    const TITLE: &str = "=== Kinetic Conversion Efficiency Benchmark ===";
    const SEPARATOR_WIDTH: usize = 50;

    /// Output encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Format {
        #[default]
        Text,
        Json,
    }

    /// Row order of the rendered report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Presentation {
        /// Profile declaration order.
        #[default]
        Declared,
        /// Sorted by S descending, invalid profiles last.
        Ranked,
    }

    /// JSON row. Non-finite or unavailable numbers are encoded as `null`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ReportRow {
        pub name: String,
        pub delta_v: Option<f64>,
        pub delta_e: Option<f64>,
        #[serde(rename = "S")]
        pub s: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }

    impl From<&BenchmarkEntry> for ReportRow {
        fn from(entry: &BenchmarkEntry) -> Self {
            let finite = |v: f64| v.is_finite().then_some(v);
            match &entry.outcome {
                Ok(result) => ReportRow {
                    name: result.name.clone(),
                    delta_v: finite(result.delta_v),
                    delta_e: finite(result.delta_e),
                    s: finite(result.s),
                    error: None,
                },
                Err(err) => ReportRow {
                    name: entry.profile.name.clone(),
                    delta_v: finite(entry.profile.delta_v()),
                    delta_e: entry.profile.energy_consumed_j.and_then(finite),
                    s: None,
                    error: Some(err.to_string()),
                },
            }
        }
    }

    fn ordered(report: &BenchmarkReport, presentation: Presentation) -> Vec<&BenchmarkEntry> {
        match presentation {
            Presentation::Declared => report.entries().iter().collect(),
            Presentation::Ranked => report.ranked(),
        }
    }

    /// Rows in presentation order.
    pub fn rows(report: &BenchmarkReport, presentation: Presentation) -> Vec<ReportRow> {
        ordered(report, presentation)
            .into_iter()
            .map(ReportRow::from)
            .collect()
    }

    /// Render the report in the requested format.
    pub fn render(
        report: &BenchmarkReport,
        format: Format,
        presentation: Presentation,
    ) -> Result<String, ExportError> {
        match format {
            Format::Text => render_text(report, presentation),
            Format::Json => render_json(report, presentation),
        }
    }

    /// Pretty JSON array of `{name, delta_v, delta_e, S}` objects.
    pub fn render_json(
        report: &BenchmarkReport,
        presentation: Presentation,
    ) -> Result<String, ExportError> {
        let mut json = serde_json::to_string_pretty(&rows(report, presentation))?;
        json.push('\n');
        Ok(json)
    }

    /// Human-readable report, one block per archetype.
    pub fn render_text(
        report: &BenchmarkReport,
        presentation: Presentation,
    ) -> Result<String, ExportError> {
        let mut out = String::new();
        write_text(&mut out, report, presentation)?;
        Ok(out)
    }

    fn write_text(
        out: &mut String,
        report: &BenchmarkReport,
        presentation: Presentation,
    ) -> std::fmt::Result {
        writeln!(out, "{TITLE}\n")?;
        for (index, entry) in ordered(report, presentation).into_iter().enumerate() {
            if presentation == Presentation::Ranked {
                writeln!(out, "Rank             : {}", index + 1)?;
            }
            let profile = &entry.profile;
            writeln!(out, "System           : {}", profile.name)?;
            let delta_v = profile.delta_v();
            if delta_v.is_finite() {
                writeln!(out, "Delta v          : {:.6} m/s", delta_v)?;
            } else {
                writeln!(out, "Delta v          : n/a")?;
            }
            match profile.energy_consumed_j {
                Some(energy) if energy.is_finite() => {
                    writeln!(out, "Energy Consumed  : {:.2} J", energy)?
                }
                _ => writeln!(out, "Energy Consumed  : n/a")?,
            }
            match &entry.outcome {
                Ok(result) => writeln!(out, "S (Δv / ΔE)      : {:.6e}", result.s)?,
                Err(err) => writeln!(out, "S (Δv / ΔE)      : invalid ({err})")?,
            }
            writeln!(out, "Abstract System  : {}", profile.abstract_proxy)?;
            writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    /// Render and write the report in one go.
    pub fn write_report(
        writer: &mut dyn Write,
        report: &BenchmarkReport,
        format: Format,
        presentation: Presentation,
    ) -> Result<(), ExportError> {
        writer.write_all(render(report, format, presentation)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

}
