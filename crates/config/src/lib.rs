//! Catalog models and loaders for the kinetic efficiency benchmark.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// System profile record parsed from catalog files.
#[derive(Debug, Deserialize, Clone)]
pub struct ProfileConfig {
    pub name: String,
    pub mass_kg: f64,
    #[serde(default)]
    pub v_initial_m_s: f64,
    pub v_final_m_s: f64,
    /// Left optional so a missing figure is reported per profile instead of failing the load.
    #[serde(default)]
    pub energy_consumed_j: Option<f64>,
    #[serde(default)]
    pub efficiency: Option<f64>,
    #[serde(default, rename = "abstract")]
    pub abstract_proxy: bool,
}

/// Digital-twin parameters parsed from catalog files.
#[derive(Debug, Deserialize, Clone)]
pub struct TwinConfig {
    pub name: String,
    pub mass_kg: f64,
    pub efficiency: f64,
    pub energy_budget_j: f64,
    #[serde(default, rename = "abstract")]
    pub abstract_proxy: bool,
}

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported catalog format: {0} (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// On-disk catalog encodings. YAML files hold a list of records, TOML files a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Yaml,
    Toml,
}

impl CatalogFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Load profile records from a YAML list, a single TOML record, or a directory of such files.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<ProfileConfig>, ConfigError> {
    load_records(path.as_ref())
}

/// Load digital-twin parameter records; same file conventions as [`load_profiles`].
pub fn load_twin_configs<P: AsRef<Path>>(path: P) -> Result<Vec<TwinConfig>, ConfigError> {
    load_records(path.as_ref())
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if !path.is_dir() {
        let format =
            CatalogFormat::of(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.into()))?;
        return read_catalog_file(path, format);
    }

    // directory entries merge in file-name order; other files are ignored
    let mut files: Vec<(PathBuf, CatalogFormat)> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|file| CatalogFormat::of(&file).map(|format| (file, format)))
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut records = Vec::new();
    for (file, format) in files {
        records.extend(read_catalog_file(&file, format)?);
    }
    Ok(records)
}

fn read_catalog_file<T>(path: &Path, format: CatalogFormat) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    match format {
        CatalogFormat::Yaml => Ok(serde_yaml::from_reader(File::open(path)?)?),
        CatalogFormat::Toml => {
            let record: T = toml::from_str(&std::fs::read_to_string(path)?)?;
            Ok(vec![record])
        }
    }
}
