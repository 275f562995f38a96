pub mod models;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use validator::Validate;

pub use models::Config;
use models::ConfigFile;

const SYSTEM_CONFIG: &str = "/usr/local/etc/hetzner-dyndns.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file found in {}", join_paths(.0, ", "))]
    NotFound(Vec<PathBuf>),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("configuration has no `hetzner-dyndns` section")]
    MissingSection,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

fn join_paths(paths: &[PathBuf], sep: &str) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

pub fn default_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".config/local-tooling/hetzner-dyndns.yaml"));
    }
    locations.push(PathBuf::from(SYSTEM_CONFIG));
    locations
}

/// Loads the first of `locations` that exists.
pub fn load(locations: &[PathBuf]) -> Result<Config, ConfigError> {
    let path = locations
        .iter()
        .find(|p| p.is_file())
        .ok_or_else(|| ConfigError::NotFound(locations.to_vec()))?;

    load_from_path(path)
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&contents)
}

pub fn parse(contents: &str) -> Result<Config, ConfigError> {
    let file: ConfigFile = serde_yaml::from_str(contents)?;
    let config = file.section.ok_or(ConfigError::MissingSection)?;
    config.validate()?;
    Ok(config)
}

pub fn template(locations: &[PathBuf]) -> String {
    format!(
        r#"
    Configuration missing!
    token, zone_id and record_name are mandatory.

      hetzner-dyndns:
        token: ""
        zone_id: ""
        record_name: ""
        ipinfo_token: ""
        # record_id: ""
        # ttl: 3600

    Config locations:
    {}
"#,
        join_paths(locations, "\n    ")
    )
}
