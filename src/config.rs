use std::{
    fs, io::{self, Write}, path::{Path, PathBuf}, time::Duration,
};
use confique::Config as _;
use serde::Deserialize;

use crate::prelude::*;


/// The locations where we look for a configuration file. The first existing
/// file in this list is used. If none exists, the default configuration is
/// used.
const DEFAULT_PATHS: &[&str] = &[
    "config.toml",
    "/etc/workflow-api/config.toml",
];

const CONFIG_PATH_ENV: &str = "WORKFLOW_API_CONFIG_PATH";

/// Configuration for the workflow API server.
///
/// All relative paths are relative to the location of this configuration file.
/// Duration values are specified as string with a unit, e.g. "5s". Valid
/// units: 'ms', 's' and 'min'.
#[derive(Debug, confique::Config)]
pub(crate) struct Config {
    #[config(nested)]
    pub(crate) http: crate::http::HttpConfig,

    #[config(nested)]
    pub(crate) log: crate::logger::LogConfig,

    #[config(nested)]
    pub(crate) data: crate::model::DataConfig,
}

impl Config {
    /// Tries to find a config file by checking `WORKFLOW_API_CONFIG_PATH` and
    /// then the list of default config file locations. The first config file
    /// found is loaded via [`Self::load_from`]. If there is none, all values
    /// are set to their defaults. Returns the config and the path it was
    /// loaded from.
    pub(crate) fn from_env_or_default_locations() -> Result<(Self, Option<PathBuf>)> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => DEFAULT_PATHS.iter().map(PathBuf::from).find(|p| p.exists()),
        };

        match path {
            Some(path) => {
                let config = Self::load_from(&path)?;
                Ok((config, Some(path)))
            }
            None => {
                let config = Config::builder().load()
                    .context("failed to create default configuration")?;
                Ok((config, None))
            }
        }
    }

    /// Loads the configuration from a specific TOML file.
    pub(crate) fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Config::from_file(path)
            .context(format!("failed to read config file '{}'", path.display()))?;

        config.fix_paths(path)?;

        Ok(config)
    }

    /// Goes through all paths in the configuration and changes relative paths
    /// to be absolute based on the path of the configuration file itself.
    fn fix_paths(&mut self, config_path: &Path) -> Result<()> {
        fn fix_path(base_path: &Path, path: &mut PathBuf) {
            if path.is_relative() {
                *path = base_path.join(&path);
            }
        }

        let absolute_config_path = config_path.canonicalize()
            .context("failed to canonicalize config path")?;
        let base = absolute_config_path.parent()
            .ok_or_else(|| anyhow!("config file path has no parent"))?;

        if let Some(p) = &mut self.log.file {
            fix_path(base, p);
        }
        if let Some(p) = &mut self.data.fixture {
            fix_path(base, p);
        }

        Ok(())
    }
}

/// Writes the generated TOML config template file to the given destination or
/// stdout.
pub(crate) fn write_template(path: Option<&PathBuf>) -> Result<()> {
    use confique::toml::FormatOptions;

    info!(
        "Writing configuration template to '{}'",
        path.map(|p| p.display().to_string()).unwrap_or("<stdout>".into()),
    );

    let mut options = FormatOptions::default();
    options.general.nested_field_gap = 2;
    let template = confique::toml::template::<Config>(options);
    match path {
        Some(path) => fs::write(path, template)?,
        None => io::stdout().write_all(template.as_bytes())?,
    }

    Ok(())
}

/// Our custom format for durations. We require a unit to increase readability
/// of config files.
pub(crate) fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(D::Error::custom)
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    // Allow unit-less zeroes
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let start_unit = s.find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| "no time unit for duration".to_string())?;
    let (num, unit) = s.split_at(start_unit);
    let num: u64 = num.parse()
        .map_err(|e| format!("invalid integer for duration: {e}"))?;

    match unit {
        "ms" => Ok(Duration::from_millis(num)),
        "s" => Ok(Duration::from_secs(num)),
        "min" => Ok(Duration::from_secs(num * 60)),
        _ => Err(format!("invalid unit of time for duration: '{unit}'")),
    }
}
