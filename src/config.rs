use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    encoding::lookup_encoding,
    po::header::{
        DEFAULT_COPYRIGHT_HOLDER, DEFAULT_OUTPUT_ENCODING, DEFAULT_PACKAGE_NAME,
        DEFAULT_PACKAGE_VERSION,
    },
};

pub const CONFIG_FILE_NAME: &str = ".potkitrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_package_name")]
    pub package_name: String,
    #[serde(default = "default_package_version")]
    pub package_version: String,
    #[serde(default)]
    pub msgid_bugs_address: String,
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,
    #[serde(default = "default_output_encoding")]
    pub output_encoding: String,
    #[serde(default = "default_true")]
    pub ignore_fuzzy: bool,
    #[serde(default = "default_true")]
    pub report_warning: bool,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_string()
}

fn default_package_version() -> String {
    DEFAULT_PACKAGE_VERSION.to_string()
}

fn default_copyright_holder() -> String {
    DEFAULT_COPYRIGHT_HOLDER.to_string()
}

fn default_output_encoding() -> String {
    DEFAULT_OUTPUT_ENCODING.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            package_version: default_package_version(),
            msgid_bugs_address: String::new(),
            copyright_holder: default_copyright_holder(),
            output_encoding: default_output_encoding(),
            ignore_fuzzy: true,
            report_warning: true,
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the output encoding is unknown or any glob
    /// pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        lookup_encoding(&self.output_encoding).with_context(|| {
            format!(
                "Invalid 'outputEncoding': \"{}\"",
                self.output_encoding
            )
        })?;

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
