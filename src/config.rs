use crate::domain::BranchPolicyTable;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the CI build counter by default
pub const DEFAULT_BUILD_NUMBER_ENV: &str = "GITHUB_RUN_NUMBER";

/// Represents the complete configuration for semantic-versioner.
///
/// Contains the branch release policies, the location of the release files,
/// the build-number source and the optional release hook.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchPolicyTable,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

fn default_version_file() -> String {
    "VERSION".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_build_number_env() -> String {
    DEFAULT_BUILD_NUMBER_ENV.to_string()
}

/// Paths of the files a release rewrites.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            version_file: default_version_file(),
            changelog_file: default_changelog_file(),
        }
    }
}

/// Where the `{build_number}` placeholder takes its value from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_build_number_env")]
    pub build_number_env: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            build_number_env: default_build_number_env(),
        }
    }
}

/// Scripts run around a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HooksConfig {
    /// Script run after the release tag exists, when publishing is requested
    #[serde(default)]
    pub post_release: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branches: BranchPolicyTable::default(),
            files: FilesConfig::default(),
            build: BuildConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document and validate it.
    ///
    /// Branches listed under `[branches]` replace the built-in entry of the
    /// same name; the other built-in branches stay in place.
    pub fn from_toml(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content)?;
        config.branches = BranchPolicyTable::default().with_overrides(config.branches);
        config.branches.validate()?;
        Ok(config)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versioner.toml` in current directory
/// 3. `.versioner.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./versioner.toml").exists() {
        fs::read_to_string("./versioner.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".versioner.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
