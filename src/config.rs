//! Persisted configuration for the summarization endpoint and exclusions
//!
//! Settings live in a TOML file under the user's home directory. Missing
//! keys fall back to defaults, and the file is created with defaults on
//! first use.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:11434/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3:8b-instruct-q5_1";
pub const DEFAULT_PROMPT: &str =
    "You are a helpful assistant that summarizes file contents, including code files.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Endpoint and traversal settings, read-only to the core per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_exclude", deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_key() -> String {
    "your_api_key_here".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "env".to_string(),
    ]
}

/// Accept `exclude = "name"` as shorthand for a single-element list.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => vec![s],
        StringOrList::Many(v) => v,
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: default_api_key(),
            model: default_model(),
            prompt: default_prompt(),
            exclude: default_exclude(),
        }
    }
}

impl Config {
    /// Update a single setting by key, for the `config --set` command.
    ///
    /// `exclude` takes a comma-separated list; all other keys are plain
    /// strings. Unknown keys are rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "api_key" => self.api_key = value.to_string(),
            "model" => self.model = value.to_string(),
            "prompt" => self.prompt = value.to_string(),
            "exclude" => {
                self.exclude = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Key/value pairs for `config --show`, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api_url", self.api_url.clone()),
            ("api_key", self.api_key.clone()),
            ("model", self.model.clone()),
            ("prompt", self.prompt.clone()),
            ("exclude", self.exclude.join(", ")),
        ]
    }
}

/// Loads and saves [`Config`] at a known path.
///
/// The path is injected at construction so tests can point the store at a
/// temporary directory instead of touching the real home directory.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store rooted at `~/.treescribe/config.toml`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(".treescribe").join("config.toml")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the config file, or create it with defaults on first use.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
                path: self.path.clone(),
                source,
            })?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Config::default();
            self.save(&config)?;
            Ok(config)
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
