//! Generator configuration loading and defaults.
//!
//! Every field has a default, so an empty `{}` file (or no file at all) yields
//! the Whisper engine conventions: `WCLASS()`, `WENUM()`, `WPROPERTY(...)`,
//! `WREFRESH()` markers and the `frost::Meta<T>` output shape.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FrostError, Result};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".frost.config.json";

/// Main generator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Annotation marker names
    pub markers: Markers,
    /// Property defaults applied before annotation overrides
    pub defaults: PropertyDefaults,
    /// How annotation argument lists are split
    pub arguments: ArgumentSplit,
    /// Generated header shape
    pub output: OutputConfig,
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FrostError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| FrostError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, else from the default location when present.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Marker names, written without the trailing `()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub class: String,
    #[serde(rename = "enum")]
    pub enumeration: String,
    pub property: String,
    pub refresh: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            class: "WCLASS".to_string(),
            enumeration: "WENUM".to_string(),
            property: "WPROPERTY".to_string(),
            refresh: "WREFRESH".to_string(),
        }
    }
}

impl Markers {
    /// Literal text of the refresh marker line
    pub fn refresh_literal(&self) -> String {
        format!("{}()", self.refresh)
    }
}

/// Defaults for property edit kind and argument slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDefaults {
    /// Edit kind used when the annotation names none
    pub edit: String,
    /// min, max, step, format
    pub float_args: Vec<String>,
    /// min, max, step
    pub int_args: Vec<String>,
    /// Type text that selects `int_args`
    pub int_type: String,
}

impl Default for PropertyDefaults {
    fn default() -> Self {
        Self {
            edit: "Edit::eInput".to_string(),
            float_args: vec![
                "0.f".to_string(),
                "0.f".to_string(),
                ".01".to_string(),
                "\"%.3f\"".to_string(),
            ],
            int_args: vec!["0".to_string(), "0".to_string(), "1".to_string()],
            int_type: "int".to_string(),
        }
    }
}

impl PropertyDefaults {
    /// Default argument slots for a property of type `ty`
    pub fn args_for(&self, ty: &str) -> Vec<String> {
        if ty == self.int_type {
            self.int_args.clone()
        } else {
            self.float_args.clone()
        }
    }
}

/// Annotation argument splitting mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentSplit {
    /// Split on top-level commas only, respecting brackets and literals
    #[default]
    DepthAware,
    /// Split on every comma
    Naive,
}

/// Names used in the generated header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub guard_prefix: String,
    pub includes: Vec<String>,
    pub body_macro: String,
    pub data_macro: String,
    pub meta_namespace: String,
    pub usage_enum: String,
    pub dictionary_type: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            guard_prefix: "WFROST_GENERATED_".to_string(),
            includes: vec!["frost.hpp".to_string(), "wsp_devkit.hpp".to_string()],
            body_macro: "WCLASS_BODY".to_string(),
            data_macro: "WGENERATED_META_DATA".to_string(),
            meta_namespace: "frost".to_string(),
            usage_enum: "WhispUsage".to_string(),
            dictionary_type: "wsp::dictionary".to_string(),
        }
    }
}
