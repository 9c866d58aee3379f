use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "maprename.json";

/// Run configuration, as read from maprename.json.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameConfig {
    /// Rename tool executable, resolved through PATH.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// File extensions the tool is restricted to.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Mapping file, relative to the working directory.
    #[serde(default = "default_mappings")]
    pub mappings: PathBuf,

    /// Directory the tool runs in. Defaults to the working directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            extensions: default_extensions(),
            mappings: default_mappings(),
            root: None,
        }
    }
}

fn default_tool() -> String {
    "fastmod".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["sol".to_string()]
}

fn default_mappings() -> PathBuf {
    PathBuf::from("mappings")
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tool: Option<String>,
    pub extensions: Vec<String>,
    pub mappings: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

impl RenameConfig {
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(tool) = overrides.tool {
            self.tool = tool;
        }
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions;
        }
        if let Some(mappings) = overrides.mappings {
            self.mappings = mappings;
        }
        if overrides.root.is_some() {
            self.root = overrides.root;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "tool",
                Some(self.tool.clone()),
                "tool must not be empty",
            ));
        }

        if self.extensions.is_empty() {
            return Err(Error::config_invalid_value(
                "extensions",
                None,
                "at least one file extension is required",
            ));
        }

        if let Some(bad) = self
            .extensions
            .iter()
            .find(|ext| ext.trim().is_empty() || ext.contains(','))
        {
            return Err(Error::config_invalid_value(
                "extensions",
                Some(bad.clone()),
                "extensions must be non-empty and must not contain ','",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Resolve the effective configuration.
///
/// An explicit `path` must exist. Without one, `maprename.json` in `cwd` is
/// used when present, built-in defaults otherwise. Overrides are applied last
/// and the result is validated.
pub fn resolve(
    path: Option<&Path>,
    cwd: &Path,
    overrides: ConfigOverrides,
) -> Result<RenameConfig> {
    let base = match path {
        Some(path) => load_from_file(path)?,
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                load_from_file(&candidate)?
            } else {
                RenameConfig::default()
            }
        }
    };

    let config = base.apply(overrides);
    config.validate()?;
    Ok(config)
}

pub fn load_from_file(path: &Path) -> Result<RenameConfig> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::config_invalid_value(
            "config",
            Some(path.display().to_string()),
            format!("config file {} does not exist", path.display()),
        ),
        _ => Error::internal_io(e.to_string(), Some(format!("read {}", path.display()))),
    })?;

    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}
