use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    MappingsNotFound,
    MappingInvalidPattern,
    MappingNotUtf8,

    ToolNotFound,
    ToolCommandFailed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::MappingsNotFound => "mappings.not_found",
            ErrorCode::MappingInvalidPattern => "mapping.invalid_pattern",
            ErrorCode::MappingNotUtf8 => "mapping.not_utf8",

            ErrorCode::ToolNotFound => "tool.not_found",
            ErrorCode::ToolCommandFailed => "tool.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingsNotFoundDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPatternDetails {
    pub pattern: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolNotFoundDetails {
    pub tool: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCommandFailedDetails {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Mapping context attached to an error raised while applying one mapping line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingContext {
    pub line: usize,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let path = path.into();
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.clone(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            format!("Invalid JSON in configuration file {}", path),
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.clone(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid configuration value: {}", problem),
            details,
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            format!("Invalid argument: {}", problem),
            details,
        )
    }

    pub fn mappings_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        let details = to_details(MappingsNotFoundDetails { path: path.clone() });

        Self::new(
            ErrorCode::MappingsNotFound,
            format!("Mapping file not found: {}", path),
            details,
        )
        .with_hint("Create a file with one 'from -> to' mapping per line, or pass its path")
    }

    pub fn mapping_invalid_pattern(pattern: impl Into<String>, problem: impl Into<String>) -> Self {
        let problem = problem.into();
        let details = to_details(InvalidPatternDetails {
            pattern: pattern.into(),
            problem: problem.clone(),
        });

        Self::new(
            ErrorCode::MappingInvalidPattern,
            format!("Invalid search pattern: {}", problem),
            details,
        )
    }

    /// An active mapping whose `from` or `to` can't be passed on as text.
    pub fn mapping_not_utf8() -> Self {
        Self::new(
            ErrorCode::MappingNotUtf8,
            "Mapping is not valid UTF-8",
            Value::Object(serde_json::Map::new()),
        )
        .with_hint("Re-save the mapping file as UTF-8")
    }

    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        let details = to_details(ToolNotFoundDetails { tool: tool.clone() });

        Self::new(
            ErrorCode::ToolNotFound,
            format!("Rename tool '{}' not found on PATH", tool),
            details,
        )
        .with_hint("Install fastmod (https://github.com/facebookincubator/fastmod), e.g. 'cargo install fastmod'")
    }

    pub fn tool_command_failed(details: ToolCommandFailedDetails) -> Self {
        let message = match details.exit_code {
            Some(code) => format!("Rename tool exited with status {}", code),
            None => "Rename tool was terminated by a signal".to_string(),
        };

        Self::new(ErrorCode::ToolCommandFailed, message, to_details(details))
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// Attach the mapping being applied when this error occurred.
    ///
    /// The message is prefixed with `rename <from> -> <to>` and the mapping is
    /// stored under `details.mapping`. The error code is left untouched.
    pub fn with_mapping(mut self, context: MappingContext) -> Self {
        self.message = format!(
            "rename {} -> {} (line {}): {}",
            context.from, context.to, context.line, self.message
        );

        let mapping = to_details(context);
        match &mut self.details {
            Value::Object(map) => {
                map.insert("mapping".to_string(), mapping);
            }
            other => {
                let previous = std::mem::take(other);
                let mut map = serde_json::Map::new();
                if !previous.is_null() {
                    map.insert("cause".to_string(), previous);
                }
                map.insert("mapping".to_string(), mapping);
                *other = Value::Object(map);
            }
        }
        self
    }
}
