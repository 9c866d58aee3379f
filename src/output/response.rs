//! CLI response formatting and output.
//!
//! Provides the JSON envelope, text diagnostics, and exit code mapping.

use maprename::error::Hint;
use maprename::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

/// Print the result as a JSON envelope on stdout.
pub fn print_json_result<T: Serialize>(result: &Result<T>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(err)),
    }
}

/// Human-readable diagnostic for a failed run.
pub fn render_error(err: &Error) -> String {
    let mut out = format!("error: {}", err.message);

    let interesting = err
        .details
        .as_object()
        .map(|map| !map.is_empty())
        .unwrap_or(false);
    if interesting {
        if let Ok(details) = serde_json::to_string_pretty(&err.details) {
            out.push_str("\ndetails: ");
            out.push_str(&details);
        }
    }

    for hint in &err.hints {
        out.push_str("\nhint: ");
        out.push_str(&hint.message);
    }

    out
}

pub fn print_error(err: &Error) {
    eprintln!("{}", render_error(err));
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument
        | ErrorCode::MappingInvalidPattern
        | ErrorCode::MappingNotUtf8 => 2,

        ErrorCode::MappingsNotFound | ErrorCode::ToolNotFound => 4,

        ErrorCode::ToolCommandFailed => 20,

        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => 1,
    }
}

pub fn exit_code_for_result<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => exit_code_for_error(err.code),
    }
}
