//! Rename backends.
//!
//! The driver only needs "replace every match of this pattern with this
//! text"; file walking and editing belong to the backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::RenameConfig;
use crate::error::{Error, Result, ToolCommandFailedDetails};
use crate::pattern;
use crate::shell;

pub trait Renamer {
    /// Reject a pattern before anything runs. Backends that can't tell which
    /// regex dialect they speak accept everything and let the tool decide.
    fn check_pattern(&self, _pattern: &str) -> Result<()> {
        Ok(())
    }

    /// Replace every match of `pattern` with `replacement` across the project.
    fn apply(&mut self, pattern: &str, replacement: &str) -> Result<()>;
}

/// Runs `fastmod` (or a flag-compatible tool) once per mapping, accepting
/// every proposed edit.
#[derive(Debug, Clone)]
pub struct Fastmod {
    program: String,
    extensions: Vec<String>,
    root: Option<PathBuf>,
}

impl Fastmod {
    pub fn new(program: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extensions,
            root: None,
        }
    }

    pub fn from_config(config: &RenameConfig) -> Self {
        Self {
            program: config.tool.clone(),
            extensions: config.extensions.clone(),
            root: config.root.clone(),
        }
    }

    /// Whether the configured program is fastmod itself, whose regex
    /// dialect is the `regex` crate's.
    fn is_fastmod(&self) -> bool {
        Path::new(&self.program)
            .file_stem()
            .is_some_and(|stem| stem == "fastmod")
    }

    /// Argument vector for one invocation:
    /// `-e <ext,...> --accept-all <pattern> <replacement>`.
    pub fn args(&self, pattern: &str, replacement: &str) -> Vec<String> {
        vec![
            "-e".to_string(),
            self.extensions.join(","),
            "--accept-all".to_string(),
            pattern.to_string(),
            replacement.to_string(),
        ]
    }

    pub fn display_command(&self, pattern: &str, replacement: &str) -> String {
        shell::render_command(&self.program, &self.args(pattern, replacement))
    }
}

impl Renamer for Fastmod {
    fn check_pattern(&self, pattern: &str) -> Result<()> {
        if self.is_fastmod() {
            pattern::check_regex(pattern)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        let args = self.args(pattern, replacement);
        let command = shell::render_command(&self.program, &args);

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        if let Some(root) = &self.root {
            cmd.current_dir(root);
        }

        tracing::debug!(command = %command, "spawning rename tool");

        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::tool_not_found(&self.program),
            _ => Error::internal_io(e.to_string(), Some(format!("spawn {}", self.program))),
        })?;

        if output.status.success() {
            return Ok(());
        }

        Err(Error::tool_command_failed(ToolCommandFailedDetails {
            command,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }))
    }
}

/// Accepts every invocation without touching the filesystem, keeping the
/// command lines the real tool would have run.
#[derive(Debug, Clone)]
pub struct DryRun {
    tool: Fastmod,
    planned: Vec<String>,
}

impl DryRun {
    pub fn new(tool: Fastmod) -> Self {
        Self {
            tool,
            planned: Vec::new(),
        }
    }

    pub fn planned(&self) -> &[String] {
        &self.planned
    }
}

impl Renamer for DryRun {
    fn check_pattern(&self, pattern: &str) -> Result<()> {
        self.tool.check_pattern(pattern)
    }

    fn apply(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        let command = self.tool.display_command(pattern, replacement);
        tracing::info!(command = %command, "dry run, not executing");
        self.planned.push(command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn sol(program: &str) -> Fastmod {
        Fastmod::new(program, vec!["sol".to_string()])
    }

    #[test]
    fn args_follow_fastmod_flag_shape() {
        assert_eq!(
            sol("fastmod").args(r"\bilk\b", "collateralType"),
            vec!["-e", "sol", "--accept-all", r"\bilk\b", "collateralType"]
        );
    }

    #[test]
    fn multiple_extensions_are_comma_joined() {
        let tool = Fastmod::new("fastmod", vec!["sol".to_string(), "js".to_string()]);
        assert_eq!(tool.args("a", "b")[1], "sol,js");
    }

    #[test]
    fn dry_run_records_commands() {
        let mut dry = DryRun::new(sol("fastmod"));
        dry.apply(r"\bilk\b", "collateralType").unwrap();
        dry.apply("^legacy.*$", "modern").unwrap();

        assert_eq!(
            dry.planned(),
            &[
                r"fastmod -e sol --accept-all '\bilk\b' collateralType".to_string(),
                "fastmod -e sol --accept-all '^legacy.*$' modern".to_string(),
            ]
        );
    }

    #[test]
    fn missing_program_is_tool_not_found() {
        let mut tool = sol("maprename-no-such-tool-7f3a");
        let err = tool.apply("a", "b").unwrap_err();
        assert_eq!(err.code, ErrorCode::ToolNotFound);
        assert_eq!(err.details["tool"], "maprename-no-such-tool-7f3a");
    }

    #[cfg(unix)]
    #[test]
    fn successful_exit_is_ok() {
        let mut tool = sol("true");
        assert!(tool.apply("a", "b").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_command_failed() {
        let mut tool = sol("false");
        let err = tool.apply("a", "b").unwrap_err();
        assert_eq!(err.code, ErrorCode::ToolCommandFailed);
        assert_eq!(err.details["exitCode"], 1);
        assert_eq!(err.details["command"], "false -e sol --accept-all a b");
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_configured_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenameConfig {
            tool: "true".to_string(),
            root: Some(dir.path().to_path_buf()),
            ..RenameConfig::default()
        };
        let mut tool = Fastmod::from_config(&config);
        assert!(tool.apply("a", "b").is_ok());
    }

    #[test]
    fn fastmod_patterns_are_checked_with_regex_syntax() {
        let err = sol("fastmod").check_pattern("foo(?=bar)").unwrap_err();
        assert_eq!(err.code, ErrorCode::MappingInvalidPattern);

        assert!(sol("/usr/local/bin/fastmod").check_pattern("foo(").is_err());
        assert!(sol("fastmod").check_pattern(r"\bilk\b").is_ok());
    }

    #[test]
    fn other_tools_accept_their_own_dialect() {
        assert!(sol("codemod").check_pattern("foo(?=bar)").is_ok());
        assert!(DryRun::new(sol("codemod")).check_pattern("foo(?=bar)").is_ok());
        assert!(DryRun::new(sol("fastmod")).check_pattern("foo(").is_err());
    }
}
