use clap::Args;
use std::path::PathBuf;

use maprename::config::{self, ConfigOverrides};
use maprename::driver::{self, RunReport};
use maprename::renamer::{DryRun, Fastmod};
use maprename::Error;

use crate::commands::CmdResult;

#[derive(Args, Debug, Default)]
pub struct RenameArgs {
    /// Mapping file, one `from -> to` per line [default: mappings]
    pub mappings: Option<PathBuf>,

    /// JSON config file [default: ./maprename.json when present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rename tool to invoke [default: fastmod]. Patterns are checked
    /// against fastmod's regex syntax only when the tool is fastmod
    /// itself; any other tool receives them unchecked
    #[arg(long, value_name = "NAME")]
    pub tool: Option<String>,

    /// Restrict edits to files with this extension (repeatable) [default: sol]
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory to run the rename tool in
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print the tool invocations without running them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: RenameArgs) -> CmdResult<RunReport> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::internal_io(e.to_string(), Some("resolve working directory".to_string())))?;

    let overrides = ConfigOverrides {
        tool: args.tool,
        extensions: args.extensions,
        mappings: args.mappings,
        root: args.root,
    };
    let config = config::resolve(args.config.as_deref(), &cwd, overrides)?;

    if let Some(root) = &config.root {
        if !root.is_dir() {
            return Err(Error::validation_invalid_argument(
                "root",
                format!("{} is not a directory", root.display()),
            ));
        }
    }

    tracing::debug!(
        tool = %config.tool,
        extensions = %config.extensions.join(","),
        mappings = %config.mappings.display(),
        "resolved configuration"
    );

    let mut tool = Fastmod::from_config(&config);
    if args.dry_run {
        let mut dry = DryRun::new(tool);
        let report = driver::run(&config.mappings, &mut dry)?;
        return Ok(report.with_planned(dry.planned().to_vec()));
    }

    driver::run(&config.mappings, &mut tool)
}
