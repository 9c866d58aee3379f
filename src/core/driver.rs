//! Batch driver: one renamer call per active mapping line, in file order,
//! stopping at the first failure.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{Error, MappingContext, Result};
use crate::mapping::{self, LineKind, Mapping};
use crate::pattern::{self, PatternKind};
use crate::renamer::Renamer;

/// A mapping that was handed to the renamer and succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMapping {
    /// 1-indexed line in the mapping file.
    pub line: usize,
    pub from: String,
    pub to: String,
    pub pattern: String,
    pub kind: PatternKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub mappings_file: String,
    pub dry_run: bool,
    pub applied: Vec<AppliedMapping>,
    /// Lines whose `from` starts with `#`.
    pub disabled: usize,
    /// Lines that don't fit the mapping grammar, blank ones included.
    pub unmatched: usize,
    /// Command lines a dry run would have executed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub planned: Vec<String>,
}

impl RunReport {
    /// Mark the report as a dry run that would have executed `planned`.
    pub fn with_planned(mut self, planned: Vec<String>) -> Self {
        self.dry_run = true;
        self.planned = planned;
        self
    }
}

/// Apply every mapping in `mapping_file` through `renamer`.
pub fn run(mapping_file: &Path, renamer: &mut dyn Renamer) -> Result<RunReport> {
    let display = mapping_file.display().to_string();
    let file = File::open(mapping_file).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::mappings_not_found(&display),
        _ => Error::internal_io(e.to_string(), Some(format!("open {}", display))),
    })?;

    run_reader(BufReader::new(file), &display, renamer)
}

/// Same as [`run`], reading mapping lines from `reader`. `source` names the
/// input in logs and the report.
pub fn run_reader<R: BufRead>(
    mut reader: R,
    source: &str,
    renamer: &mut dyn Renamer,
) -> Result<RunReport> {
    let mut report = RunReport {
        mappings_file: source.to_string(),
        ..RunReport::default()
    };

    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        line_no += 1;
        let read = reader.read_until(b'\n', &mut buf).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("read {} line {}", source, line_no)),
            )
        })?;
        if read == 0 {
            break;
        }

        let line = strip_line_ending(&buf);
        match mapping::classify(line) {
            LineKind::Mapping(mapping) => {
                let applied = apply_mapping(line_no, mapping, renamer)?;
                report.applied.push(applied);
            }
            LineKind::Disabled(mapping) => {
                tracing::debug!(line = line_no, from = %mapping.from, "skipping disabled mapping");
                report.disabled += 1;
            }
            LineKind::NotUtf8(mapping) => {
                return Err(Error::mapping_not_utf8().with_mapping(MappingContext {
                    line: line_no,
                    from: mapping.from,
                    to: mapping.to,
                    pattern: None,
                }));
            }
            LineKind::Unmatched => {
                let content = String::from_utf8_lossy(line);
                if !content.trim().is_empty() {
                    tracing::debug!(line = line_no, content = %content, "skipping line without a mapping");
                }
                report.unmatched += 1;
            }
        }
    }

    Ok(report)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn apply_mapping(
    line: usize,
    mapping: Mapping,
    renamer: &mut dyn Renamer,
) -> Result<AppliedMapping> {
    tracing::info!("rename {} {}", mapping.from, mapping.to);

    let context = |pattern: Option<String>| MappingContext {
        line,
        from: mapping.from.clone(),
        to: mapping.to.clone(),
        pattern,
    };

    let pattern = pattern::build(&mapping.from).map_err(|e| e.with_mapping(context(None)))?;

    renamer
        .check_pattern(pattern.as_str())
        .and_then(|()| renamer.apply(pattern.as_str(), &mapping.to))
        .map_err(|e| e.with_mapping(context(Some(pattern.source.clone()))))?;

    Ok(AppliedMapping {
        line,
        from: mapping.from,
        to: mapping.to,
        pattern: pattern.source,
        kind: pattern.kind,
    })
}
