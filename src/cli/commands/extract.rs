//! The extract command: scan, rewrite, merge, report.
//!
//! Files are rewritten in parallel, each collecting its own entry buffer.
//! Buffers are merged into the catalog sequentially in scan order so the
//! catalog's insertion order is stable run to run. Dry-run is the default;
//! `--apply` writes the catalog first and the rewritten sources after, so a
//! partial failure can leave extra catalog entries but never a source file
//! referencing a key the catalog does not have.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::super::args::ExtractCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{self, FileReport, FileStatus, RunSummary};
use crate::catalog::{EntryCollector, LocaleCatalog};
use crate::config::load_config;
use crate::formatter::{self, Formatter, PassthroughFormatter};
use crate::orchestrator::{ProcessOptions, ProcessOutcome, process_source};
use crate::scanner::scan_files;

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let current_dir = std::env::current_dir().context("cannot determine working directory")?;
    let mut config = load_config(&current_dir)?.config;

    if let Some(catalog) = &cmd.catalog {
        config.catalog_path = catalog.clone();
    }
    if let Some(name) = &cmd.import_name {
        config.import_name = name.clone();
    }
    if let Some(path) = &cmd.import_path {
        config.import_path = path.clone();
    }

    let files: Vec<String> = if cmd.paths.is_empty() {
        scan_files(".", &config.includes, &config.ignores, cmd.verbose).files
    } else {
        cmd.paths.iter().map(|p| p.display().to_string()).collect()
    };

    let mut catalog = LocaleCatalog::open_or_create(Path::new(&config.catalog_path))?;

    let formatter: Box<dyn Formatter> = if config.format {
        formatter::for_project(&current_dir)
    } else {
        Box::new(PassthroughFormatter)
    };

    let options = ProcessOptions::new(&config.import_name, &config.import_path);
    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| process_file(path, &options, formatter.as_ref()))
        .collect();

    let mut added = 0;
    for report in &mut reports {
        if matches!(report.status, FileStatus::Failed(_)) {
            continue;
        }
        match catalog.merge(&report.entries) {
            Ok(count) => added += count,
            Err(err) => report.status = FileStatus::Failed(format!("{:#}", err)),
        }
    }

    if cmd.apply {
        if added > 0 {
            catalog.save()?;
        }
        for report in &mut reports {
            let write_error = match &report.status {
                FileStatus::Rewritten { code, .. } => fs::write(&report.path, code).err(),
                _ => None,
            };
            if let Some(err) = write_error {
                report.status = FileStatus::Failed(format!("failed to write rewritten file: {}", err));
            }
        }
    }

    let summary = RunSummary {
        reports: &reports,
        added,
        catalog_path: &config.catalog_path,
        apply: cmd.apply,
    };
    report::print(&summary, cmd.verbose);

    if reports
        .iter()
        .any(|report| matches!(report.status, FileStatus::Failed(_)))
    {
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}

fn process_file(path: &str, options: &ProcessOptions, formatter: &dyn Formatter) -> FileReport {
    let mut entries = EntryCollector::new();
    match rewrite_file(path, options, &mut entries, formatter) {
        Ok(status) => FileReport {
            path: path.to_string(),
            status,
            entries: entries.entries,
        },
        // A failed file contributes nothing, not even its catalog entries.
        Err(err) => FileReport {
            path: path.to_string(),
            status: FileStatus::Failed(format!("{:#}", err)),
            entries: Vec::new(),
        },
    }
}

fn rewrite_file(
    path: &str,
    options: &ProcessOptions,
    entries: &mut EntryCollector,
    formatter: &dyn Formatter,
) -> Result<FileStatus> {
    let source = fs::read_to_string(path).context("failed to read file")?;
    let outcome = process_source(path, &source, options, entries, formatter)?;
    Ok(match outcome {
        ProcessOutcome::Rewritten { code, replaced } => {
            if replaced > 0 {
                FileStatus::Rewritten { code, replaced }
            } else {
                FileStatus::Unchanged
            }
        }
        ProcessOutcome::Unsupported => FileStatus::Unsupported,
        ProcessOutcome::NoChinese => FileStatus::NoChinese,
        ProcessOutcome::Disabled => FileStatus::Disabled,
    })
}
