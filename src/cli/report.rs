//! Run report formatting and printing.
//!
//! The extract command collects one [`FileReport`] per processed file and
//! hands the batch here. Separate from the rewrite engine so output can be
//! asserted against a plain writer in tests.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// What happened to one file during a run.
#[derive(Debug)]
pub enum FileStatus {
    /// At least one literal was replaced; `code` holds the rewritten source.
    Rewritten { code: String, replaced: usize },
    /// Processed, but no text was in a rewritable position.
    Unchanged,
    /// No Chinese text anywhere in the file.
    NoChinese,
    /// Disable markers left the file untouched.
    Disabled,
    /// Not a file kind hanex rewrites.
    Unsupported,
    /// Reading, rewriting, or merging failed; the file contributed nothing.
    Failed(String),
}

/// Per-file record produced by the rewrite phase.
#[derive(Debug)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    /// Extracted `(key, text)` pairs in source order.
    pub entries: Vec<(String, String)>,
}

/// Everything the end-of-run summary needs.
pub struct RunSummary<'a> {
    pub reports: &'a [FileReport],
    /// Entries newly added to the catalog this run.
    pub added: usize,
    pub catalog_path: &'a str,
    pub apply: bool,
}

/// Print the run report to stdout.
pub fn print(summary: &RunSummary, verbose: bool) {
    print_to(summary, verbose, &mut io::stdout().lock());
}

/// Print the run report to a custom writer.
pub fn print_to<W: Write>(summary: &RunSummary, verbose: bool, writer: &mut W) {
    if verbose {
        for report in summary.reports {
            print_file_line(report, writer);
        }
    }

    for report in summary.reports {
        match &report.status {
            FileStatus::Failed(message) => {
                let _ = writeln!(
                    writer,
                    "{} {}: {}",
                    FAILURE_MARK.red(),
                    report.path,
                    message
                );
            }
            FileStatus::Unsupported => {
                let _ = writeln!(
                    writer,
                    "{} {} is not a .js or .vue file, skipped",
                    "warning:".bold().yellow(),
                    report.path
                );
            }
            _ => {}
        }
    }

    let counts = Counts::tally(summary.reports);
    print_headline(&counts, writer);
    print_catalog_lines(summary, &counts, writer);
}

struct Counts {
    total: usize,
    rewritten: usize,
    unchanged: usize,
    disabled: usize,
    unsupported: usize,
    failed: usize,
}

impl Counts {
    fn tally(reports: &[FileReport]) -> Self {
        let mut counts = Counts {
            total: reports.len(),
            rewritten: 0,
            unchanged: 0,
            disabled: 0,
            unsupported: 0,
            failed: 0,
        };
        for report in reports {
            match &report.status {
                FileStatus::Rewritten { .. } => counts.rewritten += 1,
                FileStatus::Unchanged | FileStatus::NoChinese => counts.unchanged += 1,
                FileStatus::Disabled => counts.disabled += 1,
                FileStatus::Unsupported => counts.unsupported += 1,
                FileStatus::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }
}

fn print_headline<W: Write>(counts: &Counts, writer: &mut W) {
    let mut parts = vec![format!("{} rewritten", counts.rewritten)];
    if counts.unchanged > 0 {
        parts.push(format!("{} unchanged", counts.unchanged));
    }
    if counts.disabled > 0 {
        parts.push(format!("{} disabled", counts.disabled));
    }
    if counts.unsupported > 0 {
        parts.push(format!("{} unsupported", counts.unsupported));
    }
    if counts.failed > 0 {
        parts.push(format!("{} failed", counts.failed));
    }

    let headline = format!(
        "Checked {} {}: {}",
        counts.total,
        if counts.total == 1 { "file" } else { "files" },
        parts.join(", ")
    );
    let _ = if counts.failed > 0 {
        writeln!(writer, "{} {}", FAILURE_MARK.red(), headline.red())
    } else {
        writeln!(writer, "{} {}", SUCCESS_MARK.green(), headline.green())
    };
}

fn print_catalog_lines<W: Write>(summary: &RunSummary, counts: &Counts, writer: &mut W) {
    if summary.apply {
        if summary.added > 0 {
            let _ = writeln!(
                writer,
                "{} {} {} to {}",
                "Added".green().bold(),
                summary.added,
                entry_word(summary.added),
                summary.catalog_path
            );
        }
        return;
    }

    if summary.added > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} to {}",
            "Would add".yellow().bold(),
            summary.added,
            entry_word(summary.added),
            summary.catalog_path
        );
    }
    if counts.rewritten > 0 {
        let _ = writeln!(
            writer,
            "Run with {} to rewrite files and write the catalog.",
            "--apply".cyan()
        );
    }
}

fn print_file_line<W: Write>(report: &FileReport, writer: &mut W) {
    match &report.status {
        FileStatus::Rewritten { replaced, .. } => {
            let _ = writeln!(
                writer,
                "{} {}: {} replaced",
                SUCCESS_MARK.green(),
                report.path,
                replaced
            );
            print_entries(&report.entries, writer);
        }
        FileStatus::Unchanged => {
            let _ = writeln!(writer, "  {}", format!("{}: nothing to rewrite", report.path).dimmed());
        }
        FileStatus::NoChinese => {
            let _ = writeln!(writer, "  {}", format!("{}: no Chinese text", report.path).dimmed());
        }
        FileStatus::Disabled => {
            let _ = writeln!(
                writer,
                "  {}",
                format!("{}: skipped (i18n-disable)", report.path).yellow()
            );
        }
        // Warned about in the main pass.
        FileStatus::Unsupported | FileStatus::Failed(_) => {}
    }
}

/// Lists extracted pairs with the key column aligned. CJK characters are
/// double width, so padding is computed from display width, not length.
fn print_entries<W: Write>(entries: &[(String, String)], writer: &mut W) {
    let width = entries
        .iter()
        .map(|(_, text)| UnicodeWidthStr::width(text.as_str()))
        .max()
        .unwrap_or(0);
    for (key, text) in entries {
        let padding = width - UnicodeWidthStr::width(text.as_str());
        let _ = writeln!(
            writer,
            "    {}{:padding$}  {}",
            text,
            "",
            key.dimmed(),
            padding = padding
        );
    }
}

fn entry_word(count: usize) -> &'static str {
    if count == 1 { "entry" } else { "entries" }
}
