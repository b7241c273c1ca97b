//! Formatting boundary for rewritten component files.
//!
//! Rewritten `.vue` documents are reassembled from their blocks and then
//! handed to prettier so the output matches what the project's own tooling
//! would produce. Script files are spliced in place and never reformatted.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use colored::Colorize;

/// Formats a rewritten document before it is written back to disk.
pub trait Formatter: Send + Sync {
    fn format(&self, file_name: &str, code: &str) -> Result<String>;
}

/// Returns text unchanged. Used when prettier is unavailable.
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, _file_name: &str, code: &str) -> Result<String> {
        Ok(code.to_owned())
    }
}

/// Config files prettier resolves on its own. When none is present the
/// project has no opinion, so we pass explicit style flags instead.
const PRETTIER_CONFIG_FILES: [&str; 9] = [
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.yaml",
    ".prettierrc.yml",
    ".prettierrc.js",
    ".prettierrc.cjs",
    "prettier.config.js",
    "prettier.config.cjs",
    ".prettierrc.toml",
];

/// Runs the project's prettier binary over stdin.
pub struct PrettierFormatter {
    binary: PathBuf,
    use_default_style: bool,
}

impl PrettierFormatter {
    /// Locates prettier for the given project root. The local
    /// `node_modules/.bin` install wins over one on `PATH`; returns `None`
    /// when neither exists.
    pub fn discover(project_root: &Path) -> Option<Self> {
        let local = project_root.join("node_modules").join(".bin").join("prettier");
        let binary = if local.is_file() {
            local
        } else if prettier_on_path() {
            PathBuf::from("prettier")
        } else {
            return None;
        };

        Some(PrettierFormatter {
            binary,
            use_default_style: !has_prettier_config(project_root),
        })
    }
}

impl Formatter for PrettierFormatter {
    fn format(&self, file_name: &str, code: &str) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command.arg("--stdin-filepath").arg(file_name);
        if self.use_default_style {
            command.arg("--semi").arg("--single-quote");
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.binary.display()))?;

        // Close stdin before waiting or prettier blocks reading it.
        let mut stdin = child.stdin.take().context("prettier stdin unavailable")?;
        stdin
            .write_all(code.as_bytes())
            .context("failed to pipe source to prettier")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .context("failed to wait for prettier")?;
        if !output.status.success() {
            bail!(
                "prettier failed on {}: {}",
                file_name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).context("prettier produced invalid utf-8")
    }
}

fn has_prettier_config(project_root: &Path) -> bool {
    PRETTIER_CONFIG_FILES
        .iter()
        .any(|name| project_root.join(name).is_file())
}

fn prettier_on_path() -> bool {
    Command::new("prettier")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// Picks the formatter for a run. Falls back to passthrough with a warning
/// when prettier cannot be found.
pub fn for_project(project_root: &Path) -> Box<dyn Formatter> {
    match PrettierFormatter::discover(project_root) {
        Some(formatter) => Box::new(formatter),
        None => {
            eprintln!(
                "{} prettier not found, output will not be reformatted",
                "warning:".bold().yellow()
            );
            Box::new(PassthroughFormatter)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_passthrough_returns_input() {
        let code = "<template>\n  <p>hi</p>\n</template>\n";
        let formatted = PassthroughFormatter.format("App.vue", code).unwrap();
        assert_eq!(formatted, code);
    }

    #[test]
    fn test_detects_prettier_config() {
        let dir = tempdir().unwrap();
        assert!(!has_prettier_config(dir.path()));

        File::create(dir.path().join(".prettierrc")).unwrap();
        assert!(has_prettier_config(dir.path()));
    }

    #[test]
    fn test_detects_prettier_config_variants() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("prettier.config.cjs")).unwrap();
        assert!(has_prettier_config(dir.path()));
    }

    #[test]
    fn test_discover_without_local_install() {
        let dir = tempdir().unwrap();
        // No node_modules in an empty temp dir; discovery may still find a
        // global binary, but it must not point at the local path.
        if let Some(formatter) = PrettierFormatter::discover(dir.path()) {
            assert_eq!(formatter.binary, PathBuf::from("prettier"));
            assert!(formatter.use_default_style);
        }
    }
}
