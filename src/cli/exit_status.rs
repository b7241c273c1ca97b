use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for codemod tools.
///
/// - `Success` (0): Run completed, every file was processed
/// - `Failure` (1): Run completed but some files could not be rewritten
/// - `Error` (2): Run aborted by an internal error (config error, unreadable catalog, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed, every file was processed.
    Success,
    /// Run completed but some files could not be rewritten.
    Failure,
    /// Run aborted by an internal error (config error, unreadable catalog, etc.).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }
}
