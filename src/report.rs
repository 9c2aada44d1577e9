// ============================================================================
// report.rs — Status output for the CLI
// ============================================================================

use colored::*;

/// Verbosity-aware printer. Quiet wins over verbose.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
    quiet: bool,
}

impl Reporter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn show_verbose_output(&self) -> bool {
        self.verbose && !self.quiet
    }

    pub fn show_quiet_output(&self) -> bool {
        self.quiet
    }

    /// Normal progress line, hidden in quiet mode.
    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.show_quiet_output() {
            println!("{} {}", "[INFO]".cyan(), msg.as_ref());
        }
    }

    pub fn detail(&self, msg: impl AsRef<str>) {
        if self.show_verbose_output() {
            println!("  {}", msg.as_ref().dimmed());
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if !self.show_quiet_output() {
            eprintln!("{} {}", "[WARN]".yellow().bold(), msg.as_ref());
        }
    }

    /// Final result line; printed even in quiet mode.
    pub fn success(&self, msg: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), msg.as_ref().green());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        eprintln!("{} {}", "[ERROR]".red().bold(), msg.as_ref());
    }
}
