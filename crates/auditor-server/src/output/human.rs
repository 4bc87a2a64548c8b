//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use auditor_core::ExtractedRepository;
use auditor_core::ScanResult;
use console::Term;
use console::style;
use serde_json::Value;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }

    fn heading(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, repo: &ExtractedRepository) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading(&format!("Repository '{}' extracted", repo.name));

        let report = &repo.report;
        let _ = self.term.write_line(&format!("  Location:    {}", repo.path.display()));
        let _ = self.term.write_line(&format!(
            "  Files:       {}",
            Self::format_number(report.files_extracted)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories: {}",
            Self::format_number(report.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:  {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:    {:?}", report.duration));
        }

        for warning in &report.warnings {
            self.format_warning(warning);
        }

        Ok(())
    }

    fn format_scan_result(&self, scan: &ScanResult, suggestions: &Value) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading("Scan complete");
        let _ = self.term.write_line(&format!(
            "  Files scanned:   {}",
            Self::format_number(scan.files_scanned)
        ));
        let _ = self
            .term
            .write_line(&format!("  Issues detected: {}", scan.issues_detected));

        if let Some(summary) = suggestions.get("summary").and_then(Value::as_str) {
            let _ = self.term.write_line(&format!("  Suggestions:     {summary}"));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&serde_json::to_string_pretty(suggestions)?);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always shown, even in quiet mode.
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:#}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
