//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use auditor_core::ExtractedRepository;
use auditor_core::ScanResult;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionOutput<'a> {
    repository: &'a str,
    path: String,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanOutput<'a> {
    static_analysis: &'a ScanResult,
    ai_suggestions: &'a Value,
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, repo: &ExtractedRepository) -> Result<()> {
        let data = ExtractionOutput {
            repository: repo.name.as_str(),
            path: repo.path.display().to_string(),
            files_extracted: repo.report.files_extracted,
            directories_created: repo.report.directories_created,
            bytes_written: repo.report.bytes_written,
            duration_ms: repo.report.duration.as_millis(),
            warnings: &repo.report.warnings,
        };
        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_scan_result(&self, scan: &ScanResult, suggestions: &Value) -> Result<()> {
        let data = ScanOutput {
            static_analysis: scan,
            ai_suggestions: suggestions,
        };
        Self::output(&JsonOutput::success("scan", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        let _ = Self::output(&JsonOutput::success("warning", WarningData { message }));
    }
}
