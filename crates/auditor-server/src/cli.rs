//! CLI argument parsing using clap.

use auditor_core::ExtractionConfig;
use auditor_core::WalkConfig;
use auditor_core::config::DEFAULT_EXTRACT_DIR;
use auditor_server::config::DEFAULT_PORT;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auditor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP upload and scan service
    Serve(ServeArgs),
    /// Extract a zip archive into the extraction root
    Extract(ExtractArgs),
    /// Count files under the extraction root or one repository
    Scan(ScanArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Root directory for extracted repositories
    #[arg(long, env = "EXTRACT_DIR", default_value = DEFAULT_EXTRACT_DIR)]
    pub extract_dir: PathBuf,

    /// Maximum request body size (suffixes K, M, G)
    #[arg(long, default_value = "256M", value_parser = parse_byte_size)]
    pub max_upload_size: u64,

    #[command(flatten)]
    pub quotas: QuotaArgs,

    #[command(flatten)]
    pub walk: WalkArgs,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the zip archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Repository name (default: archive file name without .zip)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Root directory for extracted repositories
    #[arg(long, env = "EXTRACT_DIR", default_value = DEFAULT_EXTRACT_DIR)]
    pub extract_dir: PathBuf,

    #[command(flatten)]
    pub quotas: QuotaArgs,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Scan only this repository instead of the whole root
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Root directory for extracted repositories
    #[arg(long, env = "EXTRACT_DIR", default_value = DEFAULT_EXTRACT_DIR)]
    pub extract_dir: PathBuf,

    #[command(flatten)]
    pub walk: WalkArgs,
}

/// Extraction quota overrides shared by `extract` and `serve`.
#[derive(clap::Args)]
pub struct QuotaArgs {
    /// Write entry names verbatim and disable quotas (trusted archives only)
    #[arg(long)]
    pub permissive: bool,

    /// Maximum number of files to extract
    #[arg(long, conflicts_with = "permissive")]
    pub max_files: Option<usize>,

    /// Maximum total extracted size (suffixes K, M, G, T)
    #[arg(long, value_parser = parse_byte_size, conflicts_with = "permissive")]
    pub max_total_size: Option<u64>,

    /// Maximum single file size (suffixes K, M, G, T)
    #[arg(long, value_parser = parse_byte_size, conflicts_with = "permissive")]
    pub max_file_size: Option<u64>,
}

impl QuotaArgs {
    /// Builds the extraction settings, starting from the hardened defaults.
    pub fn extraction_config(&self) -> ExtractionConfig {
        if self.permissive {
            return ExtractionConfig::permissive();
        }

        let mut config = ExtractionConfig::default();
        if let Some(max) = self.max_files {
            config = config.with_max_file_count(max);
        }
        if let Some(max) = self.max_total_size {
            config = config.with_max_total_size(max);
        }
        if let Some(max) = self.max_file_size {
            config = config.with_max_file_size(max);
        }
        config
    }
}

/// Directory walk budget overrides shared by `scan` and `serve`.
#[derive(clap::Args)]
pub struct WalkArgs {
    /// Maximum directory depth to descend
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum number of entries to visit
    #[arg(long)]
    pub max_entries: Option<usize>,
}

impl WalkArgs {
    pub fn walk_config(&self) -> WalkConfig {
        let mut walk = WalkConfig::default();
        if let Some(max) = self.max_depth {
            walk = walk.with_max_depth(max);
        }
        if let Some(max) = self.max_entries {
            walk = walk.with_max_entries(max);
        }
        walk
    }
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (digits, multiplier) = match s.char_indices().last() {
        Some((idx, 'T')) => (&s[..idx], 1024_u64.pow(4)),
        Some((idx, 'G')) => (&s[..idx], 1024_u64.pow(3)),
        Some((idx, 'M')) => (&s[..idx], 1024_u64.pow(2)),
        Some((idx, 'K')) => (&s[..idx], 1024),
        _ => (s, 1),
    };

    digits
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("100").unwrap(), 100);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("256M").unwrap(), 256 * 1024 * 1024);
        assert_eq!(parse_byte_size("3G").unwrap(), 3 * 1024 * 1024 * 1024);
        assert_eq!(parse_byte_size("1T").unwrap(), 1024_u64.pow(4));
        assert!(parse_byte_size("invalid").is_err());
        assert!(parse_byte_size("").is_err());
        assert!(parse_byte_size("M").is_err());
    }

    #[test]
    fn test_parse_byte_size_overflow() {
        assert!(parse_byte_size("18446744073709551615K").is_err());
        assert!(parse_byte_size("17592186044416G").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_permissive_conflicts_with_quotas() {
        let result = Cli::try_parse_from(["auditor", "extract", "a.zip", "--permissive", "--max-files", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_permissive_conflicts_with_quotas() {
        let result = Cli::try_parse_from(["auditor", "serve", "--permissive", "--max-total-size", "1G"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_limits() {
        let cli = Cli::try_parse_from([
            "auditor",
            "serve",
            "--max-files",
            "50000",
            "--max-total-size",
            "8G",
            "--max-depth",
            "32",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                let extraction = args.quotas.extraction_config();
                assert_eq!(extraction.max_file_count, 50_000);
                assert_eq!(extraction.max_total_size, 8 * 1024 * 1024 * 1024);
                assert!(extraction.contain_paths);
                assert_eq!(args.walk.walk_config().max_depth, 32);
                assert_eq!(args.walk.walk_config().max_entries, WalkConfig::default().max_entries);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_serve_permissive() {
        let cli = Cli::try_parse_from(["auditor", "serve", "--permissive"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.quotas.extraction_config(), ExtractionConfig::permissive());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::try_parse_from(["auditor", "scan", "--extract-dir", "/tmp/x"]).unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.repository.is_none());
                assert_eq!(args.extract_dir, PathBuf::from("/tmp/x"));
                assert_eq!(args.walk.walk_config(), WalkConfig::default());
            }
            _ => panic!("expected scan"),
        }
    }
}
