//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use auditor_core::AuditorConfig;
use auditor_core::PlaceholderAdvisor;
use auditor_core::RefactorAdvisor;
use auditor_core::RepoName;
use auditor_core::ScanAggregator;
use auditor_core::ScanTarget;

pub async fn execute(args: &ScanArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let target = match &args.repository {
        Some(name) => ScanTarget::Repository(add_context(RepoName::new(name.as_str()), &args.extract_dir)?),
        None => ScanTarget::ExtractionRoot,
    };

    let config = AuditorConfig::new(&args.extract_dir).with_walk(args.walk.walk_config());
    let scan = add_context(
        ScanAggregator::new(&config).run_static_analysis(&target),
        &args.extract_dir,
    )?;
    let suggestions = add_context(PlaceholderAdvisor.suggest(&scan).await, &args.extract_dir)?;

    formatter.format_scan_result(&scan, &suggestions)
}
