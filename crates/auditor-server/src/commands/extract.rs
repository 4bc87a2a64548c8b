//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use auditor_core::AuditorConfig;
use auditor_core::Extractor;
use auditor_core::RepoName;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let name = match &args.name {
        Some(name) => add_context(RepoName::new(name.as_str()), &args.archive)?,
        None => RepoName::from_upload(
            args.archive
                .file_name()
                .and_then(|file_name| file_name.to_str()),
        ),
    };

    let config = AuditorConfig::new(&args.extract_dir).with_extraction(args.quotas.extraction_config());
    if args.quotas.permissive {
        formatter.format_warning("containment and quotas disabled (--permissive)");
    }

    let repo = add_context(Extractor::new(&config).extract(&args.archive, &name), &args.archive)?;
    formatter.format_extraction_result(&repo)
}
