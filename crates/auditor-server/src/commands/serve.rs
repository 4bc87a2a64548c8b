//! Serve command implementation.

use crate::cli::ServeArgs;
use anyhow::Context;
use anyhow::Result;
use auditor_server::ServerConfig;

pub async fn execute(args: &ServeArgs) -> Result<()> {
    let max_upload_bytes =
        usize::try_from(args.max_upload_size).context("--max-upload-size does not fit in memory")?;

    let config = ServerConfig::default()
        .with_port(args.port)
        .with_extract_dir(&args.extract_dir)
        .with_max_upload_bytes(max_upload_bytes)
        .with_extraction(args.quotas.extraction_config())
        .with_walk(args.walk.walk_config());

    if args.quotas.permissive {
        tracing::warn!("containment and quotas disabled (--permissive)");
    }

    auditor_server::serve(&config).await
}
