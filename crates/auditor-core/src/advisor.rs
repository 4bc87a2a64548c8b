//! Refactor suggestion collaborators.

use async_trait::async_trait;
use serde_json::Value;
use serde_json::json;

use crate::Result;
use crate::analysis::ScanResult;

/// Produces refactor suggestions for a completed scan.
///
/// The returned document is opaque to the pipeline and is passed through to
/// callers unchanged.
#[async_trait]
pub trait RefactorAdvisor: Send + Sync {
    /// Returns suggestion data keyed off the scan result.
    async fn suggest(&self, scan: &ScanResult) -> Result<Value>;
}

/// Advisor that never inspects code and returns a fixed-shape document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAdvisor;

#[async_trait]
impl RefactorAdvisor for PlaceholderAdvisor {
    async fn suggest(&self, scan: &ScanResult) -> Result<Value> {
        Ok(json!({
            "provider": "placeholder",
            "summary": format!(
                "{} files scanned; no refactor analysis configured",
                scan.files_scanned
            ),
            "suggestions": [],
        }))
    }
}
