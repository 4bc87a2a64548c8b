//! Shared application state handed to every handler.

use std::fmt;
use std::sync::Arc;

use auditor_core::Extractor;
use auditor_core::PlaceholderAdvisor;
use auditor_core::RefactorAdvisor;
use auditor_core::ScanAggregator;

use crate::ServerConfig;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Unpacks uploads under the extraction root.
    pub extractor: Extractor,

    /// Walks the extraction root for scans.
    pub aggregator: ScanAggregator,

    /// Produces the `aiSuggestions` document.
    pub advisor: Arc<dyn RefactorAdvisor>,

    max_upload_bytes: usize,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("extractor", &self.extractor)
            .field("aggregator", &self.aggregator)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the default collaborators for `config`.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let auditor = config.auditor_config();
        Self {
            extractor: Extractor::new(&auditor),
            aggregator: ScanAggregator::new(&auditor),
            advisor: Arc::new(PlaceholderAdvisor),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Replaces the refactor advisor.
    #[must_use]
    pub fn with_advisor(mut self, advisor: impl RefactorAdvisor + 'static) -> Self {
        self.advisor = Arc::new(advisor);
        self
    }

    /// Replaces the scan aggregator, e.g. to plug in another issue estimator.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: ScanAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Request body limit in bytes.
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
