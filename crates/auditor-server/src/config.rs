//! Deployment configuration for the HTTP service.

use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::path::PathBuf;

use auditor_core::AuditorConfig;
use auditor_core::ExtractionConfig;
use auditor_core::WalkConfig;
use auditor_core::config::DEFAULT_EXTRACT_DIR;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Largest accepted request body, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (all interfaces).
    pub port: u16,

    /// Root directory for extracted repositories.
    pub extract_dir: PathBuf,

    /// Request body limit applied to every route.
    pub max_upload_bytes: usize,

    /// Containment and quotas applied to every upload.
    pub extraction: ExtractionConfig,

    /// Budget for every scan walk.
    pub walk: WalkConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            extract_dir: PathBuf::from(DEFAULT_EXTRACT_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extraction: ExtractionConfig::default(),
            walk: WalkConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Sets the listening port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the extraction root.
    #[must_use]
    pub fn with_extract_dir(mut self, extract_dir: impl Into<PathBuf>) -> Self {
        self.extract_dir = extract_dir.into();
        self
    }

    /// Sets the request body limit.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// Sets the extraction quotas.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets the walk budget.
    #[must_use]
    pub fn with_walk(mut self, walk: WalkConfig) -> Self {
        self.walk = walk;
        self
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Pipeline configuration rooted at [`ServerConfig::extract_dir`].
    #[must_use]
    pub fn auditor_config(&self) -> AuditorConfig {
        AuditorConfig::new(&self.extract_dir)
            .with_extraction(self.extraction.clone())
            .with_walk(self.walk.clone())
    }
}
