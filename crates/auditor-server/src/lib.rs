//! HTTP surface for the repository audit pipeline.
//!
//! Exposes upload and scan endpoints over [`auditor_core`]:
//!
//! - `GET /` liveness banner
//! - `POST /api/repo/upload` multipart field `repo`, extracted under the
//!   configured root
//! - `POST /api/scan/start` walks the root (or one repository) and attaches
//!   refactor suggestions

pub mod config;
pub mod http;
pub mod telemetry;

pub use config::ServerConfig;
pub use http::AppState;
pub use http::router;
pub use http::serve;
