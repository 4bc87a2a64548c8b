//! `GET /`

/// Plain-text liveness banner.
pub const BANNER: &str = "Code auditor backend running";

/// Returns the banner.
pub async fn banner() -> &'static str {
    BANNER
}
