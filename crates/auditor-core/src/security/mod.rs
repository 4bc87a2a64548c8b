//! Extraction safety checks.

pub mod quota;

pub use quota::QuotaTracker;
