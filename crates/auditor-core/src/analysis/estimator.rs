//! Issue count estimation.

use rand::Rng;

use crate::walker::WalkSummary;

/// Exclusive upper bound of [`RandomIssueEstimator`].
pub const RANDOM_ISSUE_UPPER_BOUND: u32 = 50;

/// Produces the `issuesDetected` figure of a scan.
///
/// Implementations receive the totals of the walk so a real analyzer can be
/// substituted without changing the scan result.
pub trait IssueEstimator: Send + Sync {
    /// Returns the number of issues for the scanned tree.
    fn estimate(&self, summary: &WalkSummary) -> u32;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Placeholder estimator: a uniform draw from `[0, 50)`, independent of the
/// tree contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIssueEstimator;

impl IssueEstimator for RandomIssueEstimator {
    fn estimate(&self, _summary: &WalkSummary) -> u32 {
        rand::rng().random_range(0..RANDOM_ISSUE_UPPER_BOUND)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
