//! Static analysis: walk a target, estimate issues, package the result.

mod aggregator;
mod estimator;

pub use aggregator::ScanAggregator;
pub use aggregator::ScanResult;
pub use aggregator::ScanTarget;
pub use estimator::IssueEstimator;
pub use estimator::RANDOM_ISSUE_UPPER_BOUND;
pub use estimator::RandomIssueEstimator;
