//! Validated path types for the ingestion pipeline.
//!
//! Each type is validated on construction; raw strings and paths only become
//! filesystem destinations after passing through one of these constructors.

pub mod entry_path;
pub mod extraction_root;
pub mod repo_name;

pub use entry_path::EntryPath;
pub use extraction_root::ExtractionRoot;
pub use repo_name::RepoName;
