//! Request handlers.

pub mod health;
pub mod scan;
pub mod upload;
