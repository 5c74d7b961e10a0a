//! CLI command implementations.

pub mod marks;
pub mod replay;
