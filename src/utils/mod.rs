//! Shared utilities.
//!
//! - [`errors`]: the pipeline's terminal error type and its HTTP response

pub mod errors;
