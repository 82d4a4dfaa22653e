//! # Engine Module
//!
//! The combinatorial layer of mol2swap. It turns one atom table into a
//! deterministic sequence of substituted variants.
//!
//! - [`variants`] - Lazy, restartable enumeration of substitution variants, with an
//!   order-preserving parallel builder
//! - [`config`] - Validated parameters for a substitution run
//! - [`progress`] - Callback-based progress reporting
//! - [`error`] - The aggregate error type returned by workflows

pub mod config;
pub mod error;
pub mod progress;
pub mod variants;
