//! Stateless utility modules.
//!
//! # Modules
//!
//! - [`ci`]: Continuous-integration environment detection
//! - [`deferred`]: Futures settled from outside
//! - [`errno`]: Errno-style error classification
//! - [`keys`]: Key-set extraction and disjointness checks
//! - [`select`]: Partitioning object properties into buckets

pub mod ci;
pub mod deferred;
pub mod errno;
pub mod keys;
pub mod select;
