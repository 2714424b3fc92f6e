//! Grabbag — small stateless utilities.
//!
//! This crate collects helpers that do not warrant a crate of their own.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Errno checks, CI detection, deferred futures, key sets,
//!   and property partitioning

#![doc = include_str!("../README.md")]

pub mod error;
pub mod util;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

pub use util::ci::{CiOverrides, is_continuous_integration};
pub use util::deferred::{DeferredError, DeferredFuture, Resolver, create_deferred};
pub use util::errno::{ErrnoCode, ErrnoError, is_errno_like, matches_code, matches_code_value};
pub use util::keys::{KeyCollection, assert_disjoint, assert_disjoint_values, key_set_of};
pub use util::select::{Object, Selector, select, select_values};
