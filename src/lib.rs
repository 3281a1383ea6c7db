//! # chainset
//!
//! A configurable set container backed by an unordered singly-linked
//! member chain, with explicit ownership of every stored element.
//!
//! ## Overview
//!
//! This library provides one container, [`ChainSet`], built around ideas
//! the standard collections do not cover:
//!
//! - **Behavior Bundles**: each set carries an [`ElementOps`] bundle holding
//!   its matcher (membership), optional copier (duplication), and optional
//!   releaser (teardown), so element semantics are per-set values rather
//!   than trait bounds.
//! - **Ownership Discipline**: `insert` takes payloads by value, `remove`
//!   and `pop_first` hand ownership back untouched, and whole-set teardown
//!   runs the releaser over every remaining payload.
//! - **Set Algebra**: union, intersection, difference, subset, equality,
//!   and duplication over any number of operand sets, with all-or-nothing
//!   failure semantics.
//! - **Deterministic Order**: traversal always follows insertion order, and
//!   derived sets keep the first occurrence of each element.
//!
//! ## Example
//!
//! ```rust
//! use chainset::{ChainSet, Insertion};
//!
//! let mut set: ChainSet<i32> = ChainSet::standard();
//! assert!(set.insert(1).is_inserted());
//! assert!(set.insert(4).is_inserted());
//! assert_eq!(set.insert(1), Insertion::Duplicate(1));
//!
//! let elements: Vec<i32> = set.iter().copied().collect();
//! assert_eq!(elements, vec![1, 4]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use chainset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chain_set::{ChainSet, Insertion};
    pub use crate::error::SetError;
    pub use crate::ops::ElementOps;
}

pub mod chain_set;
pub mod error;
pub mod ops;

mod algebra;

pub use chain_set::{ChainSet, ChainSetIntoIterator, ChainSetIterator, Insertion};
pub use error::SetError;
pub use ops::ElementOps;
