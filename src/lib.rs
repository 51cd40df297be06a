//! Growable contiguous vectors with pluggable allocators and growth policies.
//!
//! [`Vector`] keeps its elements in a single buffer, reallocating through a
//! [`RawAlloc`](storage::RawAlloc) implementation as it grows. Growing
//! operations have fallible `try_` variants which report allocation failure
//! as a [`StorageError`] rather than aborting.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;

pub mod capacity;

pub(crate) mod error;

pub mod storage;

pub mod vec;

pub use {
    self::error::{OutOfRange, StorageError, UpdateError},
    self::storage::Global,
    self::vec::Vector,
};
