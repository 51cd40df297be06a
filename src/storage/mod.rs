//! Backing storage for collections.

mod alloc;
mod buffer;
pub(crate) mod utils;

#[cfg(feature = "zeroize")]
mod zero;

pub use self::{
    alloc::{handle_alloc_error, Global, Limited, RawAlloc},
    buffer::RawBuffer,
};

#[cfg(feature = "allocator-api2")]
pub use self::alloc::ApiAlloc;

#[cfg(feature = "zeroize")]
pub use self::zero::ZeroizingAlloc;
