use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;

#[cfg(feature = "alloc")]
use alloc_crate::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};
use const_default::ConstDefault;

use crate::error::StorageError;

#[cfg(all(not(test), feature = "alloc"))]
pub use alloc_crate::alloc::handle_alloc_error;

#[cfg(any(test, not(feature = "alloc")))]
/// Custom allocation error handler.
pub fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size());
}

/// A source of raw memory for collection buffers.
///
/// Every successful call to `try_alloc` must eventually be matched by exactly
/// one call to `release` with the same layout.
pub trait RawAlloc: fmt::Debug {
    /// Try to allocate a block of memory fitting `layout`. The contents of
    /// the returned memory are uninitialized.
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError>;

    /// Release a block of memory produced by this allocator.
    ///
    /// # Safety
    /// The value `ptr` must represent an allocation produced by this allocator
    /// with the same `layout`, and must not have been released already.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        (**self).try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }
}

#[inline]
pub(crate) fn layout_dangling(layout: Layout) -> NonNull<u8> {
    // SAFETY: layout alignments are guaranteed to be non-zero.
    unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
}

/// The global memory allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Global;

impl ConstDefault for Global {
    const DEFAULT: Self = Global;
}

#[cfg(feature = "alloc")]
impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        let ptr = if layout.size() == 0 {
            layout_dangling(layout)
        } else {
            let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
                return Err(StorageError::AllocError(layout));
            };
            ptr
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            raw_dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[cfg(not(feature = "alloc"))]
// Without a global allocator only zero-sized requests may be satisfied.
impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        if layout.size() == 0 {
            Ok(NonNull::slice_from_raw_parts(layout_dangling(layout), 0))
        } else {
            Err(StorageError::AllocError(layout))
        }
    }

    #[inline]
    unsafe fn release(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

/// An allocator which enforces a budget of allocated bytes on top of
/// another allocator. Requests exceeding the remaining budget fail with
/// [`StorageError::AllocError`].
///
/// The budget is tracked without synchronization; share an instance between
/// collections by reference.
pub struct Limited<A: RawAlloc = Global> {
    alloc: A,
    remain: Cell<usize>,
}

impl Limited<Global> {
    /// Create a new budgeted allocator on top of the global allocator.
    pub const fn new(limit: usize) -> Self {
        Self::new_in(limit, Global)
    }
}

impl<A: RawAlloc> Limited<A> {
    /// Create a new budgeted allocator on top of `alloc`.
    pub const fn new_in(limit: usize, alloc: A) -> Self {
        Self {
            alloc,
            remain: Cell::new(limit),
        }
    }

    /// The number of bytes which may still be allocated.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remain.get()
    }
}

impl<A: RawAlloc> fmt::Debug for Limited<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Limited")
            .field("alloc", &self.alloc)
            .field("remain", &self.remain.get())
            .finish()
    }
}

impl<A: RawAlloc> RawAlloc for Limited<A> {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        let remain = self.remain.get();
        if layout.size() > remain {
            return Err(StorageError::AllocError(layout));
        }
        let ptr = self.alloc.try_alloc(layout)?;
        self.remain.set(remain - layout.size());
        Ok(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.alloc.release(ptr, layout);
        self.remain.set(self.remain.get() + layout.size());
    }
}

/// Adapter for allocators implementing the `allocator-api2` `Allocator` trait.
#[cfg(feature = "allocator-api2")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApiAlloc<A>(pub A);

#[cfg(feature = "allocator-api2")]
impl<A> RawAlloc for ApiAlloc<A>
where
    A: allocator_api2::alloc::Allocator + fmt::Debug,
{
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0
            .allocate(layout)
            .map_err(|_| StorageError::AllocError(layout))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.0.deallocate(ptr, layout)
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;

    #[test]
    fn limited_tracks_budget() {
        let alloc = Limited::new(16);
        let layout = Layout::new::<[u32; 3]>();
        let ptr = alloc.try_alloc(layout).expect("allocation failed");
        assert_eq!(alloc.remaining(), 4);
        assert_eq!(
            alloc.try_alloc(layout),
            Err(StorageError::AllocError(layout))
        );
        unsafe { alloc.release(ptr.cast(), layout) };
        assert_eq!(alloc.remaining(), 16);
    }

    #[test]
    fn global_zero_size() {
        let layout = Layout::new::<[u64; 0]>();
        let ptr = Global.try_alloc(layout).expect("allocation failed");
        assert_eq!(ptr.len(), 0);
        assert_eq!(ptr.cast::<u8>(), layout_dangling(layout));
        unsafe { Global.release(ptr.cast(), layout) };
    }
}
