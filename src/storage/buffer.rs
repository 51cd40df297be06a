use core::fmt;
use core::marker::PhantomData;
use core::mem::{size_of, ManuallyDrop};
use core::ptr::{self, NonNull};

use log::debug;

use crate::error::StorageError;

use super::alloc::RawAlloc;
use super::utils::array_layout;

/// An owned allocation of `capacity` slots of type `T`.
///
/// The buffer tracks no initialization state: dropping it releases the
/// allocation without dropping any elements. Buffers for zero-sized types,
/// or with zero capacity, hold a dangling pointer and never allocate.
pub struct RawBuffer<T, A: RawAlloc> {
    data: NonNull<T>,
    capacity: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T, A: RawAlloc> RawBuffer<T, A> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// Create an empty buffer without allocating.
    #[inline]
    pub const fn dangling(alloc: A) -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: if Self::IS_ZST { usize::MAX } else { 0 },
            alloc,
            _marker: PhantomData,
        }
    }

    /// Allocate a buffer for `capacity` slots within `alloc`.
    pub fn allocate(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        let mut buf = Self::dangling(alloc);
        if !Self::IS_ZST && capacity > 0 {
            buf.data = buf.alloc_slots(capacity)?;
            buf.capacity = capacity;
        }
        Ok(buf)
    }

    /// Adopt an existing allocation of `capacity` slots.
    ///
    /// # Safety
    /// Unless `capacity` is zero or `T` is zero-sized, `data` must have been
    /// allocated by `alloc` using the array layout for `capacity` elements.
    #[inline]
    pub unsafe fn from_raw_parts(data: NonNull<T>, capacity: usize, alloc: A) -> Self {
        let mut buf = Self::dangling(alloc);
        if !Self::IS_ZST && capacity > 0 {
            buf.data = data;
            buf.capacity = capacity;
        }
        buf
    }

    /// Release ownership of the allocation.
    #[inline]
    pub fn into_raw_parts(self) -> (NonNull<T>, usize, A) {
        let parts = ManuallyDrop::new(self);
        let alloc = unsafe { ptr::read(&parts.alloc) };
        (parts.data, parts.capacity, alloc)
    }

    /// The number of slots available in this buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Access the allocator instance.
    #[inline]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub const fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline]
    fn is_allocated(&self) -> bool {
        !Self::IS_ZST && self.capacity > 0
    }

    /// Allocate a new block of `capacity` slots from this buffer's allocator,
    /// without affecting the current allocation.
    pub fn alloc_slots(&self, capacity: usize) -> Result<NonNull<T>, StorageError> {
        if Self::IS_ZST || capacity == 0 {
            return Ok(NonNull::dangling());
        }
        let layout = array_layout::<T>(capacity)?;
        match self.alloc.try_alloc(layout) {
            Ok(ptr) => Ok(ptr.cast()),
            Err(err) => {
                debug!(
                    "Failed to allocate {} slots ({} bytes)",
                    capacity,
                    layout.size()
                );
                Err(err)
            }
        }
    }

    /// Replace the current allocation with a block produced by `alloc_slots`,
    /// releasing the previous allocation.
    ///
    /// # Safety
    /// `data` must have been returned by `alloc_slots(capacity)` on this buffer
    /// and must not be owned by any other buffer. Any live elements in the
    /// previous allocation must already have been moved out or dropped.
    pub unsafe fn replace(&mut self, data: NonNull<T>, capacity: usize) {
        self.release();
        if Self::IS_ZST {
            return;
        }
        self.data = if capacity == 0 {
            NonNull::dangling()
        } else {
            data
        };
        self.capacity = capacity;
    }

    fn release(&mut self) {
        if self.is_allocated() {
            // the layout was validated when the buffer was allocated
            if let Ok(layout) = array_layout::<T>(self.capacity) {
                unsafe { self.alloc.release(self.data.cast(), layout) };
            }
            self.data = NonNull::dangling();
            self.capacity = 0;
        }
    }
}

impl<T, A: RawAlloc> fmt::Debug for RawBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("data", &self.data)
            .field("capacity", &self.capacity)
            .field("alloc", &self.alloc)
            .finish()
    }
}

impl<T, A: RawAlloc> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

// The buffer uniquely owns its allocation.
unsafe impl<T: Send, A: RawAlloc + Send> Send for RawBuffer<T, A> {}

unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RawBuffer<T, A> {}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use crate::storage::{Global, Limited};

    #[test]
    fn dangling_has_no_capacity() {
        let buf = RawBuffer::<u32, _>::dangling(Global);
        assert_eq!(buf.capacity(), 0);
        let buf = RawBuffer::<(), _>::dangling(Global);
        assert_eq!(buf.capacity(), usize::MAX);
    }

    #[test]
    fn allocate_and_release() {
        let alloc = Limited::new(64);
        {
            let buf = RawBuffer::<u64, _>::allocate(4, &alloc).expect("allocation failed");
            assert_eq!(buf.capacity(), 4);
            assert_eq!(alloc.remaining(), 32);
        }
        assert_eq!(alloc.remaining(), 64);
    }

    #[test]
    fn allocate_failure() {
        let alloc = Limited::new(8);
        let err = RawBuffer::<u64, _>::allocate(2, &alloc).expect_err("expected failure");
        assert!(matches!(err, StorageError::AllocError(_)));
        assert_eq!(alloc.remaining(), 8);
    }

    #[test]
    fn replace_releases_previous() {
        let alloc = Limited::new(64);
        let mut buf = RawBuffer::<u32, _>::allocate(4, &alloc).expect("allocation failed");
        assert_eq!(alloc.remaining(), 48);
        let data = buf.alloc_slots(8).expect("allocation failed");
        assert_eq!(alloc.remaining(), 16);
        unsafe { buf.replace(data, 8) };
        assert_eq!(buf.capacity(), 8);
        assert_eq!(alloc.remaining(), 32);
        unsafe { buf.replace(NonNull::dangling(), 0) };
        assert_eq!(buf.capacity(), 0);
        assert_eq!(alloc.remaining(), 64);
    }
}
