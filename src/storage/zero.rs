use core::alloc::Layout;
use core::ptr::NonNull;
use core::slice;

use const_default::ConstDefault;
use zeroize::Zeroize;

use crate::error::StorageError;

use super::alloc::RawAlloc;

/// An allocator wrapper which zeroizes every block of memory before it is
/// released to the inner allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZeroizingAlloc<A>(pub A);

impl<A: ConstDefault> ConstDefault for ZeroizingAlloc<A> {
    const DEFAULT: Self = ZeroizingAlloc(A::DEFAULT);
}

impl<A: RawAlloc> RawAlloc for ZeroizingAlloc<A> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0.try_alloc(layout)
    }

    // Growing a collection always moves its contents into a new block and
    // releases the old one, so every abandoned block passes through here.
    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            let mem = slice::from_raw_parts_mut(ptr.as_ptr(), layout.size());
            mem.zeroize();
        }
        self.0.release(ptr, layout)
    }
}
