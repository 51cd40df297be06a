#![cfg(all(feature = "alloc", feature = "zeroize"))]

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::NonNull;
use core::slice;

use growvec::{
    storage::{Global, RawAlloc, ZeroizingAlloc},
    vec::ZeroizingVec,
    StorageError, Vector,
};
use zeroize::Zeroize;

/// Records a copy of every block of memory as it is released.
#[derive(Debug)]
struct TestAlloc<A: RawAlloc> {
    alloc: A,
    released: RefCell<Vec<Vec<u8>>>,
}

impl<A: RawAlloc> TestAlloc<A> {
    fn new(alloc: A) -> Self {
        Self {
            alloc,
            released: RefCell::new(Vec::new()),
        }
    }

    fn released(&self) -> Vec<Vec<u8>> {
        self.released.borrow().clone()
    }
}

impl<A: RawAlloc> RawAlloc for TestAlloc<A> {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.alloc.try_alloc(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        let cp = Vec::from(unsafe { slice::from_raw_parts(ptr.as_ptr(), layout.size()) });
        self.released.borrow_mut().push(cp);
        self.alloc.release(ptr, layout)
    }
}

#[test]
fn test_alloc_log() {
    // check functioning of alloc log
    let alloc = TestAlloc::new(Global);
    let mut v = Vector::with_capacity_in(1, &alloc);
    v.push(99u32);
    drop(v);
    assert_eq!(alloc.released(), &[99u32.to_ne_bytes()]);
}

#[test]
fn vec_zeroize_on_drop() {
    let alloc = TestAlloc::new(Global);
    let mut v = Vector::with_capacity_in(2, ZeroizingAlloc(&alloc));
    v.extend([1u16, 2]);
    drop(v);
    assert_eq!(alloc.released(), &[[0u8; 4]]);
}

#[test]
fn vec_zeroize_on_growth() {
    let alloc = TestAlloc::new(Global);
    let mut v = Vector::new_in(ZeroizingAlloc(&alloc));
    v.extend([1u8, 2, 3, 4]);
    assert!(alloc.released().is_empty());
    v.push(5);
    // the abandoned buffer is wiped before it is released
    assert_eq!(alloc.released(), &[[0u8; 4]]);
    assert_eq!(v, [1, 2, 3, 4, 5]);
    v.shrink_to_fit();
    assert_eq!(alloc.released(), &[vec![0u8; 4], vec![0u8; 8]]);
}

#[test]
fn vec_zeroize_explicit() {
    let alloc = TestAlloc::new(Global);
    let mut v = Vector::new_in(ZeroizingAlloc(&alloc));
    v.extend([7u8, 7, 7]);
    v.zeroize();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 0);
    assert_eq!(alloc.released(), &[[0u8; 4]]);
}

#[test]
fn vec_zeroizing_alias() {
    let mut v = ZeroizingVec::new();
    v.extend([1usize, 2, 3]);
    assert_eq!(v, [1, 2, 3]);
}
