//! Transfer of elements between buffer slots.
//!
//! Moving a value in Rust is a bitwise copy which cannot fail, so relocation
//! and shifting always use the destructive move: the source slots are left
//! logically uninitialized and are never dropped. Duplication through `Clone`
//! only occurs when new elements are constructed from borrowed values, see
//! [`Inserter`](super::insert::Inserter).

use core::mem::needs_drop;
use core::ptr;

/// Move `count` elements from `src` into the uninitialized slots at `dst`.
///
/// # Safety
/// `src` must point to `count` initialized elements and `dst` to `count`
/// writable slots, and the two ranges must not overlap. The source elements
/// must be treated as uninitialized afterwards.
#[inline]
pub(crate) unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    if count > 0 {
        ptr::copy_nonoverlapping(src, dst, count);
    }
}

/// Move the elements in `[index, len)` up by `count` slots, leaving the
/// slots `[index, index + count)` uninitialized.
///
/// # Safety
/// The buffer at `base` must have room for at least `len + count` slots,
/// with `index <= len`.
#[inline]
pub(crate) unsafe fn shift_right<T>(base: *mut T, index: usize, len: usize, count: usize) {
    let tail = len - index;
    if tail > 0 && count > 0 {
        let head = base.add(index);
        // overlapping ranges are copied as if the highest index moved first
        ptr::copy(head, head.add(count), tail);
    }
}

/// Move the elements in `[index + count, len)` down by `count` slots,
/// filling the slots `[index, index + count)`.
///
/// # Safety
/// The slots `[index, index + count)` must not hold live elements, and
/// `index + count <= len` must hold.
#[inline]
pub(crate) unsafe fn shift_left<T>(base: *mut T, index: usize, len: usize, count: usize) {
    let tail = len - index - count;
    if tail > 0 && count > 0 {
        let head = base.add(index);
        ptr::copy(head.add(count), head, tail);
    }
}

/// Drop the `count` elements starting at `base.add(start)`.
///
/// # Safety
/// The slots must hold live elements, which are uninitialized afterwards.
#[inline]
pub(crate) unsafe fn drop_range<T>(base: *mut T, start: usize, count: usize) {
    if needs_drop::<T>() && count > 0 {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use std::string::{String, ToString};

    fn read_all<const N: usize>(buf: &[MaybeUninit<u32>; N], len: usize) -> std::vec::Vec<u32> {
        buf[..len]
            .iter()
            .map(|slot| unsafe { slot.assume_init() })
            .collect()
    }

    #[test]
    fn relocate_moves_values() {
        let src = [
            MaybeUninit::new("a".to_string()),
            MaybeUninit::new("b".to_string()),
        ];
        let mut dst: [MaybeUninit<String>; 4] = unsafe { MaybeUninit::uninit().assume_init() };
        unsafe { relocate(src.as_ptr().cast::<String>(), dst.as_mut_ptr().cast(), 2) };
        let moved: std::vec::Vec<String> = dst[..2]
            .iter()
            .map(|slot| unsafe { slot.assume_init_read() })
            .collect();
        assert_eq!(moved, ["a", "b"]);
    }

    #[test]
    fn shift_right_opens_gap() {
        let mut buf = [MaybeUninit::new(0u32); 6];
        for (idx, slot) in buf.iter_mut().enumerate().take(4) {
            slot.write(idx as u32 + 1);
        }
        unsafe { shift_right(buf.as_mut_ptr().cast::<u32>(), 1, 4, 2) };
        buf[1].write(10);
        buf[2].write(11);
        assert_eq!(read_all(&buf, 6), [1, 10, 11, 2, 3, 4]);
    }

    #[test]
    fn shift_left_closes_gap() {
        let mut buf = [MaybeUninit::new(0u32); 5];
        for (idx, slot) in buf.iter_mut().enumerate() {
            slot.write(idx as u32);
        }
        unsafe { shift_left(buf.as_mut_ptr().cast::<u32>(), 1, 5, 2) };
        assert_eq!(read_all(&buf, 3), [0, 3, 4]);
    }

    #[test]
    fn shift_at_end_is_noop() {
        let mut buf = [MaybeUninit::new(7u32); 3];
        unsafe { shift_right(buf.as_mut_ptr().cast::<u32>(), 2, 2, 1) };
        unsafe { shift_left(buf.as_mut_ptr().cast::<u32>(), 2, 3, 1) };
        assert_eq!(read_all(&buf, 3), [7, 7, 7]);
    }
}
