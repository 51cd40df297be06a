use core::mem;
use core::ptr;

use super::transfer::{drop_range, shift_left, shift_right};

/// Construct new elements into a gap opened within a buffer.
///
/// Creating an inserter moves the tail of the buffer past the gap and
/// truncates the owning length to the gap's start. `complete` commits the
/// constructed elements, closing any unused part of the gap. If the inserter
/// is dropped instead (for instance when a `Clone` implementation panics),
/// the constructed elements are dropped and the tail is moved back, leaving
/// the collection as it was before the insertion.
pub(crate) struct Inserter<'a, T> {
    data: *mut T,
    len: &'a mut usize,
    start: usize,
    pos: usize,
    end: usize,
    tail: usize,
}

impl<'a, T> Inserter<'a, T> {
    /// # Safety
    /// `data` must point to a buffer holding `*len` live elements with room
    /// for at least `*len + count` slots, and `index <= *len`.
    #[inline]
    pub unsafe fn new(data: *mut T, len: &'a mut usize, index: usize, count: usize) -> Self {
        let prev_len = *len;
        debug_assert!(index <= prev_len);
        shift_right(data, index, prev_len, count);
        *len = index;
        Self {
            data,
            len,
            start: index,
            pos: index,
            end: index + count,
            tail: prev_len - index,
        }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        assert!(self.pos < self.end);
        unsafe { self.data.add(self.pos).write(val) };
        self.pos += 1;
    }

    #[inline]
    pub fn push_iter(&mut self, iter: &mut impl Iterator<Item = T>) {
        while self.pos < self.end {
            if let Some(item) = iter.next() {
                unsafe { self.data.add(self.pos).write(item) };
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    #[inline]
    pub fn push_repeat(&mut self, val: &T, count: usize)
    where
        T: Clone,
    {
        assert!(self.end - self.pos >= count);
        for _ in 0..count {
            unsafe { self.data.add(self.pos).write(val.clone()) };
            self.pos += 1;
        }
    }

    #[inline]
    pub fn push_slice(&mut self, data: &[T])
    where
        T: Clone,
    {
        assert!(self.end - self.pos >= data.len());
        for item in data {
            unsafe { self.data.add(self.pos).write(item.clone()) };
            self.pos += 1;
        }
    }

    #[inline]
    pub const fn full(&self) -> bool {
        self.pos == self.end
    }

    /// Commit the inserted elements, returning the number inserted.
    #[inline]
    pub fn complete(self) -> usize {
        let count = self.pos - self.start;
        let new_len = self.pos + self.tail;
        if self.pos < self.end {
            unsafe { shift_left(self.data, self.pos, self.end + self.tail, self.end - self.pos) };
        }
        *self.len = new_len;
        mem::forget(self);
        count
    }
}

impl<T> Drop for Inserter<'_, T> {
    fn drop(&mut self) {
        let count = self.pos - self.start;
        unsafe {
            drop_range(self.data, self.start, count);
            if self.tail > 0 {
                ptr::copy(self.data.add(self.end), self.data.add(self.start), self.tail);
            }
        }
        *self.len = self.start + self.tail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn init_buf(values: &[u32]) -> [MaybeUninit<u32>; 8] {
        let mut buf = [MaybeUninit::new(0u32); 8];
        for (slot, val) in buf.iter_mut().zip(values) {
            slot.write(*val);
        }
        buf
    }

    fn contents(buf: &[MaybeUninit<u32>; 8], len: usize) -> std::vec::Vec<u32> {
        buf[..len]
            .iter()
            .map(|slot| unsafe { slot.assume_init() })
            .collect()
    }

    #[test]
    fn insert_into_middle() {
        let mut buf = init_buf(&[1, 2, 3]);
        let mut len = 3;
        let mut ins = unsafe { Inserter::new(buf.as_mut_ptr().cast(), &mut len, 1, 2) };
        ins.push(7);
        ins.push(8);
        assert!(ins.full());
        assert_eq!(ins.complete(), 2);
        assert_eq!(len, 5);
        assert_eq!(contents(&buf, len), [1, 7, 8, 2, 3]);
    }

    #[test]
    fn insert_short_closes_gap() {
        let mut buf = init_buf(&[1, 2, 3]);
        let mut len = 3;
        let mut ins = unsafe { Inserter::new(buf.as_mut_ptr().cast(), &mut len, 0, 4) };
        ins.push_iter(&mut [5, 6].into_iter());
        assert!(!ins.full());
        assert_eq!(ins.complete(), 2);
        assert_eq!(len, 5);
        assert_eq!(contents(&buf, len), [5, 6, 1, 2, 3]);
    }

    #[test]
    fn insert_abandoned_restores() {
        let mut buf = init_buf(&[1, 2, 3]);
        let mut len = 3;
        let mut ins = unsafe { Inserter::new(buf.as_mut_ptr().cast(), &mut len, 1, 3) };
        ins.push_repeat(&9, 2);
        drop(ins);
        assert_eq!(len, 3);
        assert_eq!(contents(&buf, len), [1, 2, 3]);
    }

    #[test]
    fn insert_panic_drops_constructed() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let mut buf: [MaybeUninit<Rc<()>>; 4] = unsafe { MaybeUninit::uninit().assume_init() };
        buf[0].write(marker.clone());
        let mut len = 1;
        let res = catch_unwind(AssertUnwindSafe(|| {
            let mut ins = unsafe { Inserter::new(buf.as_mut_ptr().cast(), &mut len, 0, 3) };
            ins.push(marker.clone());
            ins.push(marker.clone());
            panic!("failed to construct element");
        }));
        assert!(res.is_err());
        assert_eq!(len, 1);
        assert_eq!(Rc::strong_count(&marker), 2);
        unsafe { buf[0].assume_init_drop() };
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
