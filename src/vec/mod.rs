//! A growable contiguous sequence container.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Range, RangeBounds};
use core::ptr;
use core::slice;

use const_default::ConstDefault;
use log::trace;

use crate::capacity::{prefer_capacity, Grow};
use crate::error::{OutOfRange, StorageError, UpdateError};
use crate::storage::{Global, RawBuffer};

use self::insert::Inserter;

pub use self::{
    config::{Custom, VecConfig, VecNewIn},
    into_iter::IntoIter,
};

pub mod config;

#[macro_use]
mod macros;

pub(crate) mod insert;
mod into_iter;
pub(crate) mod transfer;

#[cfg(feature = "zeroize")]
/// A `Vector` which zeroizes every buffer it releases, including on drop.
pub type ZeroizingVec<T> = Vector<T, crate::storage::ZeroizingAlloc<Global>>;

#[cold]
#[inline(never)]
pub(super) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.saturating_add(1),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.saturating_add(1),
        Bound::Excluded(i) => *i,
    };
    Range { start, end }
}

#[cfg(feature = "alloc")]
#[inline]
/// Create a `Vector<T>` from an array `[T; N]`.
pub fn from_array<T, const N: usize>(data: [T; N]) -> Vector<T> {
    from_array_in(data, Global)
}

#[inline]
/// Create a `Vector<T, C>` from an array `[T; N]` and an instance of `VecNewIn`.
///
/// The resulting vector has a capacity of exactly `N`.
pub fn from_array_in<T, A, const N: usize>(data: [T; N], alloc_in: A) -> Vector<T, A::Config>
where
    A: VecNewIn,
{
    let mut v = Vector::with_capacity_in(N, alloc_in);
    v.extend(data);
    v
}

#[cfg(feature = "alloc")]
#[inline]
/// Create a `Vector<T>` holding `count` clones of `elem`.
pub fn from_elem<T: Clone>(elem: T, count: usize) -> Vector<T> {
    from_elem_in(elem, count, Global)
}

#[inline]
/// Create a `Vector<T, C>` holding `count` clones of `elem`, given an instance
/// of `VecNewIn`.
pub fn from_elem_in<T, A>(elem: T, count: usize, alloc_in: A) -> Vector<T, A::Config>
where
    T: Clone,
    A: VecNewIn,
{
    Vector::from_elem_in(elem, count, alloc_in)
}

/// A contiguous, growable sequence of elements of type `T`.
///
/// Elements are stored in a single buffer obtained from the allocator selected
/// by the configuration `C`. When an operation needs more room than the
/// current capacity, a new buffer is sized by the configured [`Grow`] policy,
/// the existing elements are moved into it, and the old buffer is released.
/// Any such reallocation invalidates pointers and references to elements.
///
/// Fallible `try_` variants of the growing operations report allocation
/// failure instead of panicking, and leave the vector unchanged when they do.
pub struct Vector<T, C: VecConfig = Global> {
    buffer: RawBuffer<T, C::Alloc>,
    len: usize,
}

impl<T, C: VecConfig> Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    /// Constructs a new, empty `Vector<T, C>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use growvec::Vector;
    ///
    /// let mut vec: Vector<i32> = Vector::new();
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::dangling(<C::Alloc as ConstDefault>::DEFAULT),
            len: 0,
        }
    }

    /// Constructs an empty vector with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Self::try_with_capacity_alloc(capacity, C::Alloc::DEFAULT)
    }

    /// Constructs a vector holding `count` clones of `elem`.
    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem(elem, count) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_elem(elem: T, count: usize) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_elem_alloc(elem, count, C::Alloc::DEFAULT)
    }

    /// Constructs a vector holding clones of the elements of `data`.
    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice(data) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_slice_alloc(data, C::Alloc::DEFAULT)
    }
}

impl<T, C: VecConfig> Vector<T, C> {
    /// Constructs a new, empty vector owning the allocator provided by `alloc_in`.
    ///
    /// ```
    /// use growvec::{storage::Limited, Vector};
    ///
    /// let alloc = Limited::new(16);
    /// let mut vec = Vector::new_in(&alloc);
    /// vec.push(1u16);
    /// assert_eq!(alloc.remaining(), 8);
    /// ```
    pub fn new_in<A>(alloc_in: A) -> Self
    where
        A: VecNewIn<Config = C>,
    {
        Self::from_alloc(alloc_in.into_alloc())
    }

    pub fn with_capacity_in<A>(capacity: usize, alloc_in: A) -> Self
    where
        A: VecNewIn<Config = C>,
    {
        match Self::try_with_capacity_in(capacity, alloc_in) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_with_capacity_in<A>(capacity: usize, alloc_in: A) -> Result<Self, StorageError>
    where
        A: VecNewIn<Config = C>,
    {
        Self::try_with_capacity_alloc(capacity, alloc_in.into_alloc())
    }

    pub fn from_elem_in<A>(elem: T, count: usize, alloc_in: A) -> Self
    where
        T: Clone,
        A: VecNewIn<Config = C>,
    {
        match Self::try_from_elem_in(elem, count, alloc_in) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_elem_in<A>(elem: T, count: usize, alloc_in: A) -> Result<Self, StorageError>
    where
        T: Clone,
        A: VecNewIn<Config = C>,
    {
        Self::try_from_elem_alloc(elem, count, alloc_in.into_alloc())
    }

    pub fn from_slice_in<A>(data: &[T], alloc_in: A) -> Self
    where
        T: Clone,
        A: VecNewIn<Config = C>,
    {
        match Self::try_from_slice_in(data, alloc_in) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice_in<A>(data: &[T], alloc_in: A) -> Result<Self, StorageError>
    where
        T: Clone,
        A: VecNewIn<Config = C>,
    {
        Self::try_from_slice_alloc(data, alloc_in.into_alloc())
    }

    /// Collect the items of an iterator into a new vector owning the
    /// allocator provided by `alloc_in`.
    pub fn from_iter_in<I, A>(iter: I, alloc_in: A) -> Self
    where
        I: IntoIterator<Item = T>,
        A: VecNewIn<Config = C>,
    {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Self::with_capacity_in(min_cap, alloc_in);
        vec.extend(iter);
        vec
    }

    #[inline]
    const fn from_alloc(alloc: C::Alloc) -> Self {
        Self {
            buffer: RawBuffer::dangling(alloc),
            len: 0,
        }
    }

    fn try_with_capacity_alloc(capacity: usize, alloc: C::Alloc) -> Result<Self, StorageError> {
        Ok(Self {
            buffer: RawBuffer::allocate(capacity, alloc)?,
            len: 0,
        })
    }

    fn try_from_elem_alloc(elem: T, count: usize, alloc: C::Alloc) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_alloc(count, alloc)?;
        if count > 0 {
            let data = vec.buffer.data_ptr_mut();
            let mut ins = unsafe { Inserter::new(data, &mut vec.len, 0, count) };
            ins.push_repeat(&elem, count);
            ins.complete();
        }
        Ok(vec)
    }

    fn try_from_slice_alloc(data: &[T], alloc: C::Alloc) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_alloc(data.len(), alloc)?;
        if !data.is_empty() {
            let buf = vec.buffer.data_ptr_mut();
            let mut ins = unsafe { Inserter::new(buf, &mut vec.len, 0, data.len()) };
            ins.push_slice(data);
            ins.complete();
        }
        Ok(vec)
    }
}

impl<T, C: VecConfig> Vector<T, C> {
    /// Get a reference to the allocator owned by this vector.
    #[inline]
    pub fn allocator(&self) -> &C::Alloc {
        self.buffer.allocator()
    }

    /// Get a pointer to the first element slot.
    ///
    /// The pointer is dangling, though non-null and aligned, when the vector
    /// has never allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data_ptr_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buffer.data_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buffer.data_ptr_mut(), self.len) }
    }

    /// The number of element slots in the current buffer. Always at least
    /// `len()`, and `usize::MAX` for zero-sized types.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Access the element at `index`, or report an [`OutOfRange`] error.
    ///
    /// ```
    /// use growvec::{vector, OutOfRange};
    ///
    /// let v = vector![1, 2, 3];
    /// assert_eq!(v.at(2), Ok(&3));
    /// assert_eq!(v.at(3), Err(OutOfRange { index: 3, len: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        self.as_slice().get(index).ok_or(OutOfRange {
            index,
            len: self.len,
        })
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    /// Access the first element.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[inline]
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(item) => item,
            None => index_panic(),
        }
    }

    #[inline]
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(item) => item,
            None => index_panic(),
        }
    }

    /// Access the last element.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[inline]
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(item) => item,
            None => index_panic(),
        }
    }

    #[inline]
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(item) => item,
            None => index_panic(),
        }
    }

    /// Ensure room for `need` more elements than are currently stored,
    /// reallocating according to the growth policy.
    fn try_grow_for(&mut self, need: usize) -> Result<(), StorageError> {
        let capacity = self.buffer.capacity();
        let Some(minimum) = self.len.checked_add(need) else {
            return Err(StorageError::CapacityLimit);
        };
        if minimum <= capacity {
            return Ok(());
        }
        self.try_reallocate(<C::Grow as Grow>::next_capacity::<T>(capacity, minimum))
    }

    /// Move the elements into a new buffer of `capacity` slots. The current
    /// buffer is left untouched if the allocation fails.
    fn try_reallocate(&mut self, capacity: usize) -> Result<(), StorageError> {
        debug_assert!(capacity >= self.len);
        let data = self.buffer.alloc_slots(capacity)?;
        trace!(
            "Reallocating vector buffer: capacity {} -> {}, length {}",
            self.buffer.capacity(),
            capacity,
            self.len
        );
        unsafe {
            transfer::relocate(self.buffer.data_ptr(), data.as_ptr(), self.len);
            self.buffer.replace(data, capacity);
        }
        Ok(())
    }

    /// Ensure the capacity is at least `capacity` elements.
    ///
    /// When the buffer must grow, the new capacity is the larger of the
    /// request and twice the current capacity. Nothing happens when the
    /// capacity is already sufficient.
    ///
    /// ```
    /// use growvec::vector;
    ///
    /// let mut v = vector![1u8, 2, 3];
    /// v.reserve(7);
    /// assert_eq!(v.capacity(), 7);
    /// v.reserve(8);
    /// assert_eq!(v.capacity(), 14);
    /// v.reserve(2);
    /// assert_eq!(v.capacity(), 14);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        match self.try_reserve(capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), StorageError> {
        let current = self.buffer.capacity();
        if capacity <= current {
            return Ok(());
        }
        self.try_reallocate(prefer_capacity::<T>(current.saturating_mul(2), capacity))
    }

    /// Ensure room for at least `additional` more elements.
    pub fn reserve_additional(&mut self, additional: usize) {
        match self.try_reserve_additional(additional) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_reserve_additional(&mut self, additional: usize) -> Result<(), StorageError> {
        self.try_grow_for(additional)
    }

    /// Reduce the capacity to the current length, releasing the buffer
    /// entirely when the vector is empty.
    pub fn shrink_to_fit(&mut self) {
        match self.try_shrink_to_fit() {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_shrink_to_fit(&mut self) -> Result<(), StorageError> {
        if mem::size_of::<T>() == 0 || self.buffer.capacity() == self.len {
            return Ok(());
        }
        if self.len == 0 {
            trace!(
                "Releasing vector buffer of capacity {}",
                self.buffer.capacity()
            );
            unsafe { self.buffer.replace(ptr::NonNull::dangling(), 0) };
            return Ok(());
        }
        self.try_reallocate(self.len)
    }

    /// Append an element to the end of the vector.
    ///
    /// # Panics
    /// Panics if the required storage cannot be allocated.
    #[inline]
    pub fn push(&mut self, item: T) {
        if let Err(error) = self.try_grow_for(1) {
            error.panic();
        }
        unsafe { self.push_unchecked(item) }
    }

    /// Append an element to the end of the vector, returning it within the
    /// error if storage could not be allocated.
    ///
    /// ```
    /// use growvec::{storage::Limited, Vector};
    ///
    /// let alloc = Limited::new(16);
    /// let mut v = Vector::new_in(&alloc);
    /// v.extend([1u32, 2, 3, 4]);
    /// let err = v.try_push(5).unwrap_err();
    /// assert_eq!(err.into_value(), 5);
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn try_push(&mut self, item: T) -> Result<(), UpdateError<T>> {
        if let Err(error) = self.try_grow_for(1) {
            return Err(UpdateError::new(error, item));
        }
        unsafe { self.push_unchecked(item) };
        Ok(())
    }

    /// # Safety
    /// The capacity must exceed the current length.
    #[inline]
    unsafe fn push_unchecked(&mut self, item: T) {
        let len = self.len;
        self.buffer.data_ptr_mut().add(len).write(item);
        self.len = len + 1;
    }

    /// Construct an element at the end of the vector from the result of `f`,
    /// returning a reference to it.
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        self.emplace(len, f)
    }

    /// Remove and return the last element, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(unsafe { ptr::read(self.buffer.data_ptr().add(self.len)) })
        }
    }

    /// Insert an element at position `index`, shifting the following
    /// elements toward the end. Returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`, or if the required storage cannot be allocated.
    ///
    /// ```
    /// use growvec::vector;
    ///
    /// let mut v = vector![1, 2, 3];
    /// assert_eq!(v.insert(1, 10), 1);
    /// assert_eq!(v, [1, 10, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        match self.try_insert(index, value) {
            Ok(index) => index,
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize, UpdateError<T>> {
        let prev_len = self.len;
        if index > prev_len {
            index_panic();
        }
        if let Err(error) = self.try_grow_for(1) {
            return Err(UpdateError::new(error, value));
        }
        unsafe {
            let base = self.buffer.data_ptr_mut();
            transfer::shift_right(base, index, prev_len, 1);
            base.add(index).write(value);
        }
        self.len = prev_len + 1;
        Ok(index)
    }

    /// Insert `count` clones of `value` at position `index`. Returns `index`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> usize
    where
        T: Clone,
    {
        match self.try_insert_n(index, count, value) {
            Ok(index) => index,
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_n(
        &mut self,
        index: usize,
        count: usize,
        value: &T,
    ) -> Result<usize, StorageError>
    where
        T: Clone,
    {
        if index > self.len {
            index_panic();
        }
        if count == 0 {
            return Ok(index);
        }
        self.try_grow_for(count)?;
        let data = self.buffer.data_ptr_mut();
        let mut ins = unsafe { Inserter::new(data, &mut self.len, index, count) };
        ins.push_repeat(value, count);
        ins.complete();
        Ok(index)
    }

    /// Insert clones of the elements of `values` at position `index`,
    /// preserving their order. Returns `index`.
    ///
    /// `values` may not borrow from this vector, so inserting a copy of a
    /// range of the vector into itself requires cloning the range first.
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> usize
    where
        T: Clone,
    {
        match self.try_insert_slice(index, values) {
            Ok(index) => index,
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<usize, StorageError>
    where
        T: Clone,
    {
        if index > self.len {
            index_panic();
        }
        if values.is_empty() {
            return Ok(index);
        }
        self.try_grow_for(values.len())?;
        let data = self.buffer.data_ptr_mut();
        let mut ins = unsafe { Inserter::new(data, &mut self.len, index, values.len()) };
        ins.push_slice(values);
        ins.complete();
        Ok(index)
    }

    /// Insert the items of an exactly-sized iterator at position `index`.
    /// Returns `index`.
    ///
    /// Storage for all the items is reserved before any is consumed. If the
    /// iterator yields fewer items than it reported, only those are inserted.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        match self.try_insert_iter(index, iter) {
            Ok(index) => index,
            Err(error) => error.panic(),
        }
    }

    /// Insert the items of an exactly-sized iterator at position `index`,
    /// reporting an allocation failure before any item is consumed.
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        if index > self.len {
            index_panic();
        }
        let mut iter = iter.into_iter();
        let count = iter.len();
        if count == 0 {
            return Ok(index);
        }
        self.try_grow_for(count)?;
        let data = self.buffer.data_ptr_mut();
        let mut ins = unsafe { Inserter::new(data, &mut self.len, index, count) };
        ins.push_iter(&mut iter);
        ins.complete();
        Ok(index)
    }

    /// Construct an element at position `index` from the result of `f`,
    /// returning a reference to it.
    ///
    /// Storage is reserved before `f` is called. If `f` panics, the vector
    /// keeps its previous contents.
    pub fn emplace<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace(index, f) {
            Ok(item) => item,
            Err(error) => error.panic(),
        }
    }

    pub fn try_emplace<F>(&mut self, index: usize, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        if index > self.len {
            index_panic();
        }
        self.try_grow_for(1)?;
        let data = self.buffer.data_ptr_mut();
        let mut ins = unsafe { Inserter::new(data, &mut self.len, index, 1) };
        ins.push(f());
        ins.complete();
        Ok(unsafe { &mut *data.add(index) })
    }

    /// Remove the element at `index`, shifting the following elements toward
    /// the front. Returns the position now occupied by the element which
    /// followed the removed one. Erasing at `len()` does nothing and returns
    /// `len()`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn erase(&mut self, index: usize) -> usize {
        let len = self.len;
        if index > len {
            index_panic();
        }
        self.erase_range(index..(index + 1).min(len))
    }

    /// Remove the elements within `range`, returning the start of the range.
    ///
    /// ```
    /// use growvec::vector;
    ///
    /// let mut v = vector![1, 2, 3, 4, 5];
    /// assert_eq!(v.erase_range(1..3), 1);
    /// assert_eq!(v, [1, 4, 5]);
    /// assert_eq!(v.capacity(), 5);
    /// ```
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let len = self.len;
        let Range { start, end } = bounds_to_range(range, len);
        if start > end || end > len {
            index_panic();
        }
        let count = end - start;
        if count > 0 {
            let base = self.buffer.data_ptr_mut();
            // elements past `start` leak if a destructor panics
            self.len = start;
            unsafe {
                transfer::drop_range(base, start, count);
                transfer::shift_left(base, start, len, count);
            }
            self.len = len - count;
        }
        start
    }

    /// Remove and return the element at `index`, shifting the following
    /// elements toward the front.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            index_panic();
        }
        unsafe {
            let base = self.buffer.data_ptr_mut();
            let result = ptr::read(base.add(index));
            transfer::shift_left(base, index, len, 1);
            self.len = len - 1;
            result
        }
    }

    /// Remove and return the element at `index`, replacing it with the last
    /// element.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            index_panic();
        }
        unsafe {
            let base = self.buffer.data_ptr_mut();
            let result = ptr::read(base.add(index));
            if index != len - 1 {
                ptr::copy_nonoverlapping(base.add(len - 1), base.add(index), 1);
            }
            self.len = len - 1;
            result
        }
    }

    /// Replace the contents with `count` clones of `value`.
    ///
    /// When the capacity is insufficient, a buffer of exactly `count` slots is
    /// allocated before the existing elements are dropped.
    pub fn assign(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        match self.try_assign(count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_assign(&mut self, count: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_prepare_assign(count)?;
        if count > 0 {
            let data = self.buffer.data_ptr_mut();
            let mut ins = unsafe { Inserter::new(data, &mut self.len, 0, count) };
            ins.push_repeat(&value, count);
            ins.complete();
        }
        Ok(())
    }

    /// Replace the contents with clones of the elements of `values`.
    pub fn assign_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        match self.try_assign_slice(values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_assign_slice(&mut self, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_prepare_assign(values.len())?;
        if !values.is_empty() {
            let data = self.buffer.data_ptr_mut();
            let mut ins = unsafe { Inserter::new(data, &mut self.len, 0, values.len()) };
            ins.push_slice(values);
            ins.complete();
        }
        Ok(())
    }

    /// Replace the contents with the items of an iterator.
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.extend(iter);
    }

    /// Clear the vector, ensuring the buffer holds at least `count` slots.
    fn try_prepare_assign(&mut self, count: usize) -> Result<(), StorageError> {
        if count > self.buffer.capacity() {
            let data = self.buffer.alloc_slots(count)?;
            self.clear();
            trace!(
                "Reallocating vector buffer: capacity {} -> {}, length 0",
                self.buffer.capacity(),
                count
            );
            unsafe { self.buffer.replace(data, count) };
        } else {
            self.clear();
        }
        Ok(())
    }

    /// Resize the vector to `new_len` elements, appending clones of `value`
    /// or dropping elements from the end.
    ///
    /// ```
    /// use growvec::vector;
    ///
    /// let mut v = vector![1, 2, 3];
    /// v.resize(5, 0);
    /// assert_eq!(v, [1, 2, 3, 0, 0]);
    /// v.resize(1, 0);
    /// assert_eq!(v, [1]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        match new_len.cmp(&self.len) {
            Ordering::Greater => {
                let count = new_len - self.len;
                self.try_grow_for(count)?;
                let (data, len) = (self.buffer.data_ptr_mut(), self.len);
                let mut ins = unsafe { Inserter::new(data, &mut self.len, len, count) };
                ins.push_repeat(&value, count);
                ins.complete();
            }
            Ordering::Less => self.truncate(new_len),
            Ordering::Equal => (),
        }
        Ok(())
    }

    /// Resize the vector to `new_len` elements, appending default values.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resize the vector to `new_len` elements, appending the results of `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        match new_len.cmp(&self.len) {
            Ordering::Greater => {
                let count = new_len - self.len;
                self.try_grow_for(count)?;
                let (data, len) = (self.buffer.data_ptr_mut(), self.len);
                let mut ins = unsafe { Inserter::new(data, &mut self.len, len, count) };
                while !ins.full() {
                    ins.push(f());
                }
                ins.complete();
            }
            Ordering::Less => self.truncate(new_len),
            Ordering::Equal => (),
        }
        Ok(())
    }

    /// Drop the elements past `len`, keeping the capacity.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len;
        if len < old_len {
            self.len = len;
            unsafe { transfer::drop_range(self.buffer.data_ptr_mut(), len, old_len - len) };
        }
    }

    /// Drop all the elements, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_mut(|r| f(&*r))
    }

    pub fn retain_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let orig_len = self.len;
        if orig_len == 0 {
            return;
        }
        let base = self.buffer.data_ptr_mut();
        // FIXME: drop the unvisited elements if `f` panics
        self.len = 0;
        let mut len = 0;
        for index in 0..orig_len {
            unsafe {
                let read = base.add(index);
                if f(&mut *read) {
                    if index != len {
                        ptr::copy_nonoverlapping(read, base.add(len), 1);
                    }
                    len += 1;
                } else {
                    ptr::drop_in_place(read);
                }
            }
        }
        self.len = len;
    }

    /// Append clones of the elements of `items`.
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.len;
        self.try_insert_slice(len, items).map(|_| ())
    }

    fn try_extend(&mut self, iter: &mut impl Iterator<Item = T>) -> Result<(), UpdateError<T>> {
        loop {
            let (len, spare) = (self.len, self.buffer.capacity() - self.len);
            let full = if spare > 0 {
                let data = self.buffer.data_ptr_mut();
                let mut ins = unsafe { Inserter::new(data, &mut self.len, len, spare) };
                ins.push_iter(iter);
                let full = ins.full();
                ins.complete();
                full
            } else {
                true
            };
            if !full {
                // ran out of items to insert
                break;
            }
            let Some(item) = iter.next() else { break };
            let min_reserve = iter.size_hint().0.saturating_add(1);
            match self.try_grow_for(min_reserve) {
                Ok(_) => unsafe { self.push_unchecked(item) },
                Err(error) => return Err(UpdateError::new(error, item)),
            }
        }
        Ok(())
    }

    /// Move all the elements of `other` to the end of this vector, leaving
    /// `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() && self.buffer.capacity() < other.len {
            mem::swap(&mut self.buffer, &mut other.buffer);
            mem::swap(&mut self.len, &mut other.len);
            return;
        }
        if let Err(error) = self.try_grow_for(other.len) {
            error.panic();
        }
        unsafe {
            transfer::relocate(
                other.buffer.data_ptr(),
                self.buffer.data_ptr_mut().add(self.len),
                other.len,
            );
        }
        self.len += other.len;
        other.len = 0;
    }

    /// Take the contents of this vector, leaving it empty with no capacity.
    ///
    /// ```
    /// use growvec::vector;
    ///
    /// let mut a = vector![1, 2, 3];
    /// let b = a.take();
    /// assert_eq!(b, [1, 2, 3]);
    /// assert!(a.is_empty());
    /// assert_eq!(a.capacity(), 0);
    /// ```
    pub fn take(&mut self) -> Self
    where
        C::Alloc: Clone,
    {
        let alloc = self.allocator().clone();
        mem::replace(self, Self::from_alloc(alloc))
    }
}

impl<T, C: VecConfig> AsRef<[T]> for Vector<T, C> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, C: VecConfig> AsMut<[T]> for Vector<T, C> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, C: VecConfig> Borrow<[T]> for Vector<T, C> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, C: VecConfig> BorrowMut<[T]> for Vector<T, C> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, C: VecConfig> Clone for Vector<T, C>
where
    C::Alloc: Clone,
{
    fn clone(&self) -> Self {
        match Self::try_from_slice_alloc(self.as_slice(), self.allocator().clone()) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend_from_slice(source.as_slice());
    }
}

impl<T: fmt::Debug, C: VecConfig> fmt::Debug for Vector<T, C> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, C: VecConfig> Default for Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: VecConfig> Deref for Vector<T, C> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, C: VecConfig> DerefMut for Vector<T, C> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, C: VecConfig> Drop for Vector<T, C> {
    fn drop(&mut self) {
        // the buffer itself is released when the field is dropped
        self.clear();
    }
}

impl<T, C: VecConfig> Extend<T> for Vector<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, C: VecConfig> Extend<&'a T> for Vector<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, C: VecConfig> FromIterator<T> for Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Self::with_capacity(min_cap);
        vec.extend(iter);
        vec
    }
}

impl<T, C: VecConfig> Hash for Vector<T, C>
where
    T: Hash,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

#[cfg(feature = "alloc")]
impl<T> From<alloc_crate::vec::Vec<T>> for Vector<T, Global> {
    fn from(vec: alloc_crate::vec::Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let (len, capacity) = (vec.len(), vec.capacity());
        let data = unsafe { ptr::NonNull::new_unchecked(vec.as_mut_ptr()) };
        Self {
            buffer: unsafe { RawBuffer::from_raw_parts(data, capacity, Global) },
            len,
        }
    }
}

#[cfg(feature = "alloc")]
impl<T> From<Vector<T, Global>> for alloc_crate::vec::Vec<T> {
    fn from(vec: Vector<T, Global>) -> Self {
        let vec = ManuallyDrop::new(vec);
        let len = vec.len;
        let buffer = unsafe { ptr::read(&vec.buffer) };
        let (data, capacity, _) = buffer.into_raw_parts();
        unsafe { alloc_crate::vec::Vec::from_raw_parts(data.as_ptr(), len, capacity) }
    }
}

impl<T: Clone, C: VecConfig> From<&[T]> for Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, C: VecConfig> From<&mut [T]> for Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    #[inline]
    fn from(data: &mut [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, C: VecConfig, const N: usize> From<&[T; N]> for Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    #[inline]
    fn from(data: &[T; N]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, C: VecConfig, const N: usize> From<[T; N]> for Vector<T, C>
where
    C::Alloc: ConstDefault,
{
    #[inline]
    fn from(data: [T; N]) -> Self {
        let mut vec = Self::with_capacity(N);
        vec.extend(data);
        vec
    }
}

impl<C: VecConfig> From<&str> for Vector<u8, C>
where
    C::Alloc: ConstDefault,
{
    #[inline]
    fn from(data: &str) -> Self {
        Self::from_slice(data.as_bytes())
    }
}

impl<T, C: VecConfig> IntoIterator for Vector<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C::Alloc>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);
        let buffer = unsafe { ptr::read(&vec.buffer) };
        IntoIter::new(buffer, vec.len)
    }
}

impl<'a, T, C: VecConfig> IntoIterator for &'a Vector<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, C: VecConfig> IntoIterator for &'a mut Vector<T, C> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T1, C1, T2, C2> PartialEq<Vector<T2, C2>> for Vector<T1, C1>
where
    C1: VecConfig,
    C2: VecConfig,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, C2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, C: VecConfig> Eq for Vector<T, C> {}

impl<T1, C1, T2> PartialEq<&[T2]> for Vector<T1, C1>
where
    T1: PartialEq<T2>,
    C1: VecConfig,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, C1, T2> PartialEq<[T2]> for Vector<T1, C1>
where
    T1: PartialEq<T2>,
    C1: VecConfig,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, C1, T2, const N: usize> PartialEq<&[T2; N]> for Vector<T1, C1>
where
    T1: PartialEq<T2>,
    C1: VecConfig,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, C1, T2, const N: usize> PartialEq<[T2; N]> for Vector<T1, C1>
where
    T1: PartialEq<T2>,
    C1: VecConfig,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, C2> PartialEq<Vector<T2, C2>> for &[T1]
where
    T1: PartialEq<T2>,
    C2: VecConfig,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, C2>) -> bool {
        (*self).eq(other.as_slice())
    }
}

impl<T1, T2, C2> PartialEq<Vector<T2, C2>> for [T1]
where
    T1: PartialEq<T2>,
    C2: VecConfig,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, C2>) -> bool {
        self.eq(other.as_slice())
    }
}

impl<T1, T2, C2, const N: usize> PartialEq<Vector<T2, C2>> for [T1; N]
where
    T1: PartialEq<T2>,
    C2: VecConfig,
{
    #[inline]
    fn eq(&self, other: &Vector<T2, C2>) -> bool {
        self[..].eq(other.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<A, B, C> PartialEq<alloc_crate::vec::Vec<A>> for Vector<B, C>
where
    B: PartialEq<A>,
    C: VecConfig,
{
    #[inline]
    fn eq(&self, other: &alloc_crate::vec::Vec<A>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<A, B, C> PartialEq<Vector<B, C>> for alloc_crate::vec::Vec<A>
where
    A: PartialEq<B>,
    C: VecConfig,
{
    #[inline]
    fn eq(&self, other: &Vector<B, C>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: PartialOrd, C: VecConfig> PartialOrd for Vector<T, C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, C: VecConfig> Ord for Vector<T, C> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

#[cfg(feature = "std")]
impl<C: VecConfig> std::io::Write for Vector<u8, C> {
    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.try_extend_from_slice(buf) {
            Ok(_) => Ok(buf.len()),
            Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err)),
        }
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: crate::storage::RawAlloc> zeroize::Zeroize
    for Vector<T, crate::storage::ZeroizingAlloc<A>>
{
    #[inline]
    fn zeroize(&mut self) {
        self.clear();
        self.shrink_to_fit();
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: crate::storage::RawAlloc> zeroize::ZeroizeOnDrop
    for Vector<T, crate::storage::ZeroizingAlloc<A>>
{
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use crate::capacity::GrowExact;
    use crate::storage::Limited;

    #[test]
    fn bounds_conversion() {
        assert_eq!(bounds_to_range(.., 5), 0..5);
        assert_eq!(bounds_to_range(1..=2, 5), 1..3);
        assert_eq!(bounds_to_range(2.., 5), 2..5);
    }

    #[test]
    fn growth_doubles_from_initial() {
        let alloc = Limited::new(1024);
        let mut v = Vector::new_in(&alloc);
        let mut caps = std::vec::Vec::new();
        for i in 0..10u32 {
            v.push(i);
            caps.push(v.capacity());
        }
        assert_eq!(caps, [4, 4, 4, 4, 8, 8, 8, 8, 16, 16]);
        assert_eq!(alloc.remaining(), 1024 - 64);
    }

    #[test]
    fn growth_exact() {
        let mut v = Vector::<u8, Custom<Limited, GrowExact>>::new_in(Custom::new(Limited::new(64)));
        v.push(1);
        v.push(2);
        assert_eq!(v.capacity(), 2);
        v.insert_n(0, 3, &0);
        assert_eq!(v.capacity(), 5);
        assert_eq!(v, [0, 0, 0, 1, 2]);
    }

    #[test]
    fn grow_for_overflow() {
        let mut v = Vector::<u8, Limited>::new_in(Limited::new(8));
        v.push(1);
        assert_eq!(v.try_grow_for(usize::MAX), Err(StorageError::CapacityLimit));
        assert_eq!(v, [1]);
    }

    #[test]
    fn failed_reallocate_keeps_buffer() {
        let alloc = Limited::new(16);
        let mut v = Vector::new_in(&alloc);
        v.extend([1u32, 2, 3, 4]);
        assert!(v.try_reserve(5).is_err());
        assert_eq!(v.capacity(), 4);
        assert_eq!(v, [1, 2, 3, 4]);
    }

    #[test]
    fn reserve_doubles_or_exact() {
        let mut v = Vector::<u8, Global>::new();
        v.reserve(1);
        assert_eq!(v.capacity(), 1);
        v.reserve(2);
        assert_eq!(v.capacity(), 2);
        v.reserve(3);
        assert_eq!(v.capacity(), 4);
        v.reserve(9);
        assert_eq!(v.capacity(), 9);
    }

    #[test]
    fn shrink_releases_empty() {
        let alloc = Limited::new(64);
        let mut v = Vector::new_in(&alloc);
        v.extend([1u32, 2, 3]);
        v.clear();
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 0);
        assert_eq!(alloc.remaining(), 64);
    }

    #[test]
    fn zero_sized_elements() {
        let mut v = Vector::<(), Global>::new();
        assert_eq!(v.capacity(), usize::MAX);
        for _ in 0..100 {
            v.push(());
        }
        v.insert(50, ());
        assert_eq!(v.len(), 101);
        assert_eq!(v.erase_range(10..20), 10);
        assert_eq!(v.len(), 91);
        v.shrink_to_fit();
        assert_eq!(v.capacity(), usize::MAX);
    }
}
