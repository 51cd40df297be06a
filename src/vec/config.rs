//! Configuration of `Vector` instances.

use core::fmt::Debug;
use core::marker::PhantomData;

use const_default::ConstDefault;

use crate::capacity::{Grow, GrowDoubling, GrowExact};
use crate::storage::RawAlloc;

/// Select the allocator and growth policy used by a `Vector`.
///
/// Every [`RawAlloc`] is a configuration in its own right, growing by
/// doubling. Use [`Custom`] to select a different [`Grow`] policy.
pub trait VecConfig: Debug {
    /// The allocator type owned by the vector.
    type Alloc: RawAlloc;
    /// The growth policy applied when the vector runs out of capacity.
    type Grow: Grow;
}

impl<A: RawAlloc> VecConfig for A {
    type Alloc = A;
    type Grow = GrowDoubling;
}

/// A configuration combining an allocator `A` with a growth policy `G`.
///
/// ```
/// use growvec::{capacity::GrowExact, storage::Global, vec::{Custom, Vector}};
///
/// let mut v = Vector::<u32, Custom<Global, GrowExact>>::new();
/// v.push(1);
/// assert_eq!(v.capacity(), 1);
///
/// let v = Vector::<u32, _>::with_capacity_in(3, Custom::<_, GrowExact>::new(Global));
/// assert_eq!(v.capacity(), 3);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Custom<A: RawAlloc, G: Grow = GrowExact>(A, PhantomData<G>);

impl<A: RawAlloc, G: Grow> Custom<A, G> {
    /// Create a new configuration instance for the allocator `alloc`.
    #[inline]
    pub const fn new(alloc: A) -> Self {
        Self(alloc, PhantomData)
    }
}

impl<A: RawAlloc + ConstDefault, G: Grow> ConstDefault for Custom<A, G> {
    const DEFAULT: Self = Self::new(A::DEFAULT);
}

impl<A: RawAlloc, G: Grow> VecConfig for Custom<A, G> {
    type Alloc = A;
    type Grow = G;
}

/// Values which may be used to construct a `Vector`, determining its configuration.
pub trait VecNewIn {
    /// The configuration of the resulting vector.
    type Config: VecConfig;

    /// Convert this value into the allocator instance owned by the vector.
    fn into_alloc(self) -> <Self::Config as VecConfig>::Alloc;
}

impl<A: RawAlloc> VecNewIn for A {
    type Config = A;

    #[inline]
    fn into_alloc(self) -> A {
        self
    }
}

impl<A: RawAlloc, G: Grow> VecNewIn for Custom<A, G> {
    type Config = Self;

    #[inline]
    fn into_alloc(self) -> A {
        self.0
    }
}
