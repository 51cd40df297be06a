//! Growth policies applied when a collection exceeds its available capacity.

use core::alloc::Layout;
use core::fmt::Debug;
use core::mem::size_of;

/// The number of slots allocated when an empty collection first requires storage,
/// unless a larger capacity is requested.
pub const INITIAL_CAPACITY: usize = 4;

/// Growth behavior for collections which have exceeded their available storage
pub trait Grow: Debug {
    /// Calculate the next capacity to request from the allocator, given the
    /// previous capacity and the minimum capacity required by the operation.
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize;
}

/// Growth behavior which never requests extra capacity
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowExact;

impl Grow for GrowExact {
    #[inline]
    fn next_capacity<T>(_prev: usize, minimum: usize) -> usize {
        minimum
    }
}

/// Growth behavior which consistently doubles in size, starting from
/// [`INITIAL_CAPACITY`]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowDoubling;

impl Grow for GrowDoubling {
    #[inline]
    fn next_capacity<T>(prev: usize, minimum: usize) -> usize {
        if size_of::<T>() == 0 {
            return minimum;
        }
        let preferred = if prev == 0 {
            INITIAL_CAPACITY
        } else {
            prev.saturating_mul(2)
        };
        prefer_capacity::<T>(preferred, minimum)
    }
}

/// Select `preferred` over `minimum` when it is larger and still forms a
/// valid array layout for `T`.
#[inline]
pub(crate) fn prefer_capacity<T>(preferred: usize, minimum: usize) -> usize {
    if preferred > minimum && Layout::array::<T>(preferred).is_ok() {
        preferred
    } else {
        minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_starts_from_initial() {
        assert_eq!(GrowDoubling::next_capacity::<u32>(0, 1), INITIAL_CAPACITY);
        assert_eq!(GrowDoubling::next_capacity::<u32>(0, 9), 9);
    }

    #[test]
    fn doubling_prefers_double() {
        assert_eq!(GrowDoubling::next_capacity::<u32>(4, 5), 8);
        assert_eq!(GrowDoubling::next_capacity::<u32>(4, 20), 20);
    }

    #[test]
    fn doubling_falls_back_past_layout_limit() {
        let prev = isize::MAX as usize / 2 + 1;
        assert_eq!(GrowDoubling::next_capacity::<u8>(prev, prev + 1), prev + 1);
        assert_eq!(
            GrowDoubling::next_capacity::<u32>(usize::MAX / 2 + 1, usize::MAX / 2 + 2),
            usize::MAX / 2 + 2
        );
        assert_eq!(prefer_capacity::<u8>(16, 4), 16);
        assert_eq!(prefer_capacity::<u8>(2, 4), 4);
    }

    #[test]
    fn exact_returns_minimum() {
        assert_eq!(GrowExact::next_capacity::<u32>(0, 1), 1);
        assert_eq!(GrowExact::next_capacity::<u32>(16, 17), 17);
    }
}
