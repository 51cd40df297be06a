/// Create a [`Vector`](crate::vec::Vector) containing the arguments.
///
/// ```
/// use growvec::{storage::Limited, vector};
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
///
/// let v = vector!["a"; 2];
/// assert_eq!(v, ["a", "a"]);
///
/// let alloc = Limited::new(64);
/// let v = vector![in &alloc; 1u32, 2, 3];
/// assert_eq!(alloc.remaining(), 52);
/// # drop(v);
/// ```
#[macro_export]
macro_rules! vector {
    (in $alloc:expr $(;)?) => (
        $crate::vec::Vector::new_in($alloc)
    );
    (in $alloc:expr; $elem:expr; $n:expr) => (
        $crate::vec::from_elem_in($elem, $n, $alloc)
    );
    (in $alloc:expr; $($x:expr),+ $(,)?) => (
        $crate::vec::from_array_in([$($x),+], $alloc)
    );
    () => (
        $crate::vec::Vector::<_>::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::from_array([$($x),+])
    );
}
