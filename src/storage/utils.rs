use core::alloc::Layout;

use crate::error::StorageError;

#[inline]
pub fn array_layout<T>(count: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(count).map_err(StorageError::LayoutError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_array_layout() {
        assert_eq!(
            array_layout::<u32>(5),
            Ok(Layout::from_size_align(20, 4).expect("invalid layout"))
        );
        assert!(matches!(
            array_layout::<u64>(usize::MAX),
            Err(StorageError::LayoutError(_))
        ));
    }
}
