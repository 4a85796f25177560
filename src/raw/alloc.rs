use crate::error::{QueueError, Result};

use std::alloc::Layout;
use std::ptr::NonNull;

/// Allocates uninitialized storage for a single `T`.
///
/// Unlike `Box::new`, a null return from the allocator is reported as
/// [`QueueError::AllocFailed`] instead of aborting the process.
///
/// cond: `T` is not zero-sized
pub unsafe fn try_alloc<T>() -> Result<NonNull<T>> {
    let layout = Layout::new::<T>();
    debug_assert!(layout.size() != 0);
    NonNull::new(std::alloc::alloc(layout) as *mut T).ok_or_else(|| {
        log::debug!("allocation of {} bytes failed", layout.size());
        QueueError::AllocFailed
    })
}

// cond: ptr came from `try_alloc::<T>` and its value is already dropped or moved out
pub unsafe fn dealloc<T>(ptr: NonNull<T>) {
    let layout = Layout::new::<T>();
    std::alloc::dealloc(ptr.as_ptr() as *mut u8, layout);
}
