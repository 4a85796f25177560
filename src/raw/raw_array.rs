use crate::error::{QueueError, Result};

use std::alloc::Layout;
use std::mem::{align_of, size_of};
use std::ptr::NonNull;

pub struct RawArray<T> {
    pub arr: NonNull<T>,
    pub cap: usize,
}

impl<T> RawArray<T> {
    // cond: the returned slots are uninitialized
    pub unsafe fn try_alloc(capacity: usize) -> Result<Self> {
        if size_of::<T>() == 0 {
            return Err(QueueError::InvalidArgument);
        }

        if capacity == 0 {
            return Ok(Self {
                arr: NonNull::dangling(),
                cap: 0,
            });
        }

        let alloc_size = capacity
            .checked_mul(size_of::<T>())
            .filter(|&size| size <= isize::max_value() as usize)
            .ok_or(QueueError::AllocFailed)?;
        let layout = Layout::from_size_align(alloc_size, align_of::<T>())
            .map_err(|_| QueueError::AllocFailed)?;

        let arr = NonNull::new(std::alloc::alloc(layout) as *mut T).ok_or_else(|| {
            log::debug!("array allocation of {} bytes failed", alloc_size);
            QueueError::AllocFailed
        })?;

        Ok(Self { arr, cap: capacity })
    }

    // cond: every slot is already dropped or moved out
    pub unsafe fn dealloc(&mut self) {
        if self.cap == 0 {
            return;
        }
        let alloc_size = self.cap * size_of::<T>();
        let layout = Layout::from_size_align_unchecked(alloc_size, align_of::<T>());
        std::alloc::dealloc(self.arr.as_ptr() as *mut u8, layout);
        self.arr = NonNull::dangling();
        self.cap = 0;
    }

    // cond: index < self.cap
    pub unsafe fn offset(&self, index: usize) -> *mut T {
        self.arr.as_ptr().add(index)
    }
}

#[cfg(test)]
mod test {
    use super::RawArray;
    use crate::error::QueueError;

    #[test]
    fn test_raw_array_rejects_bad_layouts() {
        let zst = unsafe { RawArray::<()>::try_alloc(4) };
        assert_eq!(zst.err(), Some(QueueError::InvalidArgument));

        let huge = unsafe { RawArray::<u64>::try_alloc(usize::max_value()) };
        assert_eq!(huge.err(), Some(QueueError::AllocFailed));
    }

    #[test]
    fn test_raw_array_alloc_dealloc() {
        unsafe {
            let mut raw = RawArray::<u32>::try_alloc(3).unwrap();
            assert_eq!(raw.cap, 3);
            for i in 0..3 {
                raw.offset(i).write(i as u32 * 10);
            }
            assert_eq!(raw.offset(2).read(), 20);
            raw.dealloc();
            assert_eq!(raw.cap, 0);

            let mut empty = RawArray::<u32>::try_alloc(0).unwrap();
            empty.dealloc();
        }
    }
}
