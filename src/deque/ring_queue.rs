use crate::error::{QueueError, Result};
use crate::raw::RawArray;

use std::mem::size_of;
use std::ptr::drop_in_place;

/// A bounded FIFO queue over one backing array.
///
/// All storage is allocated by [`RingQueue::new`]; enqueue and dequeue never
/// allocate.
pub struct RingQueue<T> {
    raw: RawArray<T>,
    head: usize,
    tail: usize,
    len: usize,
}

unsafe impl<T: Send> Send for RingQueue<T> {}
unsafe impl<T: Sync> Sync for RingQueue<T> {}

impl<T> RingQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QueueError::InvalidArgument);
        }
        let raw = unsafe { RawArray::try_alloc(capacity)? };
        log::debug!(
            "new ring queue: element_size={}, capacity={}",
            size_of::<T>(),
            capacity
        );
        Ok(Self {
            raw,
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    pub fn element_size(&self) -> usize {
        size_of::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.raw.cap
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.raw.cap
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { &*self.raw.offset(self.head) })
        }
    }

    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            let index = (self.tail + self.raw.cap - 1) % self.raw.cap;
            Some(unsafe { &*self.raw.offset(index) })
        }
    }

    pub fn enqueue(&mut self, elem: T) -> Result<usize> {
        if self.is_full() {
            log::debug!("enqueue rejected: ring queue full at {}", self.len);
            return Err(QueueError::CapacityExceeded);
        }

        unsafe { self.raw.offset(self.tail).write(elem) };
        self.tail = (self.tail + 1) % self.raw.cap;
        self.len += 1;

        log::trace!("enqueued {} bytes, len={}", size_of::<T>(), self.len);
        Ok(size_of::<T>())
    }

    pub fn dequeue(&mut self) -> Result<usize> {
        if self.is_empty() {
            log::debug!("dequeue rejected: ring queue empty");
            return Err(QueueError::InvalidArgument);
        }

        let ptr = unsafe { self.raw.offset(self.head) };
        self.head = (self.head + 1) % self.raw.cap;
        self.len -= 1;
        unsafe { drop_in_place(ptr) };

        log::trace!("dequeued {} bytes, len={}", size_of::<T>(), self.len);
        Ok(size_of::<T>())
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.len;
        if removed == 0 {
            return 0;
        }

        // the live range may wrap around the end of the array
        let first_run = removed.min(self.raw.cap - self.head);
        self.len = 0;
        unsafe {
            drop_in_place(std::slice::from_raw_parts_mut(
                self.raw.offset(self.head),
                first_run,
            ));
            drop_in_place(std::slice::from_raw_parts_mut(
                self.raw.arr.as_ptr(),
                removed - first_run,
            ));
        }
        self.head = 0;
        self.tail = 0;

        log::debug!("cleared {} elements", removed);
        removed
    }
}

impl<T> Drop for RingQueue<T> {
    fn drop(&mut self) {
        self.clear();
        unsafe { self.raw.dealloc() }
    }
}

#[cfg(test)]
mod test {
    use super::RingQueue;
    use crate::error::QueueError;

    use std::cell::Cell;
    use std::rc::Rc;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct Foo(Rc<Cell<usize>>);

    impl Drop for Foo {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_ring_queue_construction() {
        init_logger();
        assert_eq!(
            RingQueue::<u8>::new(0).err(),
            Some(QueueError::InvalidArgument)
        );
        assert_eq!(
            RingQueue::<()>::new(4).err(),
            Some(QueueError::InvalidArgument)
        );
        assert_eq!(
            RingQueue::<u64>::new(usize::max_value()).err(),
            Some(QueueError::AllocFailed)
        );

        let q = RingQueue::<u16>::new(4).unwrap();
        assert_eq!(q.capacity(), 4);
        assert_eq!(q.element_size(), 2);
        assert!(q.is_empty());
        assert_eq!(q.front(), None);
        assert_eq!(q.back(), None);
    }

    #[test]
    fn test_ring_queue_bounded_scenario() {
        init_logger();
        let mut q = RingQueue::<u8>::new(2).unwrap();
        assert_eq!(q.enqueue(b'x'), Ok(1));
        assert_eq!(q.len(), 1);
        assert_eq!(q.enqueue(b'y'), Ok(1));
        assert!(q.is_full());
        assert_eq!(q.enqueue(b'z'), Err(QueueError::CapacityExceeded));
        assert_eq!(q.len(), 2);
        assert_eq!(q.front(), Some(&b'x'));
        assert_eq!(q.back(), Some(&b'y'));
    }

    #[test]
    fn test_ring_queue_wraps_in_order() {
        init_logger();
        let mut q = RingQueue::<u32>::new(3).unwrap();
        let mut next = 0;
        let mut expected = 0;
        for _ in 0..10 {
            while !q.is_full() {
                q.enqueue(next).unwrap();
                next += 1;
            }
            assert_eq!(q.back(), Some(&(next - 1)));
            for _ in 0..2 {
                assert_eq!(q.front(), Some(&expected));
                assert_eq!(q.dequeue(), Ok(4));
                expected += 1;
            }
        }
        assert_eq!(q.len(), 1);
        assert_eq!(q.clear(), 1);
        assert_eq!(q.dequeue(), Err(QueueError::InvalidArgument));
    }

    #[test]
    fn test_ring_queue_releases_wrapped_elements() {
        init_logger();
        let drops = Rc::new(Cell::new(0));
        let mut q = RingQueue::new(4).unwrap();
        for _ in 0..4 {
            q.enqueue(Foo(drops.clone())).unwrap();
        }
        q.dequeue().unwrap();
        q.dequeue().unwrap();
        assert_eq!(drops.get(), 2);

        // live range now wraps: slots 2, 3, 0
        q.enqueue(Foo(drops.clone())).unwrap();
        assert_eq!(q.clear(), 3);
        assert_eq!(drops.get(), 5);
        assert!(q.is_empty());

        for _ in 0..3 {
            q.enqueue(Foo(drops.clone())).unwrap();
        }
        drop(q);
        assert_eq!(drops.get(), 8);
    }
}
