use crate::error::{QueueError, Result};
use crate::raw;

use std::marker::PhantomData;
use std::mem::size_of;
use std::ptr::NonNull;

struct Element<T> {
    data: NonNull<T>,
    next: Option<NonNull<Element<T>>>,
}

impl<T> Element<T> {
    // The node and its data buffer are separate allocations. On failure
    // nothing stays allocated and `elem` is dropped.
    unsafe fn alloc(elem: T) -> Result<NonNull<Self>> {
        let node_ptr = raw::try_alloc::<Self>()?;
        let data = match raw::try_alloc::<T>() {
            Ok(data) => data,
            Err(e) => {
                raw::dealloc(node_ptr);
                return Err(e);
            }
        };
        data.as_ptr().write(elem);
        node_ptr.as_ptr().write(Self { data, next: None });
        Ok(node_ptr)
    }

    // cond: ptr is unlinked from the queue
    unsafe fn release(ptr: NonNull<Self>) {
        let data = ptr.as_ref().data;
        let elem = data.as_ptr().read();
        raw::dealloc(data);
        raw::dealloc(ptr);
        drop(elem);
    }
}

/// A FIFO queue where every element lives in its own heap buffer.
///
/// A bound can be set with [`Queue::with_max_count`] or
/// [`Queue::set_max_count`]; `0` means unbounded. The element size is
/// `size_of::<T>()` and must be nonzero.
pub struct Queue<T> {
    first: Option<NonNull<Element<T>>>,
    last: Option<NonNull<Element<T>>>,
    count: usize,
    max_count: usize,
    // invariant: count == 0 <=> first.is_none() && last.is_none()
    // invariant: count == 1 <=> first == last
    _marker: PhantomData<Box<Element<T>>>,
}

unsafe impl<T: Send> Send for Queue<T> {}
unsafe impl<T: Sync> Sync for Queue<T> {}

impl<T> Queue<T> {
    pub fn new() -> Result<Self> {
        Self::with_max_count(0)
    }

    pub fn with_max_count(max_count: usize) -> Result<Self> {
        if size_of::<T>() == 0 {
            log::debug!("refusing to create a queue with zero element size");
            return Err(QueueError::InvalidArgument);
        }
        log::debug!(
            "new queue: element_size={}, max_count={}",
            size_of::<T>(),
            max_count
        );
        Ok(Self {
            first: None,
            last: None,
            count: 0,
            max_count,
            _marker: PhantomData,
        })
    }

    pub fn element_size(&self) -> usize {
        size_of::<T>()
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// A bound below the current length is accepted; the queue reports full
    /// until enough elements are dequeued.
    pub fn set_max_count(&mut self, max_count: usize) {
        self.max_count = max_count;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.max_count != 0 && self.count >= self.max_count
    }

    pub fn front(&self) -> Option<&T> {
        self.first.map(|ptr| unsafe { &*ptr.as_ref().data.as_ptr() })
    }

    pub fn back(&self) -> Option<&T> {
        self.last.map(|ptr| unsafe { &*ptr.as_ref().data.as_ptr() })
    }

    /// Moves `elem` into a freshly allocated element at the tail.
    ///
    /// Returns the number of bytes stored. Fails with
    /// [`QueueError::CapacityExceeded`] when full, before anything is
    /// allocated, and with [`QueueError::AllocFailed`] when memory runs out.
    /// The queue is unchanged on failure.
    pub fn enqueue(&mut self, elem: T) -> Result<usize> {
        if self.is_full() {
            log::debug!("enqueue rejected: queue full at {}", self.count);
            return Err(QueueError::CapacityExceeded);
        }

        let node_ptr = unsafe { Element::alloc(elem)? };
        match self.last {
            None => {
                self.first = Some(node_ptr);
                self.last = Some(node_ptr);
            }
            Some(mut tail_ptr) => {
                unsafe { tail_ptr.as_mut().next = Some(node_ptr) };
                self.last = Some(node_ptr);
            }
        }
        self.count += 1;

        log::trace!("enqueued {} bytes, count={}", size_of::<T>(), self.count);
        Ok(size_of::<T>())
    }

    /// Removes and drops the head element, returning the number of bytes
    /// released.
    ///
    /// The value is not handed back; read it with [`Queue::front`] first.
    pub fn dequeue(&mut self) -> Result<usize> {
        let head_ptr = match self.first {
            Some(ptr) => ptr,
            None => {
                log::debug!("dequeue rejected: queue empty");
                return Err(QueueError::InvalidArgument);
            }
        };

        if self.first == self.last {
            self.first = None;
            self.last = None;
            self.count = 0;
        } else {
            self.first = unsafe { head_ptr.as_ref().next };
            self.count -= 1;
        }
        unsafe { Element::release(head_ptr) };

        log::trace!("dequeued {} bytes, count={}", size_of::<T>(), self.count);
        Ok(size_of::<T>())
    }

    /// Dequeues until empty and returns how many elements were removed.
    pub fn clear(&mut self) -> usize {
        let mut removed = 0;
        while self.dequeue().is_ok() {
            removed += 1;
        }
        if removed != 0 {
            log::debug!("cleared {} elements", removed);
        }
        removed
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
