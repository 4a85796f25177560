//! Single-ended FIFO queues with optional capacity bounds.
//!
//! [`Queue`] keeps every element in its own heap allocation and can be
//! unbounded. [`RingQueue`] stores elements in one preallocated array and is
//! always bounded.

pub mod deque;
pub mod error;
mod raw;

pub use crate::deque::{Queue, RingQueue};
pub use crate::error::{QueueError, Result};
