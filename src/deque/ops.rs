//! Queue operations over optional handles.
//!
//! These mirror the methods on [`Queue`] for callers that hold a queue which
//! may not exist, for example one whose construction failed. An absent queue
//! or value is reported as [`QueueError::InvalidArgument`] instead of being
//! confused with an empty queue.

use super::Queue;
use crate::error::{QueueError, Result};

pub fn is_empty<T>(queue: Option<&Queue<T>>) -> Result<bool> {
    queue.map(Queue::is_empty).ok_or(QueueError::InvalidArgument)
}

pub fn is_full<T>(queue: Option<&Queue<T>>) -> Result<bool> {
    queue.map(Queue::is_full).ok_or(QueueError::InvalidArgument)
}

pub fn front<T>(queue: Option<&Queue<T>>) -> Option<&T> {
    queue.and_then(Queue::front)
}

pub fn back<T>(queue: Option<&Queue<T>>) -> Option<&T> {
    queue.and_then(Queue::back)
}

pub fn enqueue<T>(queue: Option<&mut Queue<T>>, elem: Option<T>) -> Result<usize> {
    match (queue, elem) {
        (Some(queue), Some(elem)) => queue.enqueue(elem),
        _ => Err(QueueError::InvalidArgument),
    }
}

pub fn dequeue<T>(queue: Option<&mut Queue<T>>) -> Result<usize> {
    queue.ok_or(QueueError::InvalidArgument)?.dequeue()
}

pub fn clear<T>(queue: Option<&mut Queue<T>>) -> Result<usize> {
    queue.map(Queue::clear).ok_or(QueueError::InvalidArgument)
}

/// Releases every remaining element and then the queue itself, returning
/// how many elements were released.
pub fn destroy<T>(queue: Option<Queue<T>>) -> Result<usize> {
    let mut queue = queue.ok_or(QueueError::InvalidArgument)?;
    Ok(queue.clear())
}
