use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// A required queue or value is absent, or the queue has nothing to remove.
    InvalidArgument,
    /// The allocator could not provide memory for an element or its data.
    AllocFailed,
    /// Enqueue attempted while the queue is full.
    CapacityExceeded,
}

pub type Result<T> = std::result::Result<T, QueueError>;

impl QueueError {
    /// Integer status code for callers that report errors as negative numbers.
    pub fn code(self) -> i32 {
        match self {
            QueueError::InvalidArgument => -1,
            QueueError::AllocFailed => -2,
            QueueError::CapacityExceeded => -3,
        }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            QueueError::InvalidArgument => "invalid argument",
            QueueError::AllocFailed => "memory allocation failed",
            QueueError::CapacityExceeded => "queue is full",
        };
        write!(f, "{:?}; {}", self, msg)
    }
}

impl std::error::Error for QueueError {}
