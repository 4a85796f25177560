mod linked_queue;
mod ring_queue;

pub mod ops;

pub use self::linked_queue::Queue;
pub use self::ring_queue::RingQueue;
