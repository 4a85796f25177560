mod alloc;
mod raw_array;

pub use self::alloc::{dealloc, try_alloc};
pub use self::raw_array::RawArray;
