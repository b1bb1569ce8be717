pub mod buffer;
pub mod error;
pub mod shared;

pub use buffer::RingBuffer;
pub use error::RingError;
pub use shared::{RingStatus, SharedRing};
