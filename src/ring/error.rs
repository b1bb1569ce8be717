use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("invalid capacity {capacity}: must be positive")]
    InvalidCapacity { capacity: usize },

    #[error("failed to allocate {capacity} bytes of ring storage")]
    AllocFailed { capacity: usize },

    #[error("not enough space in ring buffer: requested {requested} bytes, available {available} bytes")]
    OutOfSpace { requested: usize, available: usize },

    #[error("no buffer installed, resize first")]
    Uninitialized,

    #[error("wait for data was interrupted")]
    Interrupted,
}
