use super::port::PortFault;
use crate::ring::RingError;
use thiserror::Error;

/// Caller-facing outcome of one control request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("invalid length argument {length}: must be positive")]
    InvalidArgument { length: i32 },

    #[error("out of memory allocating a {capacity} byte buffer")]
    OutOfMemory { capacity: usize },

    #[error("push of {requested} bytes exceeds remaining space of {available} bytes")]
    OutOfSpace { requested: usize, available: usize },

    #[error("no buffer installed, issue SetSize first")]
    Uninitialized,

    #[error("blocked pop was interrupted")]
    Interrupted,

    #[error("boundary copy failed")]
    Fault,

    #[error("unsupported opcode {opcode}")]
    Unsupported { opcode: u32 },
}

impl From<RingError> for ControlError {
    fn from(err: RingError) -> Self {
        match err {
            // Only a zero capacity reaches this arm: the handler has already
            // rejected non-positive lengths, which bounds capacities to i32.
            RingError::InvalidCapacity { capacity } => ControlError::InvalidArgument {
                length: capacity as i32,
            },
            RingError::AllocFailed { capacity } => ControlError::OutOfMemory { capacity },
            RingError::OutOfSpace {
                requested,
                available,
            } => ControlError::OutOfSpace {
                requested,
                available,
            },
            RingError::Uninitialized => ControlError::Uninitialized,
            RingError::Interrupted => ControlError::Interrupted,
        }
    }
}

impl From<PortFault> for ControlError {
    fn from(_: PortFault) -> Self {
        ControlError::Fault
    }
}
