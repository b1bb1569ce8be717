use super::error::ControlError;
use super::port::TransferPort;
use crate::ring::SharedRing;
use std::sync::Arc;
use tracing::trace;

/// Command identifiers of the control protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Opcode {
    /// Replace the buffer with a fresh one of the requested capacity.
    SetSize = 1,
    /// Copy bytes into the buffer, all or nothing.
    Push = 2,
    /// Copy bytes out of the buffer, blocking while it is empty.
    Pop = 3,
}

impl Opcode {
    pub fn from_raw(raw: u32) -> Option<Opcode> {
        match raw {
            1 => Some(Opcode::SetSize),
            2 => Some(Opcode::Push),
            3 => Some(Opcode::Pop),
            _ => None,
        }
    }
}

/// Validates control requests, stages payloads across the boundary port and
/// dispatches them to the shared ring.
///
/// Every request carries the shared `{ length, data }` shape: `length` is
/// the capacity (SetSize), byte count (Push) or maximum byte count (Pop),
/// and the data region is only reachable through the [`TransferPort`].
#[derive(Clone)]
pub struct ControlHandler {
    ring: Arc<SharedRing>,
}

impl ControlHandler {
    pub fn new(ring: Arc<SharedRing>) -> Self {
        Self { ring }
    }

    pub fn ring(&self) -> &SharedRing {
        &self.ring
    }

    /// Entry point for one raw request. Unknown opcodes fail `Unsupported`
    /// before the length is examined. Returns the operation's byte count
    /// (zero for SetSize).
    pub fn handle(
        &self,
        opcode: u32,
        length: i32,
        port: &mut dyn TransferPort,
    ) -> Result<i32, ControlError> {
        match Opcode::from_raw(opcode) {
            Some(Opcode::SetSize) => self.set_size(length).map(|()| 0),
            Some(Opcode::Push) => self.push(length, port),
            Some(Opcode::Pop) => self.pop(length, port),
            None => Err(ControlError::Unsupported { opcode }),
        }
    }

    /// Installs a fresh buffer of `capacity` bytes, discarding any current
    /// contents.
    pub fn set_size(&self, capacity: i32) -> Result<(), ControlError> {
        if capacity <= 0 {
            return Err(ControlError::InvalidArgument { length: capacity });
        }
        self.ring.resize(capacity as usize)?;
        Ok(())
    }

    /// Stages exactly `length` bytes from the caller region into scratch
    /// memory, then pushes them in one shot. A staging fault leaves the
    /// buffer untouched.
    pub fn push(&self, length: i32, port: &mut dyn TransferPort) -> Result<i32, ControlError> {
        if length <= 0 {
            return Err(ControlError::InvalidArgument { length });
        }

        let mut scratch = vec![0u8; length as usize];
        port.copy_in(&mut scratch)?;

        let written = self.ring.push(&scratch)?;
        trace!(written, "push completed");
        Ok(written as i32)
    }

    /// Removes up to `length` bytes, blocking while the buffer is empty,
    /// then copies them to the caller region and overwrites the request's
    /// length field with the actual count, which may be less than requested.
    ///
    /// A fault while copying out happens after the bytes have already left
    /// the buffer: the popped data is lost and no undo is attempted.
    pub fn pop(&self, length: i32, port: &mut dyn TransferPort) -> Result<i32, ControlError> {
        if length <= 0 {
            return Err(ControlError::InvalidArgument { length });
        }

        let data = self.ring.pop(length as usize)?;
        if !data.is_empty() {
            port.copy_out(&data)?;
            port.put_len(data.len() as i32)?;
        }
        trace!(popped = data.len(), "pop completed");
        Ok(data.len() as i32)
    }
}
