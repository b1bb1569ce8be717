use thiserror::Error;

/// Failure of a boundary copy. Transfers are all-or-nothing: a failed call
/// reports nothing about partial progress because there is none.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("boundary copy between caller memory and scratch buffer failed")]
pub struct PortFault;

/// Copies request/response payloads between caller-owned memory and the
/// protocol's scratch buffers.
///
/// The concrete transport lives outside the core; the handler only assumes
/// that each call either fully succeeds or fails with [`PortFault`].
pub trait TransferPort {
    /// Fill `dst` from the caller's source region.
    fn copy_in(&mut self, dst: &mut [u8]) -> Result<(), PortFault>;

    /// Write `src` into the caller's destination region.
    fn copy_out(&mut self, src: &[u8]) -> Result<(), PortFault>;

    /// Overwrite the length field of the caller's request with the actual
    /// byte count of the response.
    fn put_len(&mut self, len: i32) -> Result<(), PortFault>;
}

/// In-process [`TransferPort`] over a plain byte buffer, used by the
/// binaries and tests. The `fail_*` switches simulate a faulting boundary.
#[derive(Debug, Default)]
pub struct MemPort {
    pub bytes: Vec<u8>,
    pub reported_len: Option<i32>,
    pub fail_copy_in: bool,
    pub fail_copy_out: bool,
    pub fail_put_len: bool,
}

impl MemPort {
    /// Port backed by a caller region already holding `bytes` (push side).
    pub fn source(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            ..Self::default()
        }
    }

    /// Empty port for receiving a response payload (pop side).
    pub fn sink() -> Self {
        Self::default()
    }
}

impl TransferPort for MemPort {
    fn copy_in(&mut self, dst: &mut [u8]) -> Result<(), PortFault> {
        if self.fail_copy_in || dst.len() > self.bytes.len() {
            return Err(PortFault);
        }
        dst.copy_from_slice(&self.bytes[..dst.len()]);
        Ok(())
    }

    fn copy_out(&mut self, src: &[u8]) -> Result<(), PortFault> {
        if self.fail_copy_out {
            return Err(PortFault);
        }
        self.bytes = src.to_vec();
        Ok(())
    }

    fn put_len(&mut self, len: i32) -> Result<(), PortFault> {
        if self.fail_put_len {
            return Err(PortFault);
        }
        self.reported_len = Some(len);
        Ok(())
    }
}
