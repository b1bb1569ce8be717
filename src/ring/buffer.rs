use super::RingError;

/// Bounded circular byte storage addressed via wraparound head/tail indices.
///
/// Pure single-threaded logic: callers are responsible for mutual exclusion
/// (see [`SharedRing`](super::SharedRing)). `count` is the authoritative
/// occupancy measure, so the full capacity is usable and full/empty are never
/// ambiguous.
pub struct RingBuffer {
    buf: Box<[u8]>,
    capacity: usize,
    head: usize,
    tail: usize,
    count: usize,
}

impl RingBuffer {
    /// Allocates storage of exactly `capacity` bytes.
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity { capacity });
        }

        let mut buf = Vec::new();
        if buf.try_reserve_exact(capacity).is_err() {
            return Err(RingError::AllocFailed { capacity });
        }
        buf.resize(capacity, 0);

        Ok(Self {
            buf: buf.into_boxed_slice(),
            capacity,
            head: 0,
            tail: 0,
            count: 0,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn used(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn available(&self) -> usize {
        self.capacity - self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Copies all of `data` in at the write index, wrapping modulo capacity.
    ///
    /// All-or-nothing: if the remaining space cannot hold every byte the
    /// buffer is left unchanged.
    #[inline]
    pub fn push(&mut self, data: &[u8]) -> Result<usize, RingError> {
        if data.len() > self.available() {
            return Err(RingError::OutOfSpace {
                requested: data.len(),
                available: self.available(),
            });
        }

        self.copy_in(data);
        self.tail = (self.tail + data.len()) % self.capacity;
        self.count += data.len();
        Ok(data.len())
    }

    /// Removes up to `min(max_len, used())` bytes starting at the read index.
    ///
    /// Never blocks: an empty buffer yields an empty vec. Blocking is the
    /// caller's concern.
    #[inline]
    pub fn pop(&mut self, max_len: usize) -> Vec<u8> {
        let n = max_len.min(self.count);
        let mut out = vec![0u8; n];
        self.copy_out(&mut out);
        self.head = (self.head + n) % self.capacity;
        self.count -= n;
        out
    }

    // The wraparound arithmetic lives in these two helpers: a transfer is at
    // most two contiguous segments, one up to the end of storage and one
    // from the start. Caller has already checked that the bytes fit.

    fn copy_in(&mut self, data: &[u8]) {
        let first = data.len().min(self.capacity - self.tail);
        self.buf[self.tail..self.tail + first].copy_from_slice(&data[..first]);
        self.buf[..data.len() - first].copy_from_slice(&data[first..]);
    }

    fn copy_out(&self, out: &mut [u8]) {
        let total = out.len();
        let first = total.min(self.capacity - self.head);
        out[..first].copy_from_slice(&self.buf[self.head..self.head + first]);
        out[first..].copy_from_slice(&self.buf[..total - first]);
    }
}
