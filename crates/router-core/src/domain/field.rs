//! Chunked buffer-chain payloads.
//!
//! A [`Field`] stores an immutable byte string as a chain of fixed-capacity
//! buffers allocated from a shared [`BufferPool`], so large payloads never
//! require a large contiguous allocation. The [`FieldCursor`] is the
//! sanctioned reader: it walks the chain sequentially and makes buffer
//! boundaries invisible to the caller.
//!
//! Fields are independent of the registry and may be built on any thread;
//! only the pool's free list is shared, behind a mutex.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// One fixed-capacity buffer from the pool.
///
/// `fill` bytes at the front are valid payload; the rest is writable space.
pub struct Buffer {
    data: Box<[u8]>,
    fill: usize,
}

impl Buffer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            fill: 0,
        }
    }

    /// Total capacity of this buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of valid payload bytes.
    pub fn fill(&self) -> usize {
        self.fill
    }

    /// Remaining writable space after the filled region.
    fn cursor(&mut self) -> &mut [u8] {
        &mut self.data[self.fill..]
    }

    /// Mark `count` more bytes at the cursor as filled.
    fn insert(&mut self, count: usize) {
        debug_assert!(self.fill + count <= self.data.len());
        self.fill += count;
    }

    /// The valid payload bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.fill]
    }

    fn reset(&mut self) {
        self.fill = 0;
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("capacity", &self.data.len())
            .field("fill", &self.fill)
            .finish()
    }
}

struct PoolInner {
    capacity: usize,
    free: Mutex<Vec<Buffer>>,
}

/// Shared allocator of fixed-capacity buffers with free-list reuse.
///
/// Cheap to clone; all clones share one free list. Usable from any thread.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

impl BufferPool {
    /// Create a pool whose buffers all have `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity chain cannot hold data.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "buffer capacity must be non-zero");
        Self {
            inner: Arc::new(PoolInner {
                capacity,
                free: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Fixed capacity of every buffer in this pool.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Take an empty buffer, reusing a freed one when available.
    pub fn take(&self) -> Buffer {
        if let Some(buf) = self.inner.free.lock().pop() {
            return buf;
        }
        Buffer::with_capacity(self.inner.capacity)
    }

    fn put_back(&self, mut buf: Buffer) {
        buf.reset();
        self.inner.free.lock().push(buf);
    }

    /// Number of buffers currently parked on the free list.
    pub fn free_count(&self) -> usize {
        self.inner.free.lock().len()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity", &self.inner.capacity)
            .field("free", &self.free_count())
            .finish()
    }
}

/// An immutable byte string chunked across a chain of pooled buffers.
///
/// Exactly `ceil(len / capacity)` buffers; the final buffer may be partial.
/// No buffer is ever shared between two fields. Dropping the field returns
/// every buffer to its pool.
pub struct Field {
    buffers: Vec<Buffer>,
    length: usize,
    pool: BufferPool,
}

impl Field {
    /// Chunk `text` across pooled buffers. Returns `None` for empty input;
    /// an empty payload is not a field.
    pub fn from_bytes(pool: &BufferPool, text: &[u8]) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        let capacity = pool.capacity();
        let mut buffers = Vec::with_capacity(text.len().div_ceil(capacity));
        let mut rest = text;
        while !rest.is_empty() {
            let mut buf = pool.take();
            let copy = rest.len().min(buf.capacity());
            buf.cursor()[..copy].copy_from_slice(&rest[..copy]);
            buf.insert(copy);
            rest = &rest[copy..];
            buffers.push(buf);
        }

        Some(Self {
            buffers,
            length: text.len(),
            pool: pool.clone(),
        })
    }

    /// Total payload length across the chain.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always false: empty input never constructs a field.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of buffers in the chain.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// The buffers of the chain, in order.
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// A sequential reader over the whole span.
    pub fn cursor(&self) -> FieldCursor<'_> {
        FieldCursor {
            buffers: &self.buffers,
            index: 0,
            offset: 0,
            remaining: self.length,
        }
    }

    /// Materialize the payload contiguously.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.length];
        let mut cursor = self.cursor();
        let copied = cursor.read(&mut out);
        debug_assert_eq!(copied, self.length);
        out
    }
}

impl Drop for Field {
    fn drop(&mut self) {
        for buf in self.buffers.drain(..) {
            self.pool.put_back(buf);
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("length", &self.length)
            .field("buffers", &self.buffers.len())
            .finish()
    }
}

/// Sequential reader over a field's buffer chain.
///
/// Reads spanning two buffers are invisible to the caller.
pub struct FieldCursor<'a> {
    buffers: &'a [Buffer],
    index: usize,
    offset: usize,
    remaining: usize,
}

impl<'a> FieldCursor<'a> {
    /// Bytes left to consume.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Copy up to `out.len()` bytes into `out`, crossing buffer boundaries
    /// as needed. Returns the number of bytes copied.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let mut copied = 0;
        while copied < out.len() && self.remaining > 0 {
            let buf = &self.buffers[self.index];
            let avail = buf.fill() - self.offset;
            if avail == 0 {
                self.index += 1;
                self.offset = 0;
                continue;
            }
            let take = avail.min(out.len() - copied);
            out[copied..copied + take].copy_from_slice(&buf.bytes()[self.offset..self.offset + take]);
            self.offset += take;
            self.remaining -= take;
            copied += take;
        }
        copied
    }
}

impl Iterator for FieldCursor<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        if self.read(&mut byte) == 1 {
            Some(byte[0])
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
