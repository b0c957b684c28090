//! GPU-bound element buffers with dirty-range tracking
//!
//! A [`Buffer`] owns its element data on the CPU side. The GPU collaborator
//! uploads the dirty byte range and clears it; the pipeline compilers only
//! ever read. Buffers are never resized implicitly: changing the element
//! count requires creating a new buffer (and hence a new geometry).

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use bytemuck::Pod;

use crate::ResourceError;

bitflags! {
    /// How a buffer may be bound, bitwise-composable
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BufferUsages: u8 {
        /// Bindable as a vertex attribute buffer
        const VERTEX = 1 << 0;
        /// Bindable as an index buffer
        const INDEX = 1 << 1;
        /// Bindable as a (read-only or read-write) storage buffer
        const STORAGE = 1 << 2;
        /// Bindable as a uniform buffer
        const UNIFORM = 1 << 3;
    }
}

/// Process-unique identifier of a buffer
///
/// Pass descriptors reference buffers by handle; the GPU collaborator
/// resolves handles to device-side allocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Raw element data destined for the GPU
pub struct Buffer {
    handle: BufferHandle,
    data: Vec<u8>,
    stride: usize,
    usage: BufferUsages,
    /// Dirty byte range as (offset, len); cleared by whoever uploads
    dirty: Option<(usize, usize)>,
}

impl Buffer {
    /// Create a buffer from a slice of elements
    ///
    /// The whole buffer starts dirty so the first upload covers everything.
    pub fn from_slice<T: Pod>(items: &[T], usage: BufferUsages) -> Self {
        let data: Vec<u8> = bytemuck::cast_slice(items).to_vec();
        let nbytes = data.len();
        Self {
            handle: BufferHandle(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed)),
            data,
            stride: std::mem::size_of::<T>(),
            usage,
            dirty: Some((0, nbytes)),
        }
    }

    /// The process-unique handle of this buffer
    #[inline]
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Usage flags the buffer was created with
    #[inline]
    pub fn usage(&self) -> BufferUsages {
        self.usage
    }

    /// Size in bytes
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.data.len()
    }

    /// Byte stride of one element
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of elements
    #[inline]
    pub fn nitems(&self) -> usize {
        if self.stride == 0 { 0 } else { self.data.len() / self.stride }
    }

    /// View the contents as a typed slice
    ///
    /// The target type's size must evenly divide the buffer size.
    pub fn as_slice<T: Pod>(&self) -> &[T] {
        bytemuck::cast_slice(&self.data)
    }

    /// Overwrite elements starting at `item_offset`, marking the range dirty
    ///
    /// Fails if the write would extend past the end of the buffer.
    pub fn write<T: Pod>(&mut self, item_offset: usize, items: &[T]) -> Result<(), ResourceError> {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        let offset = item_offset * std::mem::size_of::<T>();
        let end = offset + bytes.len();
        if end > self.data.len() {
            return Err(ResourceError::OutOfBounds {
                offset,
                len: bytes.len(),
                capacity: self.data.len(),
            });
        }
        self.data[offset..end].copy_from_slice(bytes);
        self.mark_dirty(offset, bytes.len());
        Ok(())
    }

    /// Mark a byte range as needing upload, merging with any existing range
    pub fn mark_dirty(&mut self, offset: usize, len: usize) {
        let end = (offset + len).min(self.data.len());
        let offset = offset.min(self.data.len());
        self.dirty = match self.dirty {
            None => Some((offset, end - offset)),
            Some((o, l)) => {
                let merged_start = o.min(offset);
                let merged_end = (o + l).max(end);
                Some((merged_start, merged_end - merged_start))
            }
        };
    }

    /// The pending dirty byte range, if any
    #[inline]
    pub fn dirty_range(&self) -> Option<(usize, usize)> {
        self.dirty
    }

    /// Take and clear the dirty range; called by the step performing the upload
    pub fn take_dirty_range(&mut self) -> Option<(usize, usize)> {
        self.dirty.take()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("handle", &self.handle)
            .field("nbytes", &self.data.len())
            .field("stride", &self.stride)
            .field("usage", &self.usage)
            .field("dirty", &self.dirty)
            .finish()
    }
}
