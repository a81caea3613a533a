//! GPU buffer abstractions
//!
//! Growable buffers for per-frame geometry. The sizing policy lives in
//! [`BufferCapacity`] so it can be reasoned about without a device.

use crate::context::WgpuContext;

/// Capacity of a growable buffer: grow only when too small, by 1.5x of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity {
    bytes: u64,
    generation: u32,
}

impl BufferCapacity {
    /// Start with an initial capacity in bytes.
    pub const fn new(bytes: u64) -> Self {
        Self {
            bytes,
            generation: 0,
        }
    }

    /// Current capacity in bytes.
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Number of reallocations so far. Every reallocation yields a new buffer.
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether `required` bytes fit without reallocating.
    pub const fn fits(&self, required: u64) -> bool {
        required <= self.bytes
    }

    /// Size of the GPU allocation backing this capacity.
    ///
    /// Rounded up to the copy alignment, so a padded upload of any `required`
    /// that fits also fits the allocation.
    pub const fn allocation_bytes(&self) -> u64 {
        align_to_copy(self.bytes)
    }

    /// Grow to fit `required` bytes.
    ///
    /// Returns the new capacity if a reallocation is needed, `None` otherwise.
    /// Capacity never shrinks.
    pub fn grow(&mut self, required: u64) -> Option<u64> {
        if self.fits(required) {
            return None;
        }
        self.bytes = grown_capacity(required);
        self.generation += 1;
        Some(self.bytes)
    }
}

/// Capacity allocated for a request of `required` bytes: `floor(1.5 * required)`.
pub const fn grown_capacity(required: u64) -> u64 {
    required + required / 2
}

/// Round `bytes` up to the queue copy alignment.
pub const fn align_to_copy(bytes: u64) -> u64 {
    let align = wgpu::COPY_BUFFER_ALIGNMENT;
    bytes.div_ceil(align) * align
}

/// A GPU buffer that is reallocated when a frame needs more room.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: BufferCapacity,
    usage: wgpu::BufferUsages,
    label: &'static str,
}

impl DynamicBuffer {
    /// Create a buffer with `bytes` of initial capacity.
    ///
    /// `usage` is combined with `COPY_DST` so the buffer can be written from the queue.
    pub fn new(
        ctx: &WgpuContext,
        bytes: u64,
        usage: wgpu::BufferUsages,
        label: &'static str,
    ) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let capacity = BufferCapacity::new(bytes);
        Self {
            buffer: allocate(ctx, capacity.allocation_bytes(), usage, label),
            capacity,
            usage,
            label,
        }
    }

    /// A vertex buffer holding `count` vertices of `stride` bytes.
    pub fn vertices(ctx: &WgpuContext, count: u64, stride: u64, label: &'static str) -> Self {
        Self::new(ctx, count * stride, wgpu::BufferUsages::VERTEX, label)
    }

    /// An index buffer holding `count` 16-bit indices.
    pub fn indices_u16(ctx: &WgpuContext, count: u64, label: &'static str) -> Self {
        Self::new(
            ctx,
            count * std::mem::size_of::<u16>() as u64,
            wgpu::BufferUsages::INDEX,
            label,
        )
    }

    /// Make sure `required` bytes fit, replacing the buffer if they don't.
    ///
    /// `required` is the unpadded size of the data; its padded upload always
    /// fits afterwards. Returns `true` if the buffer was reallocated. The
    /// previous buffer is released here; wgpu keeps it alive until submitted
    /// work using it is done.
    pub fn reserve(&mut self, ctx: &WgpuContext, required: u64) -> bool {
        let previous = self.capacity.bytes();
        let Some(bytes) = self.capacity.grow(required) else {
            return false;
        };

        tracing::debug!(
            "growing {} from {} to {} bytes (required {})",
            self.label,
            previous,
            bytes,
            required
        );
        self.buffer = allocate(ctx, self.capacity.allocation_bytes(), self.usage, self.label);
        true
    }

    /// Upload `bytes` at `offset`. The data must already fit.
    pub fn write(&self, ctx: &WgpuContext, offset: u64, bytes: &[u8]) {
        debug_assert!(offset + bytes.len() as u64 <= self.capacity.allocation_bytes());
        ctx.write_buffer(&self.buffer, offset, bytes);
    }

    /// Get the raw wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Capacity bookkeeping for this buffer.
    pub fn capacity(&self) -> BufferCapacity {
        self.capacity
    }

    /// Create a buffer slice for the entire buffer.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

fn allocate(
    ctx: &WgpuContext,
    bytes: u64,
    usage: wgpu::BufferUsages,
    label: &str,
) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: bytes,
        usage,
        mapped_at_creation: false,
    })
}
