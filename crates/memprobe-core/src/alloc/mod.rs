//! Raw allocation seam and the bounded allocation cycler.
//!
//! - [`RawAllocator`]: request/release of untyped blocks.
//! - [`LibcAllocator`]: platform `malloc`/`free`.
//! - [`SystemAllocator`]: the Rust global allocator.
//! - [`AllocationPool`]: fixed-capacity ring of outstanding blocks.
//! - [`AllocationCycler`]: timed allocation with periodic bulk drain.

pub mod cycler;
pub mod pool;

pub use cycler::{AllocationCycler, CyclerStats};
pub use pool::AllocationPool;

use std::alloc::Layout;
use std::ptr::NonNull;

/// Opaque handle to one raw allocation.
///
/// Carries the requested size so allocators that need it on release
/// (Rust's global allocator) can rebuild the layout.
#[derive(Debug, PartialEq, Eq)]
pub struct Block {
    ptr: NonNull<u8>,
    size: usize,
}

impl Block {
    /// Wrap a pointer obtained from an allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live allocation of at least `size` bytes that the
    /// allocator this block is later released to can free.
    #[must_use]
    pub unsafe fn from_raw(ptr: NonNull<u8>, size: usize) -> Self {
        Self { ptr, size }
    }

    #[must_use]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    #[must_use]
    pub fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Allocator interface consumed by the cycler.
///
/// No alignment, arena, or typed-allocation guarantees are assumed.
pub trait RawAllocator {
    /// Request a block of `size` bytes. `None` means the allocator failed.
    fn request(&mut self, size: usize) -> Option<Block>;

    /// Return a block.
    ///
    /// # Safety
    ///
    /// `block` must have been produced by `request` on this same allocator
    /// and must not have been released before.
    unsafe fn release(&mut self, block: Block);
}

/// Platform C allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibcAllocator;

impl RawAllocator for LibcAllocator {
    fn request(&mut self, size: usize) -> Option<Block> {
        // SAFETY: malloc has no preconditions; a null return is mapped to None.
        let raw = unsafe { libc::malloc(size) };
        NonNull::new(raw.cast::<u8>()).map(|ptr| Block { ptr, size })
    }

    unsafe fn release(&mut self, block: Block) {
        // SAFETY: caller guarantees the block came from malloc above.
        unsafe { libc::free(block.ptr.as_ptr().cast()) }
    }
}

/// Rust global allocator with byte alignment.
///
/// Zero-size requests are undefined for `GlobalAlloc`, so they are reported
/// as failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl RawAllocator for SystemAllocator {
    fn request(&mut self, size: usize) -> Option<Block> {
        if size == 0 {
            return None;
        }
        let layout = Layout::from_size_align(size, 1).ok()?;
        // SAFETY: layout has non-zero size.
        let raw = unsafe { std::alloc::alloc(layout) };
        NonNull::new(raw).map(|ptr| Block { ptr, size })
    }

    unsafe fn release(&mut self, block: Block) {
        // SAFETY: the block was allocated by `request` with this exact layout,
        // which was valid then and is rebuilt from the same size.
        unsafe {
            let layout = Layout::from_size_align_unchecked(block.size, 1);
            std::alloc::dealloc(block.ptr.as_ptr(), layout);
        }
    }
}
