//! Region Buffer Implementation.
//!
//! Backing storage for one guest memory region. A buffer is either allocated
//! zero-filled by the engine (anonymous `mmap` on Unix, so untouched pages cost
//! nothing), adopted from a caller-supplied `Vec`, or borrowed from a raw
//! caller-owned pointer without copying.

use std::slice;

use crate::common::EngineError;

enum Backing {
    /// Anonymous mapping released with `munmap` on drop.
    #[cfg(unix)]
    Mapped,
    /// Heap storage owned by the buffer.
    Owned { _storage: Vec<u8> },
    /// Caller-owned storage; never freed here.
    Borrowed,
}

/// Raw byte storage of a memory region.
pub struct RegionBuffer {
    ptr: *mut u8,
    size: usize,
    backing: Backing,
}

// SAFETY: the buffer is the only handle through which the engine touches the
// storage, and a borrowed pointer is required to outlive the buffer.
unsafe impl Send for RegionBuffer {}

impl RegionBuffer {
    /// Allocates a zero-filled buffer of `size` bytes.
    ///
    /// # Errors
    ///
    /// [`EngineError::AllocationFailed`] when the host refuses the allocation.
    pub fn zeroed(size: usize) -> Result<Self, EngineError> {
        #[cfg(unix)]
        {
            // SAFETY: an anonymous private mapping with no address hint has no
            // preconditions; failure is reported through MAP_FAILED.
            let ptr = unsafe {
                libc::mmap(
                    std::ptr::null_mut(),
                    size,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                    -1,
                    0,
                )
            };
            if ptr == libc::MAP_FAILED {
                return Err(EngineError::AllocationFailed { size });
            }
            Ok(Self {
                ptr: ptr.cast::<u8>(),
                size,
                backing: Backing::Mapped,
            })
        }

        #[cfg(not(unix))]
        {
            let mut data = Vec::new();
            data.try_reserve_exact(size)
                .map_err(|_| EngineError::AllocationFailed { size })?;
            data.resize(size, 0);
            Ok(Self::from_vec(data))
        }
    }

    /// Adopts `data` as the region contents.
    pub fn from_vec(mut data: Vec<u8>) -> Self {
        let ptr = data.as_mut_ptr();
        let size = data.len();
        Self {
            ptr,
            size,
            backing: Backing::Owned { _storage: data },
        }
    }

    /// Wraps caller-owned memory without copying.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and valid for reads and writes of `size` bytes for
    /// the whole lifetime of the returned buffer, and nothing else may access that
    /// memory while the buffer is alive.
    pub unsafe fn borrowed(ptr: *mut u8, size: usize) -> Self {
        Self {
            ptr,
            size,
            backing: Backing::Borrowed,
        }
    }

    /// Returns the size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` for a zero-sized buffer.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the storage belongs to the caller.
    pub const fn is_borrowed(&self) -> bool {
        matches!(self.backing, Backing::Borrowed)
    }

    /// Views the contents.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `size` bytes for the lifetime of `self`.
        unsafe { slice::from_raw_parts(self.ptr, self.size) }
    }

    /// Views the contents mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` makes the access exclusive.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.size) }
    }
}

impl Drop for RegionBuffer {
    fn drop(&mut self) {
        #[cfg(unix)]
        if matches!(self.backing, Backing::Mapped) {
            // SAFETY: the mapping was created in `zeroed` with this exact size.
            let _ = unsafe { libc::munmap(self.ptr.cast(), self.size) };
        }
    }
}
