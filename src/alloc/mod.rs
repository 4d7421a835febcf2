/*!
Allocation types and traits.
*/
use std::alloc::{self as rust_alloc, Layout};
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use std::slice;

use libc;
use encoding::Unit;

/**
Abstracts over different memory allocators.

In practice, this will be implemented by a marker type (which are not intended to actually be instantiated anywhere).
*/
pub trait Allocator {
    /**
    The type of errors that can occur during allocation.
    */
    type AllocError: AllocatorError + 'static;

    /**
    Allocate the specified number of zeroed bytes, with the specified alignment.

    `bytes` is never zero.
    */
    fn alloc_zeroed(bytes: usize, align: usize) -> Result<NonNull<u8>, Self::AllocError>;

    /**
    Free an allocation.

    `bytes` and `align` are exactly the values the allocation was made with.
    */
    unsafe fn free(ptr: NonNull<u8>, bytes: usize, align: usize);

    /**
    Returns a string which can be used to uniquely identify this allocator in debug output.

    This string should *preferably* be short, reasonably evocative, unique, and a single `Camelword`, although nothing will break if this is not done.
    */
    fn debug_prefix() -> &'static str;
}

/**
This trait defines the required interface for allocation errors.
*/
pub trait AllocatorError: StdError {
    /**
    Construct an error indicating that an overflow occurred when computing the size of the allocation.
    */
    fn overflow() -> Self;
}

/**
A general allocation error.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AllocError {
    Failed,
    CannotAlign,
    SizeOverflow,
}

impl AllocatorError for AllocError {
    fn overflow() -> Self {
        AllocError::SizeOverflow
    }
}

impl Display for AllocError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            AllocError::Failed => "failed to allocate memory",
            AllocError::CannotAlign => "cannot satisfy requested alignment",
            AllocError::SizeOverflow => "overflow while computing size",
        };
        fmt.write_str(msg)
    }
}

impl StdError for AllocError {}

/**
Represents the C runtime heap allocator.
*/
pub enum Malloc {}

impl Allocator for Malloc {
    type AllocError = AllocError;

    fn alloc_zeroed(bytes: usize, align: usize) -> Result<NonNull<u8>, AllocError> {
        // A conservative guess.
        if align > mem::align_of::<usize>() {
            return Err(AllocError::CannotAlign);
        }

        let ptr = unsafe { libc::calloc(bytes, 1) };
        match NonNull::new(ptr as *mut u8) {
            Some(ptr) => Ok(ptr),
            None => {
                debug!("calloc failed for {} bytes", bytes);
                Err(AllocError::Failed)
            }
        }
    }

    unsafe fn free(ptr: NonNull<u8>, _bytes: usize, _align: usize) {
        libc::free(ptr.as_ptr() as *mut libc::c_void);
    }

    fn debug_prefix() -> &'static str { "C" }
}

/**
Represents the Rust runtime heap allocator.
*/
pub enum Rust {}

impl Allocator for Rust {
    type AllocError = AllocError;

    fn alloc_zeroed(bytes: usize, align: usize) -> Result<NonNull<u8>, AllocError> {
        let layout = Layout::from_size_align(bytes, align)
            .map_err(|_| AllocError::CannotAlign)?;

        let ptr = unsafe { rust_alloc::alloc_zeroed(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => Ok(ptr),
            None => {
                debug!("global allocator failed for {:?}", layout);
                Err(AllocError::Failed)
            }
        }
    }

    unsafe fn free(ptr: NonNull<u8>, bytes: usize, align: usize) {
        let layout = Layout::from_size_align_unchecked(bytes, align);
        rust_alloc::dealloc(ptr.as_ptr(), layout);
    }

    fn debug_prefix() -> &'static str { "R" }
}

/**
An exclusively owned, fixed-length, heap-allocated array of units.

The array is zeroed on allocation, and released through `A` when dropped.
*/
pub struct HeapBuf<U, A> where U: Unit, A: Allocator {
    ptr: NonNull<U>,
    cap: usize,
    _marker: PhantomData<(U, A)>,
}

impl<U, A> HeapBuf<U, A> where U: Unit, A: Allocator {
    /**
    Allocate a zeroed array of `cap` units.

    # Failure

    Fails if `cap` is zero, if the size in bytes overflows, or if the allocator fails.
    */
    pub fn zeroed(cap: usize) -> Result<Self, A::AllocError> {
        let bytes = cap.checked_mul(mem::size_of::<U>())
            .ok_or_else(A::AllocError::overflow)?;
        if bytes == 0 {
            return Err(A::AllocError::overflow());
        }

        let ptr = A::alloc_zeroed(bytes, mem::align_of::<U>())?;
        Ok(HeapBuf {
            ptr: ptr.cast(),
            cap: cap,
            _marker: PhantomData,
        })
    }

    /**
    Allocate an array holding a copy of `units`.
    */
    pub fn from_units(units: &[U]) -> Result<Self, A::AllocError> {
        let mut buf = Self::zeroed(units.len())?;
        buf.as_mut_slice().copy_from_slice(units);
        Ok(buf)
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn as_slice(&self) -> &[U] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [U] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }
}

impl<U, A> Drop for HeapBuf<U, A> where U: Unit, A: Allocator {
    fn drop(&mut self) {
        unsafe {
            A::free(self.ptr.cast(), self.cap * mem::size_of::<U>(), mem::align_of::<U>());
        }
    }
}

unsafe impl<U, A> Send for HeapBuf<U, A> where U: Unit + Send, A: Allocator {}
unsafe impl<U, A> Sync for HeapBuf<U, A> where U: Unit + Sync, A: Allocator {}
