/*!
Temporary converted strings with inline storage.
*/
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::mem;
use std::ptr;
use std::slice;

use alloc::{Allocator, AllocatorError, HeapBuf};
use encoding::{Encoding, Unit, Utf8Unit};
use encoding::conv;
use structure;

enum Storage<U, A, const N: usize> where U: Unit, A: Allocator {
    Empty,
    Inline { buf: [U; N], len: usize },
    Heap { buf: HeapBuf<U, A>, len: usize },
}

/**
A zero-terminated string converted from one encoding into another, held inline when it is short enough and on the heap otherwise.

This exists to cheaply produce the string a foreign interface wants from the string you have: for example, a wide string for a Windows API from a UTF-8 path, or the reverse.  Converting into a `BasicStackString` which lives on the stack costs no allocation at all, unless the result might not fit in `N` units.

A `BasicStackString` is in one of three states:

* *Empty*: nothing has been converted, the last conversion was from a null pointer, or it has been cleared.  `get` returns null.
* *Inline*: the result lives in an `N` unit array inside the value.
* *Heap*: the result lives in an allocation owned by the value.

Which of inline or heap storage is used depends only on the *estimated* size of the result, plus its terminator.  See `conv::required_units`.

Ill-formed input is never an error: each rejected input unit is replaced with `conv::REPLACEMENT_CHARACTER`.  The only thing that can fail is allocation.

# Parameters

`O` is the encoding of the result, `I` the encoding of the input.

`A` allocates heap storage.  *e.g.* `Malloc` for the C runtime heap allocator, and `Rust` for the Rust heap allocator.

`N` is the size of the inline storage, in units of `O`, *including* the terminator.
*/
pub struct BasicStackString<O, I, A, const N: usize>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
{
    storage: Storage<O::Unit, A, N>,
    _marker: PhantomData<I>,
}

impl<O, I, A, const N: usize> BasicStackString<O, I, A, N>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
{
    /**
    The size of the inline storage, in units of `O`.
    */
    pub const BUFFER_SIZE: usize = N;

    /**
    Constructs an empty string.  `get` will return null until something is converted.
    */
    pub fn new() -> Self {
        BasicStackString {
            storage: Storage::Empty,
            _marker: PhantomData,
        }
    }

    /**
    Constructs a string holding the conversion of `units`.
    */
    pub fn from_units(units: &[I::Unit]) -> Result<Self, A::AllocError> {
        let mut s = Self::new();
        s.convert(units)?;
        Ok(s)
    }

    /**
    Constructs a string holding the conversion of a Rust string, whatever `I` is.
    */
    pub fn from_str(s: &str) -> Result<Self, A::AllocError> {
        let mut r = Self::new();
        r.convert_str(s)?;
        Ok(r)
    }

    /**
    Constructs a string holding the conversion of a zero-terminated foreign string.  See `convert_ptr`.
    */
    pub unsafe fn from_ptr(ptr: *const I::FfiUnit) -> Result<Self, A::AllocError> {
        let mut s = Self::new();
        s.convert_ptr(ptr)?;
        Ok(s)
    }

    /**
    Constructs a string holding the conversion of a foreign string range.  See `convert_range`.
    */
    pub unsafe fn from_range(begin: *const I::FfiUnit, end: *const I::FfiUnit) -> Result<Self, A::AllocError> {
        let mut s = Self::new();
        s.convert_range(begin, end)?;
        Ok(s)
    }

    /**
    Replaces the contents of this string with the conversion of `units`, and returns a pointer to the zero-terminated result.

    Any heap storage held is released first.  The result is never null; converting an empty slice produces an empty string.

    # Failure

    This method will fail if the result needs heap storage, and allocating it fails.  The string is left empty.
    */
    pub fn convert(&mut self, units: &[I::Unit]) -> Result<*mut O::FfiUnit, A::AllocError> {
        self.convert_units(units)?;
        Ok(self.get_mut())
    }

    /**
    Replaces the contents of this string with the conversion of a zero-terminated foreign string, and returns a pointer to the zero-terminated result.

    If `ptr` is null, the string is cleared and null is returned.

    # Safety

    `ptr` must either be null, or point to a zero-terminated string which is valid for the duration of the call.
    */
    pub unsafe fn convert_ptr(&mut self, ptr: *const I::FfiUnit) -> Result<*mut O::FfiUnit, A::AllocError> {
        match structure::from_zero_term::<I>(ptr) {
            Some(units) => self.convert(units),
            None => {
                self.clear();
                Ok(ptr::null_mut())
            }
        }
    }

    /**
    Replaces the contents of this string with the conversion of the units in `[begin, end)`, and returns a pointer to the zero-terminated result.

    The range does not need to be zero-terminated.  If `begin` is null, the string is cleared and null is returned.

    # Safety

    `begin` may only be null if `end` is also null.  Otherwise, both must point into the same sequence of units, which must be valid for the duration of the call, with `begin <= end`.
    */
    pub unsafe fn convert_range(&mut self, begin: *const I::FfiUnit, end: *const I::FfiUnit) -> Result<*mut O::FfiUnit, A::AllocError> {
        match structure::from_range::<I>(begin, end) {
            Some(units) => self.convert(units),
            None => {
                self.clear();
                Ok(ptr::null_mut())
            }
        }
    }

    /**
    Replaces the contents of this string with the conversion of a Rust string, and returns a pointer to the zero-terminated result.

    This ignores `I`; the input is always UTF-8.
    */
    pub fn convert_str(&mut self, s: &str) -> Result<*mut O::FfiUnit, A::AllocError> {
        let units = unsafe { slice::from_raw_parts(s.as_ptr() as *const Utf8Unit, s.len()) };
        self.convert_units(units)?;
        Ok(self.get_mut())
    }

    fn convert_units<U>(&mut self, units: &[U]) -> Result<(), A::AllocError> where U: Unit {
        self.clear();

        // +1 for the terminator.
        let space = conv::required_units(U::FORM, <O::Unit as Unit>::FORM, units.len())
            .and_then(|space| space.checked_add(1))
            .ok_or_else(A::AllocError::overflow)?;

        if space <= N {
            let mut buf = [<O::Unit as Unit>::zero(); N];
            let len = conv::transcode_into(units, &mut buf[..]);
            buf[len] = <O::Unit as Unit>::zero();
            self.storage = Storage::Inline { buf: buf, len: len };
        } else {
            trace!("spilling {} units to the heap; inline capacity is {}", space, N);
            let mut buf = HeapBuf::<O::Unit, A>::zeroed(space)?;
            let len = conv::transcode_into(units, buf.as_mut_slice());
            buf.as_mut_slice()[len] = <O::Unit as Unit>::zero();
            self.storage = Storage::Heap { buf: buf, len: len };
        }

        Ok(())
    }

    /**
    Returns the converted, zero-terminated string, or null if nothing has been converted.

    The pointer is invalidated by any subsequent mutation of, or move of, this string.
    */
    pub fn get(&self) -> *const O::FfiUnit {
        match self.as_units_with_term() {
            Some(units) => units.as_ptr() as *const O::FfiUnit,
            None => ptr::null(),
        }
    }

    /**
    The mutable sibling of `get`.
    */
    pub fn get_mut(&mut self) -> *mut O::FfiUnit {
        match self.storage {
            Storage::Empty => ptr::null_mut(),
            Storage::Inline { ref mut buf, .. } => buf.as_mut_ptr() as *mut O::FfiUnit,
            Storage::Heap { ref mut buf, .. } => buf.as_mut_slice().as_mut_ptr() as *mut O::FfiUnit,
        }
    }

    /**
    Returns the units of the converted string, *not* including the terminator, or `None` if nothing has been converted.
    */
    pub fn as_units(&self) -> Option<&[O::Unit]> {
        self.as_units_with_term().map(|units| &units[..units.len() - 1])
    }

    /**
    Returns the units of the converted string, *including* the terminator, or `None` if nothing has been converted.
    */
    pub fn as_units_with_term(&self) -> Option<&[O::Unit]> {
        match self.storage {
            Storage::Empty => None,
            Storage::Inline { ref buf, len } => Some(&buf[..len + 1]),
            Storage::Heap { ref buf, len } => Some(&buf.as_slice()[..len + 1]),
        }
    }

    /**
    Returns the units of the converted string, *not* including the terminator, or `None` if nothing has been converted.
    */
    pub fn as_units_mut(&mut self) -> Option<&mut [O::Unit]> {
        match self.storage {
            Storage::Empty => None,
            Storage::Inline { ref mut buf, len } => Some(&mut buf[..len]),
            Storage::Heap { ref mut buf, len } => Some(&mut buf.as_mut_slice()[..len]),
        }
    }

    /**
    Returns the length of the converted string in units, not including the terminator.  An empty string has length zero.
    */
    pub fn len(&self) -> usize {
        match self.storage {
            Storage::Empty => 0,
            Storage::Inline { len, .. } | Storage::Heap { len, .. } => len,
        }
    }

    /**
    Returns `true` if nothing has been converted; that is, if `get` would return null.

    Note that this is *not* the same as holding an empty string.
    */
    pub fn is_null(&self) -> bool {
        match self.storage {
            Storage::Empty => true,
            _ => false,
        }
    }

    /**
    Returns `true` if the converted string is held in inline storage.
    */
    pub fn uses_inline(&self) -> bool {
        match self.storage {
            Storage::Inline { .. } => true,
            _ => false,
        }
    }

    /**
    Returns `true` if the converted string is held in heap storage.
    */
    pub fn uses_heap(&self) -> bool {
        match self.storage {
            Storage::Heap { .. } => true,
            _ => false,
        }
    }

    /**
    Returns the number of units, including the terminator, the current storage can hold.  This is zero when empty, `BUFFER_SIZE` when inline, and the size of the allocation otherwise.
    */
    pub fn capacity(&self) -> usize {
        match self.storage {
            Storage::Empty => 0,
            Storage::Inline { .. } => Self::BUFFER_SIZE,
            Storage::Heap { ref buf, .. } => buf.capacity(),
        }
    }

    /**
    Releases any heap storage and returns to the empty state.
    */
    pub fn clear(&mut self) {
        self.storage = Storage::Empty;
    }

    /**
    Decodes the converted string into a Rust string, or returns `None` if nothing has been converted.
    */
    pub fn into_string(&self) -> Option<String> {
        self.as_units().map(conv::decode_to_string)
    }

    /**
    Creates a deep copy of this string.

    Inline contents are copied into the new value's own inline storage.  Heap contents are copied into a new allocation just large enough to hold them.

    # Failure

    This method will fail if allocating heap storage fails.
    */
    pub fn try_clone(&self) -> Result<Self, A::AllocError> {
        let storage: Storage<O::Unit, A, N> = match self.storage {
            Storage::Empty => Storage::Empty,
            Storage::Inline { buf, len } => Storage::Inline { buf: buf, len: len },
            Storage::Heap { ref buf, len } => Storage::Heap {
                buf: HeapBuf::<O::Unit, A>::from_units(&buf.as_slice()[..len + 1])?,
                len: len,
            },
        };

        Ok(BasicStackString {
            storage: storage,
            _marker: PhantomData,
        })
    }

    /**
    Replaces the contents of this string with a deep copy of `other`.

    Any heap storage held is released first.

    # Failure

    This method will fail if allocating heap storage fails.  The string is left empty.
    */
    pub fn assign(&mut self, other: &Self) -> Result<(), A::AllocError> {
        self.clear();
        *self = other.try_clone()?;
        Ok(())
    }

    /**
    Exchanges the contents of two strings.

    Heap storage changes hands without being copied; inline storage is copied between the two values.
    */
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.storage, &mut other.storage);
    }
}

impl<O, I, A, const N: usize> Clone for BasicStackString<O, I, A, N>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
{
    fn clone(&self) -> Self {
        self.try_clone().expect("could not allocate StackString")
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source).expect("could not allocate StackString")
    }
}

impl<O, I, A, const N: usize> Debug for BasicStackString<O, I, A, N>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.into_string() {
            Some(s) => write!(fmt, "{}{}{:?}", O::debug_prefix(), A::debug_prefix(), s),
            None => write!(fmt, "{}{}null", O::debug_prefix(), A::debug_prefix()),
        }
    }
}

impl<O, I, A, const N: usize> Default for BasicStackString<O, I, A, N>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<O, I, A, const N: usize> Eq for BasicStackString<O, I, A, N>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
    O::Unit: Eq,
{}

impl<O, I, A, const N: usize> PartialEq for BasicStackString<O, I, A, N>
where
    O: Encoding,
    I: Encoding,
    A: Allocator,
    O::Unit: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_units() == other.as_units()
    }
}
