/*!
Foreign string structures.

Foreign code hands strings over either as a pointer to a zero-terminated sequence of units, or as a `[begin, end)` pair of pointers.  This module turns both into slices.
*/
use std::slice;
use encoding::{Encoding, Unit};

/**
Borrows a zero-terminated string as a slice of units.  The terminator is *not* included.

If `ptr` is null, returns `None`.

# Safety

`ptr` must either be null, or point to a sequence of units terminated by a zero unit.  The returned slice must not outlive that sequence.
*/
pub unsafe fn from_zero_term<'a, E>(ptr: *const E::FfiUnit) -> Option<&'a [E::Unit]> where E: Encoding {
    if ptr.is_null() {
        return None;
    }

    let ptr = ptr as *const E::Unit;
    let mut len = 0;
    while !(*ptr.add(len)).is_zero() {
        len += 1;
    }

    Some(slice::from_raw_parts(ptr, len))
}

/**
Borrows the units in `[begin, end)` as a slice.  The range need not be zero-terminated; any zero units inside it are part of the string.

If `begin` is null, returns `None`.

# Safety

`begin` must only be null if `end` is also null.  Otherwise, both must point into (or one past the end of) the same sequence of units, with `begin <= end`.  The returned slice must not outlive that sequence.
*/
pub unsafe fn from_range<'a, E>(begin: *const E::FfiUnit, end: *const E::FfiUnit) -> Option<&'a [E::Unit]> where E: Encoding {
    debug_assert!(!begin.is_null() || end.is_null(), "null begin with non-null end");
    if begin.is_null() {
        return None;
    }

    let begin = begin as *const E::Unit;
    let end = end as *const E::Unit;
    debug_assert!(begin <= end);
    let len = end.offset_from(begin) as usize;

    Some(slice::from_raw_parts(begin, len))
}
