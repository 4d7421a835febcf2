extern crate libc;
extern crate stackstr;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use std::ptr;
use libc::{c_char, wchar_t};
use stackstr::{BasicStackString, ShortStackString, StackString, WShortStackString, WStackString};
use stackstr::alloc::{Malloc, Rust};
use stackstr::encoding::{Form, Narrow, Wide, Unit, Utf8, Utf16, Utf32, Utf8Unit, Utf16Unit, Utf32Unit, WUnit};
use stackstr::encoding::conv;

const HELLO: &'static str = "\u{5e9}\u{5dc}\u{5d5}\u{5dd}";

/// Zero-terminated narrow string.
fn narrow(s: &str) -> Vec<c_char> {
    s.bytes().map(|b| b as c_char).chain(Some(0)).collect()
}

/// Zero-terminated wide string.
fn wide(s: &str) -> Vec<wchar_t> {
    let src: Vec<Utf8Unit> = s.bytes().map(Utf8Unit).collect();
    let units: Vec<WUnit> = conv::transcode_to_vec(&src);
    units.into_iter().map(|u| u.0).chain(Some(0)).collect()
}

fn content<O, I, A, const N: usize>(s: &BasicStackString<O, I, A, N>) -> String
where
    O: stackstr::encoding::Encoding,
    I: stackstr::encoding::Encoding,
    A: stackstr::alloc::Allocator,
{
    s.into_string().expect(here!())
}

#[test]
fn test_default_is_null() {
    let s = ShortStackString::new();
    assert!(s.get().is_null());
    assert!(s.is_null());
    assert!(s.as_units().is_none());
    assert_eq!(s.into_string(), None);
    assert_eq!(s.len(), 0);
    assert!(!s.uses_inline() && !s.uses_heap());
    assert_eq!(s.capacity(), 0);
}

#[test]
fn test_null_ptr_is_null() {
    unsafe {
        let s = ShortStackString::from_ptr(ptr::null()).expect(here!());
        assert!(s.get().is_null());
        let s2 = ShortStackString::from_range(ptr::null(), ptr::null()).expect(here!());
        assert!(s2.get().is_null());
    }
}

#[test]
fn test_convert_null_clears() {
    let foo = wide("foo");
    unsafe {
        let mut s = ShortStackString::from_ptr(foo.as_ptr()).expect(here!());
        assert_eq!(content(&s), "foo");
        let r = s.convert_ptr(ptr::null()).expect(here!());
        assert!(r.is_null());
        assert!(s.get().is_null());

        let mut s2 = ShortStackString::from_ptr(foo.as_ptr()).expect(here!());
        assert_eq!(content(&s2), "foo");
        let r = s2.convert_range(ptr::null(), ptr::null()).expect(here!());
        assert!(r.is_null());
        assert!(s2.get().is_null());
    }
}

#[test]
fn test_empty_string() {
    let wempty = wide("");
    unsafe {
        let s = ShortStackString::from_ptr(wempty.as_ptr()).expect(here!());
        assert!(!s.get().is_null());
        assert_eq!(*s.get(), 0);
        assert_eq!(content(&s), "");

        let s2 = ShortStackString::from_range(wempty.as_ptr(), wempty.as_ptr()).expect(here!());
        assert!(!s2.get().is_null());
        assert_eq!(content(&s2), "");

        let mut s3 = ShortStackString::new();
        assert!(!s3.convert_ptr(wempty.as_ptr()).expect(here!()).is_null());
        assert_eq!(content(&s3), "");
        assert!(!s3.convert(&[]).expect(here!()).is_null());
        assert_eq!(s3.as_units_with_term().map(|u| u.len()), Some(1));
    }
}

#[test]
fn test_widen_heap_and_inline() {
    let hello = narrow(HELLO);
    let whello = wide(HELLO);
    let end = unsafe { hello.as_ptr().add(hello.len() - 1) };

    let mut sw = BasicStackString::<Wide, Narrow, Rust, 3>::new();
    unsafe {
        assert!(!sw.convert_ptr(hello.as_ptr()).expect(here!()).is_null());
        assert!(sw.uses_heap());
        assert_eq!(sw.as_units_with_term().expect(here!()).iter().map(|u| u.0).collect::<Vec<_>>(), whello);
        assert!(!sw.convert_range(hello.as_ptr(), end).expect(here!()).is_null());
        assert!(sw.uses_heap());
        assert_eq!(content(&sw), HELLO);
    }

    let mut sw = BasicStackString::<Wide, Narrow, Rust, 40>::new();
    unsafe {
        assert!(!sw.convert_ptr(hello.as_ptr()).expect(here!()).is_null());
        assert!(sw.uses_inline());
        assert_eq!(content(&sw), HELLO);
        assert!(!sw.convert_range(hello.as_ptr(), end).expect(here!()).is_null());
        assert!(sw.uses_inline());
        assert_eq!(content(&sw), HELLO);
    }
}

#[test]
fn test_narrow_heap_and_inline() {
    let hello = narrow(HELLO);
    let whello = wide(HELLO);
    let end = unsafe { whello.as_ptr().add(whello.len() - 1) };

    let mut s = BasicStackString::<Narrow, Wide, Malloc, 3>::new();
    unsafe {
        assert!(!s.convert_ptr(whello.as_ptr()).expect(here!()).is_null());
        assert!(s.uses_heap());
        assert_eq!(s.as_units_with_term().expect(here!()).iter().map(|u| u.0).collect::<Vec<_>>(), hello);
        assert!(!s.convert_range(whello.as_ptr(), end).expect(here!()).is_null());
        assert_eq!(content(&s), HELLO);
    }

    let mut s = BasicStackString::<Narrow, Wide, Malloc, 40>::new();
    unsafe {
        assert!(!s.convert_ptr(whello.as_ptr()).expect(here!()).is_null());
        assert!(s.uses_inline());
        assert_eq!(s.len(), hello.len() - 1);
        assert!(!s.convert_range(whello.as_ptr(), end).expect(here!()).is_null());
        assert_eq!(content(&s), HELLO);
    }
}

#[test]
fn test_storage_boundary() {
    // Narrow to wide is 1:1; five units plus a terminator fill six exactly.
    let s = BasicStackString::<Wide, Narrow, Rust, 6>::from_str("abcde").expect(here!());
    assert!(s.uses_inline());
    let s = BasicStackString::<Wide, Narrow, Rust, 6>::from_str("abcdef").expect(here!());
    assert!(s.uses_heap());
    assert_eq!(content(&s), "abcdef");

    // Narrowing is budgeted for the widest expansion, whatever the actual content.  From UTF-16 that is 3:1.
    let u16s: Vec<Utf16Unit> = HELLO.encode_utf16().map(Utf16Unit).collect();
    let s = BasicStackString::<Utf8, Utf16, Rust, 13>::from_units(&u16s).expect(here!());
    assert!(s.uses_inline());
    assert_eq!(s.capacity(), BasicStackString::<Utf8, Utf16, Rust, 13>::BUFFER_SIZE);
    assert_eq!(content(&s), HELLO);
    let s = BasicStackString::<Utf8, Utf16, Rust, 12>::from_units(&u16s).expect(here!());
    assert!(s.uses_heap());
    assert_eq!(s.capacity(), 13);
    assert_eq!(content(&s), HELLO);

    // From UTF-32 it is 4:1.
    let u32s: Vec<Utf32Unit> = HELLO.chars().map(|c| Utf32Unit(c as u32)).collect();
    let s = BasicStackString::<Utf8, Utf32, Rust, 17>::from_units(&u32s).expect(here!());
    assert!(s.uses_inline());
    assert_eq!(s.capacity(), 17);
    assert_eq!(content(&s), HELLO);
    let s = BasicStackString::<Utf8, Utf32, Rust, 16>::from_units(&u32s).expect(here!());
    assert!(s.uses_heap());
    assert_eq!(s.capacity(), 17);
    assert_eq!(content(&s), HELLO);

    // Wide is whichever of those `wchar_t` is.
    let w = wide(HELLO);
    let units: Vec<WUnit> = w[..w.len() - 1].iter().map(|&u| WUnit(u)).collect();
    let t = conv::required_units(<WUnit as Unit>::FORM, Form::Utf8, units.len()).expect(here!()) + 1;
    assert!(t == 13 || t == 17);
    let s = BasicStackString::<Narrow, Wide, Rust, 17>::from_units(&units).expect(here!());
    assert!(s.uses_inline());
    assert_eq!(content(&s), HELLO);
    let s = BasicStackString::<Narrow, Wide, Rust, 13>::from_units(&units).expect(here!());
    assert_eq!(s.uses_inline(), t <= 13);
    assert_eq!(s.capacity(), if t <= 13 { 13 } else { t });
    assert_eq!(content(&s), HELLO);
    let s = BasicStackString::<Narrow, Wide, Rust, 12>::from_units(&units).expect(here!());
    assert!(s.uses_heap());
    assert_eq!(s.capacity(), t);
    assert_eq!(content(&s), HELLO);

    // Even ASCII tips over early when narrowing.
    let abc: Vec<WUnit> = "abc".chars().map(|c| WUnit::from_u32(c as u32)).collect();
    let s = BasicStackString::<Narrow, Wide, Rust, 9>::from_units(&abc).expect(here!());
    assert!(s.uses_heap());
    assert_eq!(s.len(), 3);

    // Nothing fits in no inline storage at all.
    let s = BasicStackString::<Wide, Narrow, Rust, 0>::from_str("").expect(here!());
    assert!(s.uses_heap());
    assert_eq!(content(&s), "");
}

#[test]
fn test_range_is_not_zero_terminated() {
    let src = narrow("abcdef");
    let s = unsafe {
        WShortStackString::from_range(src.as_ptr().add(1), src.as_ptr().add(4)).expect(here!())
    };
    assert_eq!(content(&s), "bcd");
    assert_eq!(unsafe { *s.get().add(3) }, 0);
}

#[test]
fn test_invalid_utf8() {
    let src: Vec<c_char> = b"Invalid UTF-8: \xFF \xd7\xFF \xe5\xFF\x8c \xf0\x9d\x84\xFF\0"
        .iter().map(|&b| b as c_char).collect();
    let s = unsafe { WStackString::from_ptr(src.as_ptr()).expect(here!()) };
    assert_eq!(content(&s),
        "Invalid UTF-8: \u{FFFD} \u{FFFD}\u{FFFD} \u{FFFD}\u{FFFD}\u{FFFD} \u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}");
}

type Ss = BasicStackString<Wide, Narrow, Rust, 6>;

const HEAP_VAL: &'static str = "heapValue";
const STACK_VAL: &'static str = "stack";

fn fixtures() -> (Ss, Ss) {
    let heap = Ss::from_str(HEAP_VAL).expect(here!());
    let stack = Ss::from_str(STACK_VAL).expect(here!());
    assert!(heap.uses_heap());
    assert!(stack.uses_inline());
    (heap, stack)
}

#[test]
fn test_copy_and_assign_heap() {
    let (heap, _) = fixtures();
    let sw2 = heap.clone();
    let mut sw3 = Ss::new();
    let empty = Ss::new();

    sw3.clone_from(&heap);
    assert_eq!(content(&sw2), HEAP_VAL);
    assert_eq!(content(&sw3), HEAP_VAL);
    assert!(sw2.uses_heap());
    assert!(sw2.get() != heap.get());

    sw3 = sw3.clone();
    assert_eq!(content(&sw3), HEAP_VAL);

    sw3.assign(&empty).expect(here!());
    assert!(sw3.get().is_null());
    assert_eq!(content(&heap), HEAP_VAL);
}

#[test]
fn test_copy_and_assign_inline() {
    let (_, stack) = fixtures();
    let sw2 = stack.clone();
    let mut sw3 = Ss::new();
    let empty = Ss::new();

    sw3.assign(&stack).expect(here!());
    assert_eq!(content(&sw2), STACK_VAL);
    assert_eq!(content(&sw3), STACK_VAL);
    assert!(sw3.uses_inline());

    sw3 = sw3.try_clone().expect(here!());
    assert_eq!(content(&sw3), STACK_VAL);

    sw3.clone_from(&empty);
    assert!(sw3.get().is_null());
}

#[test]
fn test_assign_changes_storage() {
    let (heap, stack) = fixtures();

    let mut sw2 = stack.clone();
    sw2.assign(&heap).expect(here!());
    assert!(sw2.uses_heap());
    assert_eq!(content(&sw2), HEAP_VAL);

    let mut sw2 = heap.clone();
    sw2.assign(&stack).expect(here!());
    assert!(sw2.uses_inline());
    assert_eq!(content(&sw2), STACK_VAL);
}

#[test]
fn test_swap() {
    let (heap, stack) = fixtures();
    let mut sw2 = heap.clone();
    let mut sw3 = stack.clone();
    let mut empty1 = Ss::new();
    let mut empty2 = Ss::new();

    sw2.swap(&mut sw3);
    assert_eq!(content(&sw2), STACK_VAL);
    assert_eq!(content(&sw3), HEAP_VAL);
    assert!(sw2.uses_inline());
    assert!(sw3.uses_heap());

    sw2.swap(&mut sw3);
    assert_eq!(content(&sw2), HEAP_VAL);
    assert_eq!(content(&sw3), STACK_VAL);

    sw2.swap(&mut empty1);
    assert_eq!(content(&empty1), HEAP_VAL);
    assert!(sw2.get().is_null());

    sw3.swap(&mut empty2);
    assert_eq!(content(&empty2), STACK_VAL);
    assert!(sw3.get().is_null());
}

#[test]
fn test_swap_same_storage() {
    let (heap, stack) = fixtures();

    let mut sw2 = heap.clone();
    let mut sw3 = heap.clone();
    sw3.as_units_mut().expect(here!())[0] = WUnit::from_u32('z' as u32);
    let val2 = content(&sw3);
    assert_eq!(val2, "zeapValue");
    sw2.swap(&mut sw3);
    assert_eq!(content(&sw2), val2);
    assert_eq!(content(&sw3), HEAP_VAL);

    let mut sw2 = stack.clone();
    let mut sw3 = stack.clone();
    unsafe { *sw3.get_mut() = 'z' as wchar_t; }
    let val2 = content(&sw3);
    assert_eq!(val2, "ztack");
    sw2.swap(&mut sw3);
    assert_eq!(content(&sw2), val2);
    assert_eq!(content(&sw3), STACK_VAL);

    assert_eq!(content(&stack), STACK_VAL);
    assert_eq!(content(&heap), HEAP_VAL);
}

#[test]
fn test_vector_of_strings() {
    type Ss5 = BasicStackString<Wide, Narrow, Rust, 5>;

    let mut strings: Vec<Ss5> = Vec::new();
    strings.resize(2, Ss5::new());
    strings[0].convert_str("1234").expect(here!());
    strings[1].convert_str("Hello World").expect(here!());
    assert!(strings[0].uses_inline());
    assert!(strings[1].uses_heap());
    strings.push(Ss5::from_str("FooBar").expect(here!()));

    // Force a few reallocations.
    for i in 0..64 {
        strings.push(Ss5::from_str(&format!("{}", i * 1000)).expect(here!()));
    }

    assert_eq!(content(&strings[0]), "1234");
    assert_eq!(content(&strings[1]), "Hello World");
    assert_eq!(content(&strings[2]), "FooBar");
    for i in 0..64 {
        assert_eq!(content(&strings[3 + i]), format!("{}", i * 1000));
    }
}

#[test]
fn test_aliases_round_trip() {
    for &s in &["", "foo", HELLO, "\u{1d11e} x \u{20ac}", "\u{5e9}-\u{43c}-\u{3bd}"] {
        let n = narrow(s);
        let w = unsafe { WStackString::from_ptr(n.as_ptr()).expect(here!()) };
        let back = unsafe { StackString::from_ptr(w.get()).expect(here!()) };
        assert_eq!(content(&back), s);
        assert_eq!(back.as_units_with_term().expect(here!()).iter().map(|u| u.0).collect::<Vec<_>>(), n);
        assert!(back == StackString::from_str(s).expect(here!()));
    }
}

#[test]
fn test_debug() {
    let s = ShortStackString::from_str("a\"b").expect(here!());
    assert_eq!(format!("{:?}", s), "NR\"a\\\"b\"");
    assert_eq!(format!("{:?}", ShortStackString::new()), "NRnull");
}
