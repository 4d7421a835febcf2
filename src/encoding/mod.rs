/*!
Encoding types and traits.
*/
pub mod conv;

use std::mem;
use libc::{c_char, wchar_t};

macro_rules! naive_unit_impl {
    ($ty_name:ident($inner:ty) => $form:expr) => {
        impl Unit for $ty_name {
            const FORM: Form = $form;

            #[inline]
            fn zero() -> Self {
                $ty_name(0)
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0 == 0
            }

            #[inline]
            fn to_u32(self) -> u32 {
                self.0 as u32
            }

            #[inline]
            fn from_u32(value: u32) -> Self {
                $ty_name(value as $inner)
            }
        }
    };
}

/**
The encoding form of a unit type; that is, which of UTF-8, UTF-16 or UTF-32 its values are interpreted as.

This is a property of the unit *type*, not of any particular value.  Transcoding dispatches on it through `Unit::FORM`, which the compiler resolves statically.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    Utf8,
    Utf16,
    Utf32,
}

impl Form {
    /**
    The width of a single code unit, in bytes.
    */
    pub fn width(self) -> usize {
        match self {
            Form::Utf8 => 1,
            Form::Utf16 => 2,
            Form::Utf32 => 4,
        }
    }
}

/**
Abstracts over the encodings a string can be converted from or to.

In practice, this will be implemented by a marker type (which are not intended to actually be instantiated anywhere), along with a concrete type that implements `Unit`.
*/
pub trait Encoding {
    /**
    The code unit type.  This must be layout-compatible with `FfiUnit`.
    */
    type Unit: Unit;

    /**
    The unit type foreign interfaces expect pointers to.
    */
    type FfiUnit: Copy;

    /**
    Returns a short string used to identify this encoding in debug output.
    */
    fn debug_prefix() -> &'static str;
}

pub trait Unit: Copy {
    const FORM: Form;

    fn zero() -> Self;
    fn is_zero(&self) -> bool;

    /**
    Returns the raw value of this unit, zero- or sign-extended.

    Sign-extended values are always outside the range of valid code points, and are thus treated as invalid.
    */
    fn to_u32(self) -> u32;

    /**
    Constructs a unit from a raw value, truncating it to the unit's width.
    */
    fn from_u32(value: u32) -> Self;
}

const WCHAR_FORM: Form = match mem::size_of::<wchar_t>() {
    2 => Form::Utf16,
    _ => Form::Utf32,
};

/**
UTF-8 text stored in C `char`s.

Unlike the C runtime multibyte encoding, this is *always* UTF-8, regardless of the current locale.
*/
pub enum Narrow {}

impl Encoding for Narrow {
    type Unit = NUnit;
    type FfiUnit = c_char;

    fn debug_prefix() -> &'static str { "N" }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NUnit(pub c_char);

naive_unit_impl! { NUnit(c_char) => Form::Utf8 }

/**
Wide text stored in C `wchar_t`s.

This is UTF-16 where `wchar_t` is 16 bits wide (*i.e.* Windows), and UTF-32 everywhere else.
*/
pub enum Wide {}

impl Encoding for Wide {
    type Unit = WUnit;
    type FfiUnit = wchar_t;

    fn debug_prefix() -> &'static str { "W" }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct WUnit(pub wchar_t);

naive_unit_impl! { WUnit(wchar_t) => WCHAR_FORM }

pub enum Utf8 {}

impl Encoding for Utf8 {
    type Unit = Utf8Unit;
    type FfiUnit = u8;

    fn debug_prefix() -> &'static str { "Utf8" }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Utf8Unit(pub u8);

naive_unit_impl! { Utf8Unit(u8) => Form::Utf8 }

pub enum Utf16 {}

impl Encoding for Utf16 {
    type Unit = Utf16Unit;
    type FfiUnit = u16;

    fn debug_prefix() -> &'static str { "Utf16" }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Utf16Unit(pub u16);

naive_unit_impl! { Utf16Unit(u16) => Form::Utf16 }

pub enum Utf32 {}

impl Encoding for Utf32 {
    type Unit = Utf32Unit;
    type FfiUnit = u32;

    fn debug_prefix() -> &'static str { "Utf32" }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Utf32Unit(pub u32);

naive_unit_impl! { Utf32Unit(u32) => Form::Utf32 }
