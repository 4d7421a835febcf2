/*!
Encoding conversion support.

Conversion happens one code point at a time: `decode` pulls a code point out of a source slice, `encode` pushes it into a destination slice.  Neither allocates.  Ill-formed input is never an error; `transcode_into` replaces each rejected unit with `REPLACEMENT_CHARACTER` and carries on, so the output is always well-formed.
*/
use encoding::{Form, Unit};

pub mod utf8;
pub mod utf16;
pub mod utf32;

/**
The character substituted for each ill-formed input unit.
*/
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/**
Returns `true` if `cp` is a Unicode scalar value: at most `0x10FFFF`, and not a surrogate.
*/
#[inline]
pub fn is_valid_codepoint(cp: u32) -> bool {
    cp <= 0x10FFFF && !(0xD800 <= cp && cp <= 0xDFFF)
}

/**
Decodes one code point from `src`, starting at `*at`.

On success, `*at` is advanced past the units consumed.  If the units at `*at` are ill-formed (or the input ends part-way through a sequence), returns `None` and advances `*at` by exactly one unit.

`*at` must be less than `src.len()`.  Nothing at or beyond `src.len()` is ever read.
*/
#[inline]
pub fn decode<U>(src: &[U], at: &mut usize) -> Option<char> where U: Unit {
    match U::FORM {
        Form::Utf8 => utf8::decode(src, at),
        Form::Utf16 => utf16::decode(src, at),
        Form::Utf32 => utf32::decode(src, at),
    }
}

/**
Encodes `c` into `dst`, starting at `*at`, and advances `*at` past the units written.

The caller is responsible for ensuring there is room; see `required_units`.  Running out of room panics.
*/
#[inline]
pub fn encode<U>(c: char, dst: &mut [U], at: &mut usize) where U: Unit {
    match U::FORM {
        Form::Utf8 => utf8::encode(c, dst, at),
        Form::Utf16 => utf16::encode(c, dst, at),
        Form::Utf32 => utf32::encode(c, dst, at),
    }
}

/**
Computes an upper bound on the number of `output` units needed to hold `len` units of `input`, once transcoded.

This is a closed-form bound; it does not look at the input.  It accounts for every ill-formed input unit being replaced with `REPLACEMENT_CHARACTER`.  It does *not* include space for a terminator.

Returns `None` if the bound does not fit in a `usize`.
*/
pub fn required_units(input: Form, output: Form, len: usize) -> Option<usize> {
    let ratio = match (input, output) {
        // A lone invalid byte becomes a three byte replacement character.
        (Form::Utf8, Form::Utf8) => 3,
        (Form::Utf8, _) => 1,
        (Form::Utf16, Form::Utf8) => 3,
        (Form::Utf16, _) => 1,
        (Form::Utf32, Form::Utf8) => 4,
        (Form::Utf32, Form::Utf16) => 2,
        (Form::Utf32, Form::Utf32) => 1,
    };
    len.checked_mul(ratio)
}

/**
Transcodes all of `src` into `dst`, returning the number of units written.

Ill-formed input units are replaced with `REPLACEMENT_CHARACTER`.  No terminator is written.

# Panics

If `dst` is too small.  A `dst` at least `required_units` long is always large enough.
*/
pub fn transcode_into<I, O>(src: &[I], dst: &mut [O]) -> usize
where
    I: Unit,
    O: Unit,
{
    let mut src_at = 0;
    let mut dst_at = 0;
    while src_at < src.len() {
        let c = decode(src, &mut src_at).unwrap_or(REPLACEMENT_CHARACTER);
        encode(c, dst, &mut dst_at);
    }
    dst_at
}

/**
Transcodes all of `src` into a new vector.

Ill-formed input units are replaced with `REPLACEMENT_CHARACTER`.  No terminator is appended.
*/
pub fn transcode_to_vec<I, O>(src: &[I]) -> Vec<O>
where
    I: Unit,
    O: Unit,
{
    let cap = required_units(I::FORM, O::FORM, src.len())
        .expect(here!());
    let mut units = vec![O::zero(); cap];
    let len = transcode_into(src, &mut units[..]);
    units.truncate(len);
    units
}

/**
Decodes all of `src` into a Rust string.

Ill-formed input units are replaced with `REPLACEMENT_CHARACTER`.
*/
pub fn decode_to_string<U>(src: &[U]) -> String where U: Unit {
    let mut s = String::with_capacity(src.len());
    let mut at = 0;
    while at < src.len() {
        s.push(decode(src, &mut at).unwrap_or(REPLACEMENT_CHARACTER));
    }
    s
}
