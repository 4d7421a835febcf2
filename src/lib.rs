/*!
This crate converts strings between UTF-8 and the platform's wide encoding, for handing to foreign interfaces which expect the other one.

The centrepiece is `BasicStackString`, which converts a string into inline storage when the result is known to fit, and into a heap allocation otherwise.  The conversion routines themselves live in `encoding::conv`, and work between any two of UTF-8, UTF-16 and UTF-32.

Ill-formed input is never an error.  Every rejected input unit is replaced with U+FFFD REPLACEMENT CHARACTER, so results are always well-formed.  The only way a conversion can fail is if the heap allocation for a long result fails.

# Quick Reference

The following table describes the convenience aliases, and when to use them.

| Alias | Converts | Inline units | Typical use |
| ---: | --- | --- | --- |
| `WStackString` | UTF-8 `*const c_char` to wide `*const wchar_t` | 256 | Passing paths or arguments to wide APIs. |
| `StackString` | Wide `*const wchar_t` to UTF-8 `*const c_char` | 256 | Receiving strings from wide APIs. |
| `WShortStackString` | UTF-8 to wide | 16 | Short keys, such as environment variable names. |
| `ShortStackString` | Wide to UTF-8 | 16 | Short keys. |

"Wide" is UTF-16 where `wchar_t` is 16 bits (*i.e.* Windows), and UTF-32 elsewhere.

# Components

## Encodings

See the `encoding` module.

| Prefix  | Name     | Encoding |
| ------- | -------- | -------- |
| `N`     | `Narrow` | UTF-8 in `c_char`s, regardless of locale. |
| `W`     | `Wide`   | UTF-16 or UTF-32 in `wchar_t`s. |
| `Utf8`  | `Utf8`   | UTF-8 in `u8`s. |
| `Utf16` | `Utf16`  | UTF-16 in `u16`s. |
| `Utf32` | `Utf32`  | UTF-32 in `u32`s. |

## Allocators

See the `alloc` module.

| Prefix | Name     | Allocator |
| ------ | -------- | --------- |
| `C`    | `Malloc` | C runtime heap allocator (*i.e.* `calloc`/`free`) |
| `R`    | `Rust`   | Rust heap allocator. |
*/
extern crate libc;
#[macro_use] extern crate log;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

pub mod alloc;
pub mod encoding;
pub mod structure;
pub mod stack;

use alloc as a;
use encoding as e;

pub use stack::BasicStackString;

pub type WStackString = BasicStackString<e::Wide, e::Narrow, a::Rust, 256>;
pub type StackString = BasicStackString<e::Narrow, e::Wide, a::Rust, 256>;
pub type WShortStackString = BasicStackString<e::Wide, e::Narrow, a::Rust, 16>;
pub type ShortStackString = BasicStackString<e::Narrow, e::Wide, a::Rust, 16>;
