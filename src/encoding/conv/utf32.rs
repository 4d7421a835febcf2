use std::char;
use encoding::Unit;
use super::is_valid_codepoint;

/**
Decodes one UTF-32 code point.  See `conv::decode`.
*/
pub fn decode<U>(src: &[U], at: &mut usize) -> Option<char> where U: Unit {
    let cp = src[*at].to_u32();
    *at += 1;
    if !is_valid_codepoint(cp) {
        return None;
    }
    char::from_u32(cp)
}

/**
Encodes one code point as UTF-32.  See `conv::encode`.
*/
pub fn encode<U>(c: char, dst: &mut [U], at: &mut usize) where U: Unit {
    dst[*at] = U::from_u32(c as u32);
    *at += 1;
}
