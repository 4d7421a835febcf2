use std::char;
use encoding::Unit;
use super::is_valid_codepoint;

/**
Decodes one UTF-8 sequence.  See `conv::decode`.

Overlong forms, surrogates, values above `0x10FFFF`, stray continuation bytes and truncated sequences are all rejected.  A rejected sequence only ever consumes its first byte, so the bytes after it are re-examined as potential lead bytes.
*/
pub fn decode<U>(src: &[U], at: &mut usize) -> Option<char> where U: Unit {
    let start = *at;
    let lead = src[start].to_u32() as u8;
    *at = start + 1;

    let (len, bits, min) = match lead {
        0x00 ... 0x7F => return Some(lead as char),
        // 0xC0 and 0xC1 can only start overlong forms.
        0xC2 ... 0xDF => (2, lead & 0x1F, 0x80),
        0xE0 ... 0xEF => (3, lead & 0x0F, 0x800),
        0xF0 ... 0xF4 => (4, lead & 0x07, 0x10000),
        _ => return None,
    };

    if src.len() - start < len {
        return None;
    }

    let mut cp = bits as u32;
    for cu in &src[start + 1 .. start + len] {
        let cu = cu.to_u32() as u8;
        if cu & 0xC0 != 0x80 {
            return None;
        }
        cp = (cp << 6) | (cu & 0x3F) as u32;
    }

    if cp < min || !is_valid_codepoint(cp) {
        return None;
    }

    let c = char::from_u32(cp)?;
    *at = start + len;
    Some(c)
}

/**
Encodes one code point as UTF-8.  See `conv::encode`.
*/
pub fn encode<U>(c: char, dst: &mut [U], at: &mut usize) where U: Unit {
    let mut buf = [0u8; 4];
    for &cu in c.encode_utf8(&mut buf).as_bytes() {
        dst[*at] = U::from_u32(cu as u32);
        *at += 1;
    }
}
