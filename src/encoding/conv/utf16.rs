use std::char;
use encoding::Unit;

/**
Decodes one UTF-16 code point.  See `conv::decode`.

A high surrogate followed by a low surrogate is combined into a supplementary-plane code point.  A lone low surrogate, or a high surrogate not followed by a low one, is rejected; only the offending unit is consumed.
*/
pub fn decode<U>(src: &[U], at: &mut usize) -> Option<char> where U: Unit {
    let cu0 = src[*at].to_u32();
    *at += 1;

    match cu0 {
        0xD800 ... 0xDBFF => {
            let cu1 = match src.get(*at) {
                Some(cu1) => cu1.to_u32(),
                None => return None,
            };

            if !(0xDC00 <= cu1 && cu1 <= 0xDFFF) {
                return None;
            }

            *at += 1;

            let hi = cu0 & 0x3FF;
            let lo = cu1 & 0x3FF;
            char::from_u32(0x10000 + ((hi << 10) | lo))
        },
        0xDC00 ... 0xDFFF => None,
        // Anything wider than 16 bits fails here.
        cu0 => char::from_u32(cu0),
    }
}

/**
Encodes one code point as UTF-16.  See `conv::encode`.
*/
pub fn encode<U>(c: char, dst: &mut [U], at: &mut usize) where U: Unit {
    let mut buf = [0u16; 2];
    for &cu in c.encode_utf16(&mut buf).iter() {
        dst[*at] = U::from_u32(cu as u32);
        *at += 1;
    }
}
