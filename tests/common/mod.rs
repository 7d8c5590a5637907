#![allow(dead_code)]
use welch::{BitOrder, Variant};

/// Split a code stream into `(code, width)` pairs.
///
/// Code sizes are tracked like a decoder does, this only works on streams that stay in sync
/// with a conforming decoder. Reading stops at the end code.
pub fn read_codes(data: &[u8], min_size: u8, variant: Variant) -> Vec<(u16, u8)> {
    let clear = 1u16 << min_size;
    let reduction = match variant {
        Variant::Gif => 0,
        Variant::Tiff => 1,
    };
    let mut width = min_size + 1;
    let mut next = usize::from(clear) + 2;
    let mut first = true;
    let mut pos = 0;
    let mut codes = vec![];

    loop {
        assert!(pos + usize::from(width) <= 8 * data.len(), "stream ended without end code");
        let mut code = 0u16;
        for i in 0..usize::from(width) {
            let byte = data[(pos + i) / 8];
            let bit = (pos + i) % 8;
            match variant.bit_order() {
                BitOrder::Lsb => code |= u16::from(byte >> bit & 1) << i,
                BitOrder::Msb => code = code << 1 | u16::from(byte >> (7 - bit) & 1),
            }
        }
        pos += usize::from(width);
        codes.push((code, width));

        if code == clear {
            width = min_size + 1;
            next = usize::from(clear) + 2;
            first = true;
            continue;
        }

        if code == clear + 1 {
            assert_eq!(data.len(), (pos + 7) / 8, "trailing data after end code");
            return codes;
        }

        if !first {
            next += 1;
        }
        first = false;

        let limit = (1usize << width) - 1 - reduction;
        if next > limit && width < 12 {
            width += 1;
        }
    }
}

/// Pseudo random symbols of `bits` bits, the same on every call.
pub fn noise(len: usize, bits: u8) -> Vec<u8> {
    let mut state = 0x9e37_79b9_u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 11) as u8 & ((1u16 << bits) - 1) as u8
        })
        .collect()
}

/// Mostly repetitive text-like data.
pub fn text(len: usize) -> Vec<u8> {
    const WORDS: &[&[u8]] = &[b"to ", b"be ", b"or ", b"not ", b"that ", b"is ", b"the ", b"question\n"];
    let mut state = 7u32;
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        out.extend_from_slice(WORDS[(state >> 16) as usize % WORDS.len()]);
    }
    out.truncate(len);
    out
}
