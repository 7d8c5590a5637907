#![no_main]
use libfuzzer_sys::fuzz_target;
use weezl::{decode, BitOrder};
use welch::{Encoder, Variant};

fuzz_target!(|raw_data: &[u8]| {
    let (&config, data) = match raw_data.split_first() {
        Some(split) => split,
        None => return,
    };

    let variant = if config & 0x80 == 0 { Variant::Gif } else { Variant::Tiff };
    let size = 2 + (config & 0x7) % 7;
    let chunk = 1 + usize::from(config >> 3 & 0xf);
    let data: Vec<u8> = data.iter().map(|&b| (u16::from(b) & ((1 << size) - 1)) as u8).collect();

    let mut encoder = Encoder::new(Vec::with_capacity(2*data.len() + 40), size, variant).unwrap();
    for part in data.chunks(chunk) {
        encoder.consume(part).unwrap();
    }
    let buffer = encoder.finish().unwrap();

    let mut decoder = match variant {
        Variant::Gif => decode::Decoder::new(BitOrder::Lsb, size),
        Variant::Tiff => decode::Decoder::with_tiff_size_switch(BitOrder::Msb, size),
    };
    let mut compare = vec![];
    let result = decoder.into_stream(&mut compare).decode_all(buffer.as_slice());
    assert!(result.status.is_ok(), "{:?}", result.status);
    assert_eq!(data, compare);
});
