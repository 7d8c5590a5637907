mod common;

use std::{env, fs};
use welch::{Encoder, Variant};

#[test]
fn roundtrip_all() {
    let file = env::args().next().unwrap();
    let mut data = fs::read(file).unwrap();
    data.truncate(1 << 18);

    for &variant in &[Variant::Gif, Variant::Tiff] {
        for bit_width in (2..=8).rev() {
            let data: Vec<_> = data.iter().copied().map(|b| b & ((1u16 << bit_width) - 1) as u8).collect();

            assert_roundtrips(&*data, variant, bit_width);
        }
    }
}

#[test]
fn roundtrip_generated() {
    for &variant in &[Variant::Gif, Variant::Tiff] {
        assert_roundtrips(&common::text(200_000), variant, 8);
        for bit_width in 2..=8 {
            for &len in &[0, 1, 2, 3, 17, 1000, 50_000] {
                assert_roundtrips(&common::noise(len, bit_width), variant, bit_width);
            }
        }
    }
}

#[test]
fn stream_is_framed_by_control_codes() {
    for &variant in &[Variant::Gif, Variant::Tiff] {
        for bit_width in 2..=8 {
            let data = common::noise(30_000, bit_width);
            let encoded = encode(&data, variant, bit_width);
            let codes = common::read_codes(&encoded, bit_width, variant);

            let clear = 1u16 << bit_width;
            assert_eq!(codes.first(), Some(&(clear, bit_width + 1)));
            assert_eq!(codes.last().map(|&(code, _)| code), Some(clear + 1));
            assert!(codes.iter().all(|&(code, width)| width <= 12 && code < 1 << width));
        }
    }
}

fn encode(data: &[u8], variant: Variant, bit_width: u8) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::with_capacity(2 * data.len() + 40), bit_width, variant).unwrap();
    encoder.consume(data).unwrap();
    encoder.finish().unwrap()
}

fn assert_roundtrips(data: &[u8], variant: Variant, bit_width: u8) {
    let buffer = encode(data, variant, bit_width);

    let mut decoder = match variant {
        Variant::Gif => weezl::decode::Decoder::new(weezl::BitOrder::Lsb, bit_width),
        Variant::Tiff => weezl::decode::Decoder::with_tiff_size_switch(weezl::BitOrder::Msb, bit_width),
    };
    let mut compare = vec![];
    let result = decoder.into_stream(&mut compare).decode_all(buffer.as_slice());
    assert!(result.status.is_ok(), "{:?}, {}, {:?}", variant, bit_width, result.status);
    assert!(data == &*compare, "{:?}, {}, {}", variant, bit_width, data.len());
}
