//! Property-based tests using proptest
//!
//! These tests validate codec invariants across randomly generated values,
//! offsets and fragmentations.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use wire_buffer::{
    ByteView, ChunkedBytes, Endianness, FrameAssembler, MutableBuffer, Primitive, StreamCursor,
};

fn wire_bytes<T: Primitive>(value: T, order: Endianness) -> Vec<u8> {
    let mut out = vec![0u8; T::WIDTH];
    value.encode(&mut out, order);
    out
}

/// Decoded values from the view and the stream, as their wire bytes.
///
/// Comparing bytes rather than values keeps NaN payloads meaningful.
fn roundtrip<T: Primitive>(value: T, order: Endianness) -> (Vec<u8>, Vec<u8>) {
    let mut storage = vec![0u8; T::WIDTH];
    let mut buf = MutableBuffer::new(&mut storage);
    let mut offset = 0;
    buf.write_with(value, order, &mut offset);
    assert_eq!(offset, T::WIDTH);

    let mut offset = 0;
    let from_view = ByteView::new(&storage)
        .read_with::<T>(order, &mut offset)
        .expect("view read");

    let chunks: Vec<Vec<u8>> = storage.iter().map(|b| vec![*b]).collect();
    let mut cursor = StreamCursor::new(&chunks);
    let peeked = cursor.try_peek_with::<T>(order).expect("stream peek");
    let from_stream = cursor.try_read_with::<T>(order).expect("stream read");
    assert_eq!(wire_bytes(peeked, order), wire_bytes(from_stream, order));
    (wire_bytes(from_view, order), wire_bytes(from_stream, order))
}

fn encode_record(
    block: Option<&[u8]>,
    text: Option<&str>,
    number: u32,
    buf: &mut MutableBuffer<'_>,
    offset: &mut usize,
) -> wire_buffer::Result<()> {
    buf.write(number, offset);
    buf.write_bytes(block, offset)?;
    buf.write_str(text, offset)
}

fn check<T: Primitive>(value: T) {
    for order in [Endianness::Big, Endianness::Little] {
        let expected = wire_bytes(value, order);
        let (view, stream) = roundtrip(value, order);
        assert_eq!(view, expected);
        assert_eq!(stream, expected);
    }
}

#[test]
fn test_boundary_values_roundtrip() {
    macro_rules! boundaries {
        ($($ty:ty),*) => {$(
            check::<$ty>(<$ty>::MIN);
            check::<$ty>(<$ty>::MAX);
            check::<$ty>(0 as $ty);
        )*};
    }
    boundaries!(i8, u8, i16, u16, i32, u32, i64, u64);

    check(-1i8);
    check(-1i16);
    check(-1i32);
    check(-1i64);
    check(f32::MIN);
    check(f32::MAX);
    check(0.0f32);
    check(-1.0f32);
    check(f64::MIN);
    check(f64::MAX);
    check(0.0f64);
    check(-1.0f64);
    check(true);
    check(false);
    check(f64::from_bits(0x7FF0_0000_0000_0001));
    check(f32::from_bits(0xFFC0_0001));
}

// Property: primitives survive write then read in both byte orders
proptest! {
    #[test]
    fn prop_i64_roundtrip(value in any::<i64>(), little in any::<bool>()) {
        let order = if little { Endianness::Little } else { Endianness::Big };
        let (view, stream) = roundtrip(value, order);
        prop_assert_eq!(&view, &wire_bytes(value, order));
        prop_assert_eq!(stream, view);
    }

    #[test]
    fn prop_u16_roundtrip(value in any::<u16>()) {
        let (view, stream) = roundtrip(value, Endianness::Big);
        prop_assert_eq!(&view, &value.to_be_bytes().to_vec());
        prop_assert_eq!(stream, view);
    }

    // Every bit pattern, NaN payloads included, survives unchanged
    #[test]
    fn prop_f64_bits_roundtrip(bits in any::<u64>(), little in any::<bool>()) {
        let order = if little { Endianness::Little } else { Endianness::Big };
        let (view, stream) = roundtrip(f64::from_bits(bits), order);
        let expected = if little { bits.to_le_bytes() } else { bits.to_be_bytes() };
        prop_assert_eq!(&view[..], &expected[..]);
        prop_assert_eq!(&stream[..], &expected[..]);
    }

    #[test]
    fn prop_f32_bits_roundtrip(bits in any::<u32>()) {
        let (view, stream) = roundtrip(f32::from_bits(bits), Endianness::Big);
        prop_assert_eq!(&view[..], &bits.to_be_bytes()[..]);
        prop_assert_eq!(&stream[..], &bits.to_be_bytes()[..]);
    }
}

// Property: a string decodes identically however the stream is fragmented
proptest! {
    #[test]
    fn prop_string_any_fragmentation(text in "\\PC{0,64}", cuts in prop::collection::vec(0usize..80, 0..6)) {
        let mut storage = vec![0u8; 2 + text.len()];
        let mut buf = MutableBuffer::new(&mut storage);
        let mut offset = 0;
        buf.write_str(Some(text.as_str()), &mut offset).unwrap();

        let mut points: Vec<usize> = cuts.into_iter().map(|c| c.min(storage.len())).collect();
        points.sort_unstable();
        let mut chunks = ChunkedBytes::new();
        let mut start = 0;
        for point in points {
            chunks.push(storage[start..point].to_vec());
            start = point;
        }
        chunks.push(storage[start..].to_vec());

        let mut cursor = chunks.cursor();
        let decoded = cursor.try_read_str().map(|s| s.into_owned());
        prop_assert_eq!(decoded.as_deref(), Some(text.as_str()));
        prop_assert_eq!(cursor.remaining(), 0);
    }
}

// Property: measure mode predicts the real encoded size
proptest! {
    #[test]
    fn prop_measure_matches_encode(
        block in prop::option::of(prop::collection::vec(any::<u8>(), 0..256)),
        text in prop::option::of("\\PC{0,32}"),
        number in any::<u32>(),
    ) {
        let size = MutableBuffer::measure(|buf, offset| {
            encode_record(block.as_deref(), text.as_deref(), number, buf, offset)
        })
        .unwrap();
        let mut storage = vec![0u8; size];
        let mut offset = 0;
        encode_record(
            block.as_deref(),
            text.as_deref(),
            number,
            &mut MutableBuffer::new(&mut storage),
            &mut offset,
        )
        .unwrap();
        prop_assert_eq!(offset, size);

        let view = ByteView::new(&storage);
        let mut offset = 0;
        prop_assert_eq!(view.read_be::<u32>(&mut offset).unwrap(), number);
        prop_assert_eq!(view.read_bytes(&mut offset).unwrap(), block.as_deref().unwrap_or_default());
        prop_assert_eq!(view.read_str(&mut offset).unwrap(), text.as_deref().unwrap_or_default());
    }
}

// Property: short reads never consume and never panic
proptest! {
    #[test]
    fn prop_truncated_reads_consume_nothing(data in prop::collection::vec(any::<u8>(), 0..16), start in 0usize..20) {
        let view = ByteView::new(&data);
        let mut offset = start;
        if view.read_bytes(&mut offset).is_err() {
            prop_assert_eq!(offset, start);
        }

        let mut cursor = StreamCursor::new(&data[..]);
        prop_assume!(cursor.try_skip(start));
        let before = cursor.position();
        if cursor.try_read_bytes().is_none() {
            prop_assert_eq!(cursor.position(), before);
        }
    }
}

// Property: frames reassemble regardless of chunk boundaries
proptest! {
    #[test]
    fn prop_frames_reassemble(bodies in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 1..5), chunk in 1usize..9) {
        let mut wire: Vec<u8> = Vec::new();
        for (kind, body) in bodies.iter().enumerate() {
            let size = MutableBuffer::measure(|buf, offset| {
                buf.write(kind as u16, offset);
                buf.write_bytes(Some(body.as_slice()), offset)
            }).unwrap();
            let start = wire.len();
            wire.resize(start + size, 0);
            let mut buf = MutableBuffer::new(&mut wire[start..]);
            let mut offset = 0;
            buf.write(kind as u16, &mut offset);
            buf.write_bytes(Some(body.as_slice()), &mut offset).unwrap();
        }

        let mut assembler = FrameAssembler::default();
        let mut decoded = Vec::new();
        for piece in wire.chunks(chunk) {
            assembler.push(piece.to_vec());
            while let Some(frame) = assembler.next_frame().unwrap() {
                decoded.push(frame);
            }
        }

        prop_assert_eq!(decoded.len(), bodies.len());
        for (kind, (frame, body)) in decoded.iter().zip(&bodies).enumerate() {
            prop_assert_eq!(frame.kind as usize, kind);
            prop_assert_eq!(&frame.body[..], &body[..]);
        }
    }
}
