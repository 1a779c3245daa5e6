#![no_main]

use libfuzzer_sys::fuzz_target;
use wire_buffer::{ByteView, ChunkedBytes};

fuzz_target!(|data: &[u8]| {
    // Strict reads must fail cleanly on any input
    let view = ByteView::new(data);
    let mut offset = 0;
    while offset < data.len() {
        let before = offset;
        let _ = view.read_str(&mut offset);
        let _ = view.read_long_str(&mut offset);
        let _ = view.read_bytes(&mut offset);
        let _ = view.read_le::<f64>(&mut offset);
        if offset == before {
            offset += 1;
        }
    }

    // Same bytes split into uneven fragments through the stream cursor
    let split = data.first().map_or(1, |b| usize::from(*b % 7) + 1);
    let chunks: ChunkedBytes = data.chunks(split).map(|c| c.to_vec()).collect();
    let mut cursor = chunks.cursor();
    loop {
        let before = cursor.position();
        let _ = cursor.try_peek_str();
        let _ = cursor.try_read_bytes();
        let _ = cursor.try_read_be::<u32>();
        if cursor.position() == before && !cursor.try_skip(1) {
            break;
        }
    }
});
