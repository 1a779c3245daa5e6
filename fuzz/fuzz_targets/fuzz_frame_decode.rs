#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use tokio_util::codec::Decoder;
use wire_buffer::{FrameAssembler, FrameCodec};

fuzz_target!(|data: &[u8]| {
    // Small limit so hostile length fields hit the oversize path
    let mut codec = FrameCodec::new(4096);
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}

    let mut assembler = FrameAssembler::new(4096);
    for piece in data.chunks(5) {
        assembler.push(piece.to_vec());
        while let Ok(Some(_)) = assembler.next_frame() {}
    }
});
