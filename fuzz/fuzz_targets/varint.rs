#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: decode_varint LEB128 codec.
//
// Catches bugs in:
// - Sixth continuation group (MalformedVarint)
// - Zero-length input
// - Fifth-group bits above bit 31
fuzz_target!(|data: &[u8]| {
    let _ = mapbin_wire::varint::decode_varint(data);
});
