#![no_main]

use libfuzzer_sys::fuzz_target;
use mapbin_wire::varint::{decode_varint, encode_varint, MAX_VARINT_BYTES};

// Fuzz target: varint encode->decode roundtrip.
//
// Takes 4 bytes of fuzz input as a u32, encodes it, decodes it, and
// asserts both the value and the consumed length match.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let value = u32::from_le_bytes(data[..4].try_into().unwrap());

    let mut buf = [0u8; MAX_VARINT_BYTES];
    let encoded_len = encode_varint(value, &mut buf);

    let (decoded, decoded_len) = decode_varint(&buf[..encoded_len]).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(decoded_len, encoded_len);
});
