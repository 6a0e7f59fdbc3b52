#![no_main]

use libfuzzer_sys::fuzz_target;
use mapbin_decoder::{DecoderConfig, MapDecoder};

// Fuzz target: full document decode.
//
// Catches bugs in:
// - Deep nesting (stack exhaustion past the depth limit)
// - Child counts far larger than the remaining input
// - Unknown attribute tags and odd run-length sizes
// - Lookup and run-length strings expanding past the output budget
fuzz_target!(|data: &[u8]| {
    let decoder = MapDecoder::with_config(DecoderConfig {
        max_depth: 64,
        max_decoded_bytes: 16 * 1024 * 1024,
        ..DecoderConfig::default()
    });
    let _ = decoder.decode(data);
});
