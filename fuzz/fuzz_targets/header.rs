#![no_main]

use libfuzzer_sys::fuzz_target;
use mapbin_wire::{ByteReader, MapHeader, StringLookupTable};

// Fuzz target: header and lookup table parsing.
//
// Catches bugs in:
// - Length prefixes larger than the input
// - Invalid UTF-8
// - Huge lookup-table counts with little data behind them
fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    if MapHeader::read_from(&mut reader).is_ok() {
        let _ = StringLookupTable::read_from(&mut reader);
    }
});
