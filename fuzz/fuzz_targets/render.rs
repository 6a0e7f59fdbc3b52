#![no_main]

use libfuzzer_sys::fuzz_target;
use mapbin_decoder::MapDecoder;
use mapbin_driver::{DefaultDriver, MapDriver, OutputFormat, RenderConfig};

// Fuzz target: decode then render in both formats.
//
// Any tree the decoder accepts must render without panicking, whatever
// names and float bit patterns it carries.
fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = MapDecoder::new().decode(data) else {
        return;
    };
    for format in [OutputFormat::Json, OutputFormat::Xml] {
        let config = RenderConfig {
            format,
            pretty: true,
            xml_declaration: false,
        };
        DefaultDriver
            .render(&decoded.header, &decoded.root, &config)
            .unwrap();
    }
});
