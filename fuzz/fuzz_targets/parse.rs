#![no_main]

use libfuzzer_sys::fuzz_target;
use textalk_syntax::{ParseConfig, parse, parse_with_config};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let result = parse(s);
        // Whatever parsed must serialize, and the raw tree must too.
        let _ = result.root.to_code();
        let _ = parse_with_config(s, &ParseConfig::raw()).root.to_code();
    }
});
