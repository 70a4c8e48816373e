#![no_main]
use libfuzzer_sys::fuzz_target;
use viosync_tidelift::parse_report;

const MAX_INPUT_SIZE: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Must never panic; errors are fine.
    let _ = parse_report(s, "fuzz");
});
