#![no_main]
use libfuzzer_sys::fuzz_target;
use viosync_settings::SyncSettings;

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(settings) = SyncSettings::parse(s) {
        // Anything that parses is usable.
        assert!(settings.validate().is_ok());
        assert!(!settings.key_fields().expect("validated").is_empty());
    }
});
