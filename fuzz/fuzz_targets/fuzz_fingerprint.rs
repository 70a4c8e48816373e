#![no_main]
use libfuzzer_sys::fuzz_target;
use viosync_fingerprint::fingerprint_components;
use viosync_types::Fingerprint;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let parts: Vec<&str> = s.split('\u{1f}').collect();

    let fp = fingerprint_components(&parts);
    assert_eq!(fp.as_str().len(), Fingerprint::HEX_LEN);
    assert!(fp.as_str().bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));

    // Concatenation without a separator yields the same digest.
    assert_eq!(fp, fingerprint_components([parts.concat()]));

    // The text form parses back to itself.
    let parsed: Fingerprint = fp.as_str().parse().expect("valid fingerprint");
    assert_eq!(parsed, fp);
});
