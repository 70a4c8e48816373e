#![no_main]
use libfuzzer_sys::fuzz_target;
use viosync_group::group_violations;
use viosync_types::{FlatRecord, KeyFieldList};

const MAX_INPUT_SIZE: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(records) = serde_json::from_slice::<Vec<FlatRecord>>(data) else {
        return;
    };
    let Ok(fields) = KeyFieldList::new(["a", "b"]) else {
        return;
    };

    let total = records.len();
    let Ok(units) = group_violations(records, &fields) else {
        return;
    };

    // Partition: every record lands in exactly one unit.
    let grouped: usize = units.iter().map(|u| u.records.len()).sum();
    assert_eq!(grouped, total);

    // Key paths are unique and as deep as the key list.
    for (i, unit) in units.iter().enumerate() {
        assert_eq!(unit.key_path.len(), fields.len());
        assert!(!unit.records.is_empty());
        for other in &units[i + 1..] {
            assert_ne!(unit.key_path, other.key_path);
        }
    }
});
