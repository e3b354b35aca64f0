#![no_main]

use frontier::content::{Catalog, ContentRepository};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed input is an error, never a panic
    let Ok(catalog) = Catalog::from_json_str(text) else {
        return;
    };

    // Every admitted id resolves and names stay unique
    for guardian in catalog.guardians() {
        assert!(catalog.guardian(&guardian.id).is_some());
        assert_eq!(catalog.id_by_name(&guardian.name), Some(guardian.id.as_str()));
    }
    for item in catalog.items() {
        assert!(catalog.item(&item.id).is_some());
        assert_eq!(catalog.id_by_name(&item.name), Some(item.id.as_str()));
    }
});
