#![no_main]

use libfuzzer_sys::fuzz_target;

// A blob that reloads must answer queries without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(engine) = fhyph::Hyphenator::from_bytes(data) {
        for word in ["hyphenation", "a", "", "«x»", "abcdefghijklmnop"] {
            let _ = engine.hyphenate(word, 1, 1);
        }
        let _ = engine.find_pattern("ab");
    }
});
