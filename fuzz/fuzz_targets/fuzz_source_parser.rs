#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(engine) = fhyph::Hyphenator::from_source(text) {
        for word in text.split_whitespace().take(16) {
            let _ = engine.hyphenate(word, 1, 1);
        }
    }
});
