#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use fhyph_tree::TernaryTree;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    entries: Vec<(String, u32)>,
    probe: String,
    trim: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut tree = TernaryTree::new();
    let mut model = BTreeMap::new();
    for (key, value) in input.entries.into_iter().take(512) {
        if key.is_empty() || key.contains('\0') {
            continue;
        }
        tree.insert(&key, value);
        model.insert(key, value);
    }
    if input.trim {
        tree.trim_to_size();
    }
    assert!(tree.validate());
    assert_eq!(tree.len(), model.len());
    for (key, value) in &model {
        assert_eq!(tree.find(key), Some(*value));
    }
    if !input.probe.contains('\0') {
        assert_eq!(tree.find(&input.probe), model.get(&input.probe).copied());
    }
    assert_eq!(tree.entries(), model.into_iter().collect::<Vec<_>>());
});
