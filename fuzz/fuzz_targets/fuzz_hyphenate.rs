#![no_main]

use arbitrary::Arbitrary;
use fhyph::Hyphenator;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzDeclaration {
    Class(String),
    Pattern { pattern: String, values: Vec<u8> },
    Exception { word: String, segments: Vec<u8> },
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    declarations: Vec<FuzzDeclaration>,
    words: Vec<String>,
    remain: u8,
    push: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut builder = Hyphenator::builder();
    for declaration in input.declarations.iter().take(256) {
        // Rejected declarations are expected; the builder must stay usable.
        let _ = match declaration {
            FuzzDeclaration::Class(group) => builder.add_class(group),
            FuzzDeclaration::Pattern { pattern, values } => {
                let digits: String = values.iter().map(|v| char::from(b'0' + v % 10)).collect();
                builder.add_pattern(pattern, &digits)
            }
            FuzzDeclaration::Exception { word, segments } => {
                let segments: Vec<u32> = segments.iter().map(|&s| u32::from(s % 8)).collect();
                builder.add_exception(word, &segments)
            }
        };
    }
    let engine = builder.freeze();

    let remain = usize::from(input.remain % 8);
    let push = usize::from(input.push % 8);
    for word in input.words.iter().take(64) {
        let Some(h) = engine.hyphenate(word, remain, push) else {
            continue;
        };
        let points = h.points();
        let chars = word.chars().count();
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        assert!(points.iter().all(|&p| p > 0 && p < chars));
        assert_eq!(h.segments().concat(), *word);
    }
});
