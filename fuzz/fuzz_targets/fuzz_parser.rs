#![no_main]
use arbitrary::Arbitrary;
use connstring::{ConnectionStringParser, ParseError, ParserOptions, Text};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    bytes: Vec<u8>,
    skip_empty_pairs: bool,
}

fuzz_target!(|input: Input| {
    let options = ParserOptions {
        skip_empty_pairs: input.skip_empty_pairs,
        ..Default::default()
    };
    let text = Text::from(input.bytes);
    let mut parser = ConnectionStringParser::with_options(options);

    let parsed = parser.parse(Some(&text));
    if let Ok(map) = &parsed {
        for (key, value) in map {
            assert!(!key.is_empty());
            assert!(!key.as_bytes().contains(&options.key_delimiter));
            assert!(!value.as_bytes().contains(&options.pair_delimiter));
        }
    }

    // The lazy sequence agrees with the eager parse up to the first error.
    let pairs: Result<Vec<_>, ParseError> = parser.pairs(&text).unwrap().collect();
    match (&parsed, pairs) {
        (Ok(map), Ok(pairs)) => {
            assert_eq!(map.len(), pairs.len());
            for pair in &pairs {
                assert_eq!(map.get(&pair.key), Some(pair.value.as_str()));
            }
        }
        // Duplicates are only detected by the map.
        (Err(ParseError::RejectedKey), _) => {}
        (Err(parsed), Err(lazy)) => assert_eq!(*parsed, lazy),
        (parsed, pairs) => panic!("eager {parsed:?} disagrees with lazy {pairs:?}"),
    }
});
