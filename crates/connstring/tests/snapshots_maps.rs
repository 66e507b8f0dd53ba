#![expect(missing_docs)]

use core::fmt::Write;

use connstring::{ConnectionStringParser, ParserOptions, Text};

fn render(inputs: &[&str], options: ParserOptions) -> String {
    let mut parser = ConnectionStringParser::with_options(options);
    let mut out = String::new();
    for input in inputs {
        match parser.parse(Some(&Text::from(*input))) {
            Ok(map) => writeln!(out, "{input:?} => {map:?}").unwrap(),
            Err(err) => writeln!(out, "{input:?} => error: {err}").unwrap(),
        }
    }
    out
}

#[test]
fn snapshot_default_options() {
    let inputs = [
        "key1=value1",
        "key1=value1;key2=value2",
        "key1=value1;key2=value2;",
        "",
        ";;",
        "key1=",
        "key1=;",
        "=value1",
        "key1=value1;key1=value2",
        "a=1;;b=2",
        "a=b=c",
    ];

    insta::assert_snapshot!(render(&inputs, ParserOptions::default()), @r#"
    "key1=value1" => {"key1": "value1"}
    "key1=value1;key2=value2" => {"key1": "value1", "key2": "value2"}
    "key1=value1;key2=value2;" => {"key1": "value1", "key2": "value2"}
    "" => {}
    ";;" => {}
    "key1=" => error: key without a value
    "key1=;" => {"key1": ""}
    "=value1" => error: empty key
    "key1=value1;key1=value2" => error: key rejected by the map
    "a=1;;b=2" => {"a": "1", "b": "2"}
    "a=b=c" => {"a": "b=c"}
    "#);
}

#[test]
fn snapshot_strict_options() {
    let inputs = ["a=1;", "a=1;;", "a=1;;b=2", ";"];
    let options = ParserOptions {
        skip_empty_pairs: false,
        ..Default::default()
    };

    insta::assert_snapshot!(render(&inputs, options), @r#"
    "a=1;" => {"a": "1"}
    "a=1;;" => error: key without a value
    "a=1;;b=2" => {"a": "1", ";b": "2"}
    ";" => error: key without a value
    "#);
}

#[test]
fn snapshot_display_round_trip() {
    let map = connstring::parse_str("HostName=hub.example.net;;DeviceId=dev-01;").unwrap();
    insta::assert_snapshot!(map.to_string(), @"HostName=hub.example.net;DeviceId=dev-01");
}
