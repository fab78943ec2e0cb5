//! Encoding of finished depictions.
//!
//! These tests verify that:
//! - JSON output keeps record order and propagates writer failures
//! - binary output is the `bincode` encoding of the tree
//! - every formatting trait forwards flags, width and precision to the tree

use std::io;

use depict::{portray, Depict, Depiction, Design, EncodeError, Node};

#[derive(Depict)]
struct Reading {
    sensor: &'static str,
    value: f64,
    flags: Vec<u8>,
    note: Option<String>,
}

fn depiction() -> Depiction {
    portray(&Reading {
        sensor: "t1",
        value: 21.456,
        flags: vec![10, 255],
        note: None,
    })
}

#[test]
fn json_keeps_declaration_order() {
    assert_eq!(
        depiction().to_json().unwrap(),
        r#"{"sensor":"t1","value":21.456,"flags":[10,255],"note":null}"#
    );
}

#[test]
fn pretty_json_parses_back_to_the_same_value() {
    let compact: serde_json::Value = serde_json::from_str(&depiction().to_json().unwrap()).unwrap();
    let pretty: serde_json::Value =
        serde_json::from_str(&depiction().to_json_pretty().unwrap()).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn write_json_matches_to_json() {
    let mut buffer = Vec::new();
    depiction().write_json(&mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), depiction().to_json().unwrap());
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writer_failures_are_returned() {
    let err = depiction().write_json(FailingWriter).unwrap_err();
    assert!(matches!(err, EncodeError::Json(_)));
    assert!(err.to_string().contains("closed"));

    let err = depiction().write_binary(FailingWriter).unwrap_err();
    assert!(matches!(err, EncodeError::Binary(_)));
}

#[test]
fn binary_is_the_bincode_encoding_of_the_tree() {
    let depiction = depiction();
    let bytes = depiction.to_binary().unwrap();
    assert_eq!(bytes, bincode::serialize(depiction.tree()).unwrap());

    let mut written = Vec::new();
    depiction.write_binary(&mut written).unwrap();
    assert_eq!(written, bytes);
}

#[test]
fn display_renders_the_tree() {
    assert_eq!(
        depiction().to_string(),
        "{sensor: t1, value: 21.456, flags: [10, 255], note: null}"
    );
}

#[test]
fn format_flags_are_forwarded() {
    let depiction = depiction();
    assert_eq!(format!("{depiction:.1}"), format!("{:.1}", depiction.tree()));
    assert_eq!(format!("{depiction:#?}"), format!("{:#?}", depiction.tree()));

    let flags = portray(&vec![10_u8, 255]);
    assert_eq!(format!("{flags:x}"), "[a, ff]");
    assert_eq!(format!("{flags:#X}"), "[0xA, 0xFF]");
    assert_eq!(format!("{flags:o}"), "[12, 377]");
    assert_eq!(format!("{flags:b}"), "[1010, 11111111]");
    assert_eq!(format!("{flags:04x}"), "[000a, 00ff]");

    let ratio = portray(&1500.0_f64);
    assert_eq!(format!("{ratio:e}"), "1.5e3");
    assert_eq!(format!("{ratio:E}"), "1.5E3");
}

#[test]
fn empty_depiction_formats_as_null() {
    let depiction = Design::new().exclude([""]).portray(&1_u8);
    assert_eq!(depiction.tree(), &Node::Nil);
    assert_eq!(depiction.to_string(), "null");
    assert_eq!(depiction.to_json().unwrap(), "null");
}
