// SPDX-License-Identifier: Apache-2.0

// End-to-end decoding of bridge-style payloads through the public API

use sphue_json::{ByteSource, DecodeError, Decoder, Model, Scanner, SliceSource, ValueKind};

use test_log::test;

#[derive(Debug, Default, PartialEq)]
struct DiscoveryResponse {
    id: String,
    ip: String,
}

impl Model for DiscoveryResponse {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "id" => decoder.get_string_into(&mut self.id),
            "internalipaddress" => decoder.get_string_into(&mut self.ip),
            _ => Err(DecodeError::UnknownKey),
        }
    }
}

/// Accepts only `A` and `C`, counting every key it was offered.
#[derive(Debug, Default)]
struct OnlyAc {
    a: Option<i32>,
    c: Option<String>,
    offered: usize,
}

impl Model for OnlyAc {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        self.offered += 1;
        match key {
            "A" => self.a = Some(decoder.get()?),
            "C" => self.c = Some(decoder.get()?),
            _ => return Err(DecodeError::UnknownKey),
        }
        Ok(())
    }
}

#[test]
fn test_discovery_record() {
    let json = br#"{"id":"001788fffe4a1b2c","internalipaddress":"192.168.1.2"}"#;
    let mut source = SliceSource::new(json);
    let mut decoder = Decoder::new(&mut source);
    let mut response = DiscoveryResponse::default();
    assert_eq!(decoder.get_object(&mut response), Ok(()));
    assert_eq!(response.id, "001788fffe4a1b2c");
    assert_eq!(response.ip, "192.168.1.2");
    assert!(!source.available());
}

#[test]
fn test_discovery_array() {
    let json = br#"[{"id":"1","internalipaddress":"10.0.0.1"},{"id":"2","internalipaddress":"10.0.0.2"}]"#;
    let mut source = SliceSource::new(json);
    let mut decoder = Decoder::new(&mut source);
    let mut bridges = decoder.iterate_array::<DiscoveryResponse>().unwrap();

    let first = bridges.next().unwrap().unwrap();
    assert_eq!(first.id, "1");
    assert_eq!(first.ip, "10.0.0.1");
    assert!(bridges.has_next());

    let second = bridges.next().unwrap().unwrap();
    assert_eq!(second.id, "2");
    assert_eq!(second.ip, "10.0.0.2");
    assert!(!bridges.has_next());
    assert!(bridges.next().is_none());
    assert_eq!(bridges.finish(), Ok(()));
}

#[test]
fn test_discovery_array_with_extra_fields() {
    let json = br#"[
        {"id": "1", "internalipaddress": "10.0.0.1", "port": 443, "meta": {"tags": ["a", "b"]}},
        {"name": "no id here", "internalipaddress": "10.0.0.9"}
    ]"#;
    let mut source = SliceSource::new(json);
    let mut decoder = Decoder::new(&mut source);
    let bridges: Vec<DiscoveryResponse> = decoder.get().unwrap();
    assert_eq!(
        bridges,
        [
            DiscoveryResponse {
                id: "1".into(),
                ip: "10.0.0.1".into()
            },
            DiscoveryResponse {
                id: String::new(),
                ip: "10.0.0.9".into()
            },
        ]
    );
}

#[test]
fn test_member_independence() {
    let json = br#"{"A": 1, "B": {"deep": [1, [2, {"x": "]}"}]]}, "C": "kept", "D": [true]}"#;
    let mut source = SliceSource::new(json);
    let mut decoder = Decoder::new(&mut source);
    let mut model = OnlyAc::default();
    assert_eq!(decoder.get_object(&mut model), Ok(()));
    assert_eq!(model.a, Some(1));
    assert_eq!(model.c.as_deref(), Some("kept"));
    assert_eq!(model.offered, 4);
    assert!(!source.available());
}

#[test]
fn test_member_with_wrong_type_does_not_stop_object() {
    let json = br#"{"A": "one", "C": "still here"}"#;
    let mut source = SliceSource::new(json);
    let mut decoder = Decoder::new(&mut source);
    let mut model = OnlyAc::default();
    assert_eq!(decoder.get_object(&mut model), Ok(()));
    assert_eq!(model.a, None);
    assert_eq!(model.c.as_deref(), Some("still here"));
}

#[test]
fn test_skip_nested_value_stops_at_comma() {
    let mut source = SliceSource::new(br#"{"a":{"b":[1,2,{"c":3}]}},"after""#);
    assert_eq!(source.skip_value(), Ok(()));
    assert_eq!(source.peek(), Some(b','));
    source.read();
    let mut decoder = Decoder::new(&mut source);
    assert_eq!(decoder.get_string().as_deref(), Ok("after"));
}

#[test]
fn test_sniff_then_decide() {
    let json = br#"[3, "3", 3.5, null, true]"#;
    let mut source = SliceSource::new(json);
    let mut decoder = Decoder::new(&mut source);
    decoder.source().read();
    let mut seen = Vec::new();
    loop {
        let kind = decoder.check_value_type();
        let text = match kind {
            ValueKind::Null => {
                decoder.get_null().unwrap();
                String::from("null")
            }
            _ => decoder.get_as_string().unwrap(),
        };
        seen.push((kind, text));
        if !decoder.source().find_char(b',', true) {
            break;
        }
        decoder.source().read();
    }
    assert_eq!(
        seen,
        [
            (ValueKind::Number, "3".to_string()),
            (ValueKind::String, "3".to_string()),
            (ValueKind::Number, "3.5".to_string()),
            (ValueKind::Null, "null".to_string()),
            (ValueKind::Bool, "true".to_string()),
        ]
    );
}

/// A source that hands out one byte per scheduler slot, the way a socket
/// reader on a cooperative runtime would.
struct TrickleSource<'a> {
    data: &'a [u8],
    pos: usize,
    slots: usize,
}

impl ByteSource for TrickleSource<'_> {
    fn peek(&mut self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn read(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn yield_now(&mut self) {
        self.slots += 1;
    }
}

#[test]
fn test_custom_source_gets_yields() {
    let mut source = TrickleSource {
        data: br#"[{"id":"abc","internalipaddress":"1.2.3.4","x":[1,2,3]}]"#,
        pos: 0,
        slots: 0,
    };
    let mut decoder = Decoder::new(&mut source);
    let bridges: Vec<DiscoveryResponse> = decoder.get().unwrap();
    assert_eq!(bridges.len(), 1);
    assert_eq!(bridges[0].ip, "1.2.3.4");
    assert!(source.slots > 10);
    assert_eq!(source.pos, source.data.len());
}

#[test]
fn test_truncated_stream() {
    let mut source = SliceSource::new(br#"[{"id":"1","internalipaddress":"10.0"#);
    let mut decoder = Decoder::new(&mut source);
    let mut bridges = decoder.iterate_array::<DiscoveryResponse>().unwrap();
    assert_eq!(bridges.next(), Some(Err(DecodeError::EndOfData)));
    assert!(!bridges.has_next());
    assert_eq!(bridges.finish(), Err(DecodeError::EndOfData));
}

#[cfg(feature = "std")]
mod io_source {
    use super::*;
    use sphue_json::ReadSource;
    use std::io::Read;
    use test_log::test;

    /// Returns at most `chunk` bytes per read call.
    struct ChunkReader<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for ChunkReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let count = self.chunk.min(buf.len()).min(self.data.len());
            buf[..count].copy_from_slice(&self.data[..count]);
            self.data = &self.data[count..];
            Ok(count)
        }
    }

    #[test]
    fn test_discovery_over_reader() {
        let reader = ChunkReader {
            data: br#"[{"id":"1","internalipaddress":"10.0.0.1"},{"id":"2","internalipaddress":"10.0.0.2"}]"#,
            chunk: 3,
        };
        let mut source = ReadSource::new(reader);
        let mut decoder = Decoder::new(&mut source);
        let bridges: Vec<DiscoveryResponse> = decoder.get().unwrap();
        assert_eq!(bridges.len(), 2);
        assert_eq!(bridges[1].id, "2");
        assert!(source.take_error().is_none());
    }
}
