// SPDX-License-Identifier: Apache-2.0

// Picks the first usable bridge out of a discovery endpoint response

use sphue_json::{ByteSource, DecodeError, Decoder, Model, SliceSource};

#[derive(Debug, Default)]
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

fn main() -> Result<(), DecodeError> {
    let body = br#"[
        {"id": "001788fffe100491", "internalipaddress": "192.168.2.23", "port": 443},
        {"id": "001788fffe09dddd", "internalipaddress": "192.168.88.252"}
    ]"#;
    println!("Input: {}", String::from_utf8_lossy(body));

    let mut source = SliceSource::new(body);
    let mut decoder = Decoder::new(&mut source);
    let mut bridges = decoder.iterate_array::<DiscoveryResponse>()?;
    let mut response = DiscoveryResponse::default();
    while let Some(result) = bridges.next_into(&mut response) {
        match result {
            Ok(()) if !response.ip.is_empty() => {
                println!("Using bridge {} at {}", response.id, response.ip);
                break;
            }
            Ok(()) => println!("Bridge {} has no address, trying the next", response.id),
            Err(error) => println!("Skipping malformed entry: {error}"),
        }
    }
    // The remaining entries are skipped and the closing bracket consumed
    bridges.finish()?;
    println!("Consumed {} of {} bytes", source.position(), body.len());
    Ok(())
}
