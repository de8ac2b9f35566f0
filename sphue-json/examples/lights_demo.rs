// SPDX-License-Identifier: Apache-2.0

// Decodes a lights listing: an object keyed by numeric light id, each entry
// a light with a nested state record

use std::collections::BTreeMap;

use sphue_json::{ByteSource, DecodeError, Decoder, Model, SliceSource};

#[derive(Debug, Default)]
struct State {
    on: bool,
    bri: u8,
    hue: u16,
    sat: u8,
    ct: Option<u16>,
    reachable: bool,
}

impl Model for State {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "on" => self.on = decoder.get()?,
            "bri" => self.bri = decoder.get()?,
            "hue" => self.hue = decoder.get()?,
            "sat" => self.sat = decoder.get()?,
            "ct" => self.ct = decoder.get()?,
            "reachable" => self.reachable = decoder.get()?,
            _ => return Err(DecodeError::UnknownKey),
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Light {
    state: State,
    name: String,
    uniqueid: String,
}

impl Model for Light {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "state" => decoder.get_object(&mut self.state),
            "name" => decoder.get_string_into(&mut self.name),
            "uniqueid" => decoder.get_string_into(&mut self.uniqueid),
            _ => Err(DecodeError::UnknownKey),
        }
    }
}

#[derive(Debug, Default)]
struct Lights {
    lights: BTreeMap<u32, Light>,
}

impl Model for Lights {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        let id = key.parse::<u32>().map_err(|_| DecodeError::UnknownKey)?;
        let light = decoder.get::<Light>()?;
        self.lights.insert(id, light);
        Ok(())
    }
}

fn main() -> Result<(), DecodeError> {
    let body = r#"{
        "1": {
            "state": {"on": true, "bri": 144, "hue": 13088, "sat": 212, "xy": [0.5128, 0.4147],
                      "ct": 467, "alert": "none", "effect": "none", "colormode": "xy", "reachable": true},
            "type": "Extended color light",
            "name": "Hue Lamp 1",
            "modelid": "LCT001",
            "uniqueid": "00:17:88:01:00:bd:c7:b9-0b"
        },
        "2": {
            "state": {"on": false, "bri": 0, "hue": 0, "sat": 0, "reachable": false},
            "name": "Hue Lamp 2",
            "uniqueid": "00:17:88:01:00:bd:c7:ba-0b"
        },
        "groups": "not a light"
    }"#;

    let mut source = SliceSource::from_text(body);
    let mut decoder = Decoder::new(&mut source);
    let lights: Lights = decoder.get()?;

    for (id, light) in &lights.lights {
        let state = &light.state;
        println!(
            "{id}: {} ({}) on={} bri={} hue={} sat={} ct={:?} reachable={}",
            light.name,
            light.uniqueid,
            state.on,
            state.bri,
            state.hue,
            state.sat,
            state.ct,
            state.reachable
        );
    }
    Ok(())
}
