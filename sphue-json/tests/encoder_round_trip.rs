// SPDX-License-Identifier: Apache-2.0

// Bodies built with the encoder tree and read back with the decoder

use sphue_json::{
    ByteSource, ConfiguredInt, DecodeError, Decoder, JsonArray, JsonBool, JsonNumber, JsonObject,
    JsonString, Model, NumberType, Serializable, SliceSource, ToJson,
};

use test_log::test;

#[derive(Debug, Default, PartialEq)]
struct LightState {
    on: bool,
    bri: u8,
    ct: Option<u16>,
    xy: Vec<f32>,
    effect: String,
}

impl Model for LightState {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "on" => self.on = decoder.get()?,
            "bri" => self.bri = decoder.get()?,
            "ct" => self.ct = decoder.get()?,
            "xy" => self.xy = decoder.get()?,
            "effect" => decoder.get_string_into(&mut self.effect)?,
            _ => return Err(DecodeError::UnknownKey),
        }
        Ok(())
    }
}

fn decode_from<T: sphue_json::Decode>(json: &str) -> Result<T, DecodeError> {
    let mut source = SliceSource::from_text(json);
    let mut decoder = Decoder::new(&mut source);
    decoder.get()
}

#[test]
fn test_on_bri_body() {
    let mut body = JsonObject::new();
    body.add("on", true);
    body.add("bri", 200);
    assert_eq!(body.to_json(), r#"{"on":true,"bri":200}"#);
}

#[test]
fn test_scalar_round_trips() {
    let int: ConfiguredInt = -1234;
    let json = Serializable::from(JsonNumber::from(int)).to_json();
    assert_eq!(decode_from::<ConfiguredInt>(&json), Ok(int));

    let json = JsonNumber::from(0.1f64).to_json();
    assert_eq!(decode_from::<f64>(&json), Ok(0.1));

    let json = JsonNumber::from(-2.5e-9f64).to_json();
    let decoded = decode_from::<f64>(&json).unwrap();
    assert!((decoded - -2.5e-9).abs() < 1e-20, "{json} read back as {decoded}");

    let json = JsonBool::new(false).to_json();
    assert_eq!(decode_from::<bool>(&json), Ok(false));

    let json = JsonString::new("Living room").to_json();
    assert_eq!(decode_from::<String>(&json).as_deref(), Ok("Living room"));
}

#[test]
fn test_range_end_floats_round_trip() {
    let values = [
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        f64::EPSILON,
        8.98846567431158e307,
        2.718281828459045e-100,
        1e23,
        5e-324,
        -1.5e-7,
        6.02214076e23,
    ];
    for value in values {
        let json = JsonNumber::from(value).to_json();
        assert_eq!(decode_from::<f64>(&json), Ok(value), "{value} rendered as {json}");
    }
}

#[test]
#[cfg(feature = "unescape")]
fn test_escaped_string_round_trip() {
    let text = "tab\there \"quoted\" back\\slash\u{1}";
    let json = JsonString::escaped(text).to_json();
    assert_eq!(decode_from::<String>(&json).as_deref(), Ok(text));
}

#[test]
#[cfg(not(feature = "unescape"))]
fn test_escaped_string_passes_through() {
    let json = JsonString::escaped("say \"hi\"").to_json();
    // Escapes survive the decoder untouched
    assert_eq!(decode_from::<String>(&json).as_deref(), Ok(r#"say \"hi\""#));
}

#[test]
fn test_state_body_round_trip() {
    let mut xy = JsonArray::<JsonNumber>::with_capacity(2);
    xy.add(JsonNumber::from(0.5f32));
    xy.add(JsonNumber::from(0.375f32));

    let mut body = JsonObject::new();
    body.add("on", true);
    body.add("bri", 254u8);
    body.add("ct", 366u16);
    body.add("xy", xy);
    body.add("effect", "colorloop");
    body.add("transitiontime", 10);

    let json = body.to_json();
    assert_eq!(
        json,
        r#"{"on":true,"bri":254,"ct":366,"xy":[0.5,0.375],"effect":"colorloop","transitiontime":10}"#
    );
    let state = decode_from::<LightState>(&json).unwrap();
    assert_eq!(
        state,
        LightState {
            on: true,
            bri: 254,
            ct: Some(366),
            xy: vec![0.5, 0.375],
            effect: "colorloop".into(),
        }
    );
}

#[test]
fn test_number_type_switch_before_render() {
    let mut brightness = JsonNumber::from(127.6f64);
    brightness.set_type(NumberType::Int);
    let mut body = JsonObject::new();
    body.add("bri", brightness);
    assert_eq!(body.to_json(), r#"{"bri":127}"#);
    assert_eq!(decode_from::<LightState>(&body.to_json()).unwrap().bri, 127);
}

#[test]
fn test_mixed_array_round_trip() {
    let mut lights = JsonArray::<Serializable>::new();
    lights.add("1");
    lights.add("3");
    let mut group = JsonObject::new();
    group.add("name", JsonString::escaped("Upstairs"));
    group.add("lights", lights);
    group.add("recycle", JsonBool::new(false));

    #[derive(Default)]
    struct Group {
        name: String,
        lights: Vec<String>,
    }

    impl Model for Group {
        fn on_key<S: ByteSource + ?Sized>(
            &mut self,
            key: &str,
            decoder: &mut Decoder<'_, S>,
        ) -> Result<(), DecodeError> {
            match key {
                "name" => self.name = decoder.get()?,
                "lights" => self.lights = decoder.get()?,
                _ => return Err(DecodeError::UnknownKey),
            }
            Ok(())
        }
    }

    let decoded = decode_from::<Group>(&group.to_string()).unwrap();
    assert_eq!(decoded.name, "Upstairs");
    assert_eq!(decoded.lights, ["1", "3"]);
}

#[test]
fn test_non_finite_renders_as_null() {
    let mut body = JsonObject::new();
    body.add("x", f64::NAN);
    let json = body.to_json();
    assert_eq!(json, r#"{"x":null}"#);

    #[derive(Default)]
    struct X {
        x: Option<f64>,
    }
    impl Model for X {
        fn on_key<S: ByteSource + ?Sized>(
            &mut self,
            _key: &str,
            decoder: &mut Decoder<'_, S>,
        ) -> Result<(), DecodeError> {
            self.x = decoder.get()?;
            Ok(())
        }
    }
    assert_eq!(decode_from::<X>(&json).unwrap().x, None);
}
