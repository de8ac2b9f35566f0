// SPDX-License-Identifier: Apache-2.0

// Builds the request bodies a bridge client sends

use sphue_json::{JsonArray, JsonNumber, JsonObject, JsonString, NumberType, ToJson};

fn main() {
    // Registering a new API user
    let mut register = JsonObject::new();
    register.add("devicetype", JsonString::escaped("sphue#kitchen \"panel\""));
    println!("POST /api {}", register.to_json());

    // Changing a light's state
    let mut xy = JsonArray::<JsonNumber>::with_capacity(2);
    xy.add(JsonNumber::from(0.4573f32));
    xy.add(JsonNumber::from(0.41f32));

    // Brightness computed as a fraction, sent as an integer
    let mut bri = JsonNumber::from(254.0 * 0.75);
    bri.set_type(NumberType::Int);

    let mut state = JsonObject::new();
    state.add("on", true);
    state.add("bri", bri);
    state.add("xy", xy);
    state.add("transitiontime", 4);
    println!("PUT /api/<user>/lights/1/state {state}");

    // Re-adding a key replaces the value in place
    state.add("on", false);
    state.remove("xy");
    println!("PUT /api/<user>/lights/1/state {state}");
}
