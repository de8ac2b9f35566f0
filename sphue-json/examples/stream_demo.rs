// SPDX-License-Identifier: Apache-2.0

// Decodes a registration reply straight from an io::Read, one byte at a time

use std::io::{BufReader, Cursor};

use sphue_json::{ByteSource, DecodeError, Decoder, Model, ReadSource};

#[derive(Debug, Default)]
struct Success {
    username: String,
}

impl Model for Success {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "username" => decoder.get_string_into(&mut self.username),
            _ => Err(DecodeError::UnknownKey),
        }
    }
}

/// Only the description of an error is kept; type and address are skipped.
#[derive(Debug, Default)]
struct ErrorDescription(String);

impl Model for ErrorDescription {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "description" => decoder.get_string_into(&mut self.0),
            _ => Err(DecodeError::UnknownKey),
        }
    }
}

#[derive(Debug, Default)]
struct RegisterResponse {
    success: Option<Success>,
    error: Option<String>,
}

impl Model for RegisterResponse {
    fn on_key<S: ByteSource + ?Sized>(
        &mut self,
        key: &str,
        decoder: &mut Decoder<'_, S>,
    ) -> Result<(), DecodeError> {
        match key {
            "success" => self.success = Some(decoder.get()?),
            "error" => self.error = Some(decoder.get::<ErrorDescription>()?.0),
            _ => return Err(DecodeError::UnknownKey),
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let replies = [
        r#"[{"success":{"username":"83b7780291a6ceffbe0bd049104df"}}]"#,
        r#"[{"error":{"type":101,"address":"","description":"link button not pressed"}}]"#,
    ];
    for reply in replies {
        let mut source = ReadSource::new(BufReader::new(Cursor::new(reply)));
        let mut decoder = Decoder::new(&mut source);
        let responses: Vec<RegisterResponse> = decoder.get()?;
        for response in responses {
            match (response.success, response.error) {
                (Some(success), _) => println!("Registered as {}", success.username),
                (None, Some(error)) => println!("Registration failed: {error}"),
                (None, None) => println!("Empty response"),
            }
        }
        if let Some(error) = source.take_error() {
            return Err(error.into());
        }
    }
    Ok(())
}
