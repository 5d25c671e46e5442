//! Fuzz target: `POST /users` body parsing and validation.
//!
//! Arbitrary bytes are parsed as JSON and, when they form an object, run
//! through `NewUser::from_json_object`. Neither step may panic, and a body
//! that validates must carry a non-empty name.

#![no_main]

use idyllic_core::{CoreError, NewUser};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Object(body)) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    match NewUser::from_json_object(&body) {
        Ok(new_user) => assert!(!new_user.name.is_empty(), "validated name must be non-empty"),
        Err(CoreError::Validation(fields)) => {
            assert!(!fields.is_empty(), "validation error must name a field");
        }
        Err(other) => panic!("unexpected error kind: {other}"),
    }
});
