//! Fuzz target: `UserId` parsing from the `/users/{id}` path segment.
//!
//! Parsing must never panic, and any parsed ID must print back to a string
//! that parses to the same ID.

#![no_main]

use idyllic_core::UserId;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(id) = text.parse::<UserId>() {
        let reparsed: UserId = id.to_string().parse().expect("displayed id must parse");
        assert_eq!(reparsed, id);
    }
});
