// SPDX-License-Identifier: MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let clean = snapname::naming::clean_suggestion(data);
    // sanitized output must be a safe base name
    assert!(!clean.contains('/'));
    assert!(!clean.contains(' '));
    assert!(!clean.starts_with('.'));
});
