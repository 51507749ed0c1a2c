//! Fuzz target for CSV table parsing.
//!
//! Goal: the table parsers should **never panic** on any input.
//! Malformed CSV may return errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_csv_tables
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = sodguard_loader::fuzz::parse_model_tables(text);
        let _ = sodguard_loader::fuzz::parse_rules(text, "SOD-AP-01");
    }
});
