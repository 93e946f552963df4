//! Fuzz target for the filter parser.
//!
//! Arbitrary text must parse or fail cleanly; parsed filters must validate
//! and evaluate without panicking.

#![no_main]

use gg_catalog::filter::parse_filter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(expr) = parse_filter(data) else {
        return;
    };

    // Parsed filters are always valid trees
    assert!(expr.validate().is_ok());

    // Display output is parseable input again, or a clean error
    let _ = parse_filter(&expr.to_string());

    let _ = expr.evaluate(&|_: &str| None);
});
