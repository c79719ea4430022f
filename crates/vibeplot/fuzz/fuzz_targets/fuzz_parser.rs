//! Fuzz target for CSV loading with formula decoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;
use vibeplot::{LoadedFile, VibeplotConfig};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(data).is_ok() {
            if let Ok(file) = LoadedFile::load(temp_file.path(), &VibeplotConfig::default()) {
                let _ = file.table.describe();
            }
        }
    }
});
