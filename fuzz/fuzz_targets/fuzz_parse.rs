#![no_main]

use libfuzzer_sys::fuzz_target;
use riffwave::{parse_with, DataBounds, ParseOptions, WAV_MIME_TYPE};

fuzz_target!(|data: &[u8]| {
    for bounds in [DataBounds::Exact, DataBounds::Legacy] {
        let options = ParseOptions::default().data_bounds(bounds);
        if let Ok(descriptor) = parse_with(data, WAV_MIME_TYPE, data.len(), &options) {
            assert!(descriptor.data.len() <= data.len());
            assert!(descriptor.milliseconds.is_finite());
        }
    }
});
