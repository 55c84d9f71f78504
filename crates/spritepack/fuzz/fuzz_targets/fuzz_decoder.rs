#![no_main]

use libfuzzer_sys::fuzz_target;
use spritepack::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Every length read from the stream goes through a checked cursor, so
    // hostile sizes and counts must come back as errors, never as a panic or
    // an out-of-bounds slice.
    let Ok(sheet) = decode(data) else {
        return;
    };

    let pixels = sheet.width() as usize * sheet.height() as usize;
    assert_eq!(sheet.to_rgba8().len(), pixels * 4);
    // Padding bits may differ, but the structural length may not.
    assert_eq!(encode(&sheet).map(|bytes| bytes.len()), Ok(data.len()));
});
