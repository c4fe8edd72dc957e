#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the decoder with arbitrary bytes.
    // The decoder must never panic, only return errors.
    let _ = ykcmp::decompress(data);

    // The passthrough path must be total as well.
    let opts = ykcmp::DecodeOptions { passthrough: true };
    let _ = ykcmp::decompress_with(data, &opts);
});
