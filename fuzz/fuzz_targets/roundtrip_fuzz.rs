#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every payload must survive a compress/decompress cycle intact.
    let packed = ykcmp::compress(data).unwrap();
    let unpacked = ykcmp::decompress(&packed).unwrap();
    assert_eq!(unpacked, data);
});
