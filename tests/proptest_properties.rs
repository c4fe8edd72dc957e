use proptest::prelude::*;
use ykcmp::format::header::{HEADER_LEN, Header};
use ykcmp::format::tiers::MAX_LITERAL_RUN;
use ykcmp::{compress, decompress};

proptest! {
    #[test]
    fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let packed = compress(&data).unwrap();
        let unpacked = decompress(&packed).unwrap();
        prop_assert_eq!(unpacked, data);
    }

    #[test]
    fn prop_header_describes_output(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let packed = compress(&data).unwrap();
        let hdr = Header::parse(&packed).unwrap();
        prop_assert_eq!(hdr.stream_end as usize, packed.len());
        prop_assert_eq!(hdr.uncompressed_size as usize, data.len());
    }

    #[test]
    fn prop_bounded_expansion(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        // Worst case is all literals: one flag byte per 127 input bytes
        // on top of the fixed header.
        let packed = compress(&data).unwrap();
        let bound = HEADER_LEN + data.len() + data.len().div_ceil(MAX_LITERAL_RUN);
        prop_assert!(packed.len() <= bound, "packed {} > bound {}", packed.len(), bound);
    }

    #[test]
    fn prop_repetitive_data_shrinks(byte in any::<u8>(), len in 64usize..2048) {
        let data = vec![byte; len];
        let packed = compress(&data).unwrap();
        prop_assert!(packed.len() < data.len(), "packed {} >= input {}", packed.len(), len);
    }

    #[test]
    fn prop_decoder_total_on_arbitrary_input(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        // Arbitrary bytes must produce a value or an error, never a panic.
        let _ = decompress(&data);
    }
}
