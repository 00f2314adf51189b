#![no_main]

use libfuzzer_sys::fuzz_target;
use yay0::{MIN_INPUT_SIZE, decode, encode};

/// Arbitrary bytes must decode to `Ok` or `Err`, never panic.
///
/// The input is tried as-is and with a valid magic word patched in, so the
/// fuzzer reaches the stream parsing instead of stopping at the header.
fn verify_decode_robustness(data: &[u8]) {
    let _ = decode(data);

    if data.len() >= 4 {
        let mut patched = data.to_vec();
        patched[..4].copy_from_slice(b"Yay0");
        let _ = decode(&patched);
    }
}

/// `decode(encode(data)) == data` for every input the encoder accepts.
fn verify_round_trip(data: &[u8]) {
    if data.len() < MIN_INPUT_SIZE {
        assert!(encode(data).is_err(), "encoder accepted {} bytes", data.len());
        return;
    }

    let compressed = encode(data).expect("input is large enough");
    match decode(&compressed) {
        Ok(decompressed) => {
            if decompressed != data {
                panic!(
                    "Round-trip mismatch!\nInput len: {}\nCompressed len: {}\nDecompressed len: {}",
                    data.len(),
                    compressed.len(),
                    decompressed.len()
                );
            }
        }
        Err(e) => {
            panic!(
                "Round-trip failed! Decoder rejected encoder output.\nError: {:?}\nInput len: {}",
                e,
                data.len()
            );
        }
    }
}

fuzz_target!(|data: &[u8]| {
    verify_decode_robustness(data);
    verify_round_trip(data);
});
