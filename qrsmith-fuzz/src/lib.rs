//! Fuzzing harness for qrsmith-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

pub fn fuzz_decode(data: &[u8]) {
    use qrsmith_core::decoder::decode;

    // Try to decode - should never panic
    let _ = decode(data);
}

pub fn fuzz_generate(data: &[u8]) {
    use qrsmith_core::encoder::generate;

    // Any UTF-8 input must either encode or report an error
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = generate(text);
    }
}
