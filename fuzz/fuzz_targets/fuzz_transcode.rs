#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Both modes on arbitrary input — must never panic
    let _ = pnmconv::downsample(data, enough::Unstoppable);
    let _ = pnmconv::radix_convert(data, enough::Unstoppable);
    let _ = pnmconv::ImageHeader::from_bytes(data);
});
