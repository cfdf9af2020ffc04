#![no_main]
use libfuzzer_sys::fuzz_target;
use pnmconv::*;

fuzz_target!(|data: &[u8]| {
    // If the input converts, its output is canonical: converting twice more must reproduce it
    let Ok(converted) = radix_convert(data, enough::Unstoppable) else {
        return;
    };

    let Ok(back) = radix_convert(&converted, enough::Unstoppable) else {
        panic!("converted output failed to convert back");
    };
    let again = radix_convert(&back, enough::Unstoppable).expect("canonical output must convert");

    assert_eq!(converted, again, "radix round trip mismatch");

    let source = ImageHeader::from_bytes(data).expect("header parsed once already");
    let target = ImageHeader::from_bytes(&converted).expect("emitted header must parse");
    assert_eq!(source.width, target.width);
    assert_eq!(source.height, target.height);
    assert_eq!(source.format.radix_flipped(), target.format);
});
