#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_transcode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // Plain formats, with comments and uneven whitespace
        fs::write(format!("{dir}/p1_2x2.pbm"), b"P1\n# bits\n2 2\n0 1\n1 0\n").unwrap();
        fs::write(format!("{dir}/p2_3x2.pgm"), b"P2 3 2\n# max\n255\n0 64 128\n192 255 100").unwrap();
        fs::write(format!("{dir}/p3_1x2.ppm"), b"P3\t1 2 15\n15 0 0\n0 15 7\n").unwrap();

        // Raw formats
        fs::write(format!("{dir}/p4_9x2.pbm"), b"P4 9 2\n\xaa\xff\x55\x7f").unwrap();
        let pgm = b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64";
        fs::write(format!("{dir}/p5_3x2.pgm"), pgm).unwrap();
        let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
        fs::write(format!("{dir}/p6_2x2.ppm"), ppm).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
        fs::write(format!("{dir}/p9.bin"), b"P9 1 1 255\n\x00").unwrap();
        fs::write(format!("{dir}/max_300.bin"), b"P5 1 1 300\n\x00").unwrap();
        fs::write(format!("{dir}/open_comment.bin"), b"P2 # never closed").unwrap();
    }

    println!("Generated seed corpora under fuzz/corpus/");
}
