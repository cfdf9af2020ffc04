/// One decoded pixel, alive only while it moves from lexer to emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pixel {
    /// Bilevel pixel; `true` is black (digit `1`, bit set).
    Bit(bool),
    /// Single intensity sample.
    Gray(u8),
    /// Red, green, blue samples.
    Rgb([u8; 3]),
}

/// Perceptual brightness of an RGB triple: `(299r + 587g + 114b) / 1000`,
/// integer division. The weights sum to 1000, so equal channels map to themselves.
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    let sum = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    // 1000 * 255 / 1000 at most
    (sum / 1000) as u8
}

/// Gray level at or below which a sample turns black: `(max_sample + 1) / 2`.
pub fn threshold(max_sample: u16) -> u16 {
    ((u32::from(max_sample) + 1) / 2) as u16
}

/// Whether a gray sample becomes white (digit `0`, bit clear) when reduced to bilevel.
pub fn is_white(sample: u8, max_sample: u16) -> bool {
    u16::from(sample) > threshold(max_sample)
}

/// Per-pixel transform between source and target color depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reduction {
    /// Radix conversion: values pass through untouched.
    Identity,
    /// Color to gray.
    Luminosity,
    /// Gray to bilevel.
    Threshold { max_sample: u16 },
}

impl Reduction {
    pub(crate) fn apply(self, pixel: Pixel) -> Pixel {
        match (self, pixel) {
            (Self::Luminosity, Pixel::Rgb([r, g, b])) => Pixel::Gray(luminosity(r, g, b)),
            (Self::Threshold { max_sample }, Pixel::Gray(v)) => {
                Pixel::Bit(!is_white(v, max_sample))
            }
            (_, p) => p,
        }
    }
}
