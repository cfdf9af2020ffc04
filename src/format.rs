/// How samples are stored in the pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Whitespace-separated decimal tokens (P1, P2, P3).
    Ascii,
    /// Raw bytes, one per sample; bilevel packs 8 samples per byte (P4, P5, P6).
    Binary,
}

/// How many distinct values a pixel can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorDepth {
    /// One bit per pixel, 1 = black.
    Bilevel,
    /// One intensity sample per pixel.
    Gray,
    /// Three samples per pixel, in r, g, b order.
    Color,
}

impl ColorDepth {
    /// The next lower depth, if any.
    pub fn reduced(self) -> Option<Self> {
        match self {
            Self::Color => Some(Self::Gray),
            Self::Gray => Some(Self::Bilevel),
            Self::Bilevel => None,
        }
    }
}

/// One of the six Netpbm variants, identified by the digit after `P`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatCode {
    /// P1 — plain PBM.
    PlainBitmap,
    /// P2 — plain PGM.
    PlainGraymap,
    /// P3 — plain PPM.
    PlainPixmap,
    /// P4 — raw PBM.
    RawBitmap,
    /// P5 — raw PGM.
    RawGraymap,
    /// P6 — raw PPM.
    RawPixmap,
}

impl FormatCode {
    /// Format for a magic digit `1..=6`.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::PlainBitmap),
            2 => Some(Self::PlainGraymap),
            3 => Some(Self::PlainPixmap),
            4 => Some(Self::RawBitmap),
            5 => Some(Self::RawGraymap),
            6 => Some(Self::RawPixmap),
            _ => None,
        }
    }

    /// The digit written after `P` in the magic number.
    pub fn digit(self) -> u8 {
        match self {
            Self::PlainBitmap => 1,
            Self::PlainGraymap => 2,
            Self::PlainPixmap => 3,
            Self::RawBitmap => 4,
            Self::RawGraymap => 5,
            Self::RawPixmap => 6,
        }
    }

    /// Build a format from its two orthogonal properties.
    pub fn from_parts(encoding: Encoding, depth: ColorDepth) -> Self {
        match (encoding, depth) {
            (Encoding::Ascii, ColorDepth::Bilevel) => Self::PlainBitmap,
            (Encoding::Ascii, ColorDepth::Gray) => Self::PlainGraymap,
            (Encoding::Ascii, ColorDepth::Color) => Self::PlainPixmap,
            (Encoding::Binary, ColorDepth::Bilevel) => Self::RawBitmap,
            (Encoding::Binary, ColorDepth::Gray) => Self::RawGraymap,
            (Encoding::Binary, ColorDepth::Color) => Self::RawPixmap,
        }
    }

    pub fn encoding(self) -> Encoding {
        if self.digit() <= 3 {
            Encoding::Ascii
        } else {
            Encoding::Binary
        }
    }

    pub fn depth(self) -> ColorDepth {
        match self {
            Self::PlainBitmap | Self::RawBitmap => ColorDepth::Bilevel,
            Self::PlainGraymap | Self::RawGraymap => ColorDepth::Gray,
            Self::PlainPixmap | Self::RawPixmap => ColorDepth::Color,
        }
    }

    /// Whether the header carries a max-sample field. False only for bitmaps.
    pub fn has_max_sample(self) -> bool {
        self.depth() != ColorDepth::Bilevel
    }

    /// Same depth, other encoding: P1↔P4, P2↔P5, P3↔P6.
    pub fn radix_flipped(self) -> Self {
        let encoding = match self.encoding() {
            Encoding::Ascii => Encoding::Binary,
            Encoding::Binary => Encoding::Ascii,
        };
        Self::from_parts(encoding, self.depth())
    }

    /// Same encoding, one depth step down: P3→P2→P1, P6→P5→P4.
    pub fn downsampled(self) -> Option<Self> {
        let depth = self.depth().reduced()?;
        Some(Self::from_parts(self.encoding(), depth))
    }
}
