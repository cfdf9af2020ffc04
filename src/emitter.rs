//! Output side of the pipeline: the mirror of [`crate::lexer`].

use std::io::Write;

use crate::error::PnmError;
use crate::format::{Encoding, FormatCode};
use crate::header::ImageHeader;
use crate::pixel::Pixel;

/// Writes a header and then pixels, row by row, in one target format.
pub(crate) struct Emitter<W> {
    out: W,
    encoding: Encoding,
    /// Bits of the raw-bitmap byte being assembled, MSB first. Unused bits stay 1.
    packed: u8,
    packed_len: u8,
}

impl<W: Write> Emitter<W> {
    pub(crate) fn new(out: W, format: FormatCode) -> Self {
        Self {
            out,
            encoding: format.encoding(),
            packed: 0xFF,
            packed_len: 0,
        }
    }

    pub(crate) fn write_header(&mut self, header: &ImageHeader) -> Result<(), PnmError> {
        writeln!(self.out, "{header}")?;
        Ok(())
    }

    pub(crate) fn emit(&mut self, pixel: Pixel) -> Result<(), PnmError> {
        match (self.encoding, pixel) {
            (Encoding::Ascii, Pixel::Bit(black)) => write!(self.out, "{} ", u8::from(black))?,
            (Encoding::Binary, Pixel::Bit(black)) => self.pack_bit(black)?,
            (Encoding::Ascii, Pixel::Gray(v)) => write!(self.out, "{v:3} ")?,
            (Encoding::Binary, Pixel::Gray(v)) => self.out.write_all(&[v])?,
            (Encoding::Ascii, Pixel::Rgb([r, g, b])) => write!(self.out, "{r:3} {g:3} {b:3} ")?,
            (Encoding::Binary, Pixel::Rgb(rgb)) => self.out.write_all(&rgb)?,
        }
        Ok(())
    }

    fn pack_bit(&mut self, black: bool) -> Result<(), PnmError> {
        if !black {
            self.packed &= !(0x80 >> self.packed_len);
        }
        self.packed_len += 1;
        if self.packed_len == 8 {
            self.flush_packed()?;
        }
        Ok(())
    }

    fn flush_packed(&mut self) -> Result<(), PnmError> {
        self.out.write_all(&[self.packed])?;
        self.packed = 0xFF;
        self.packed_len = 0;
        Ok(())
    }

    /// Close the current row: flush a partial packed byte, newline for ASCII.
    pub(crate) fn end_row(&mut self) -> Result<(), PnmError> {
        if self.packed_len > 0 {
            self.flush_packed()?;
        }
        if self.encoding == Encoding::Ascii {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<W, PnmError> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_row(format: FormatCode, pixels: &[Pixel]) -> Vec<u8> {
        let mut em = Emitter::new(Vec::new(), format);
        for &p in pixels {
            em.emit(p).unwrap();
        }
        em.end_row().unwrap();
        em.finish().unwrap()
    }

    #[test]
    fn ascii_samples_are_padded() {
        let out = emit_row(
            FormatCode::PlainGraymap,
            &[Pixel::Gray(0), Pixel::Gray(42), Pixel::Gray(255)],
        );
        assert_eq!(out, b"  0  42 255 \n");
    }

    #[test]
    fn ascii_color_is_three_fields() {
        let out = emit_row(FormatCode::PlainPixmap, &[Pixel::Rgb([1, 20, 255])]);
        assert_eq!(out, b"  1  20 255 \n");
    }

    #[test]
    fn ascii_bits() {
        let out = emit_row(FormatCode::PlainBitmap, &[Pixel::Bit(true), Pixel::Bit(false)]);
        assert_eq!(out, b"1 0 \n");
    }

    #[test]
    fn binary_has_no_separators() {
        let out = emit_row(FormatCode::RawPixmap, &[Pixel::Rgb([1, 2, 3]), Pixel::Rgb([4, 5, 6])]);
        assert_eq!(out, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn partial_byte_padded_with_ones() {
        let out = emit_row(FormatCode::RawBitmap, &[Pixel::Bit(false), Pixel::Bit(true)]);
        assert_eq!(out, [0b0111_1111]);
    }

    #[test]
    fn full_byte_then_partial() {
        let mut row = vec![Pixel::Bit(true); 8];
        row.push(Pixel::Bit(false));
        row[0] = Pixel::Bit(false);
        let out = emit_row(FormatCode::RawBitmap, &row);
        assert_eq!(out, [0b0111_1111, 0b0111_1111]);
    }

    #[test]
    fn packer_resets_per_row() {
        let mut em = Emitter::new(Vec::new(), FormatCode::RawBitmap);
        for _ in 0..3 {
            em.emit(Pixel::Bit(false)).unwrap();
            em.end_row().unwrap();
        }
        assert_eq!(em.finish().unwrap(), [0x7F, 0x7F, 0x7F]);
    }

    #[test]
    fn header_line() {
        let mut em = Emitter::new(Vec::new(), FormatCode::RawBitmap);
        em.write_header(&ImageHeader {
            format: FormatCode::RawBitmap,
            width: 2,
            height: 2,
            max_sample: None,
        })
        .unwrap();
        assert_eq!(em.finish().unwrap(), b"P4 2 2\n");
    }
}
