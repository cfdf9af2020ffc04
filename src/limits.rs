use crate::PnmError;

/// Resource limits checked once the header has been parsed.
///
/// All fields default to `None` (no limit). Nothing is written to the output
/// until the limits pass.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// Fail with `LimitExceeded` naming the first cap the header dimensions break.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PnmError> {
        let (width, height) = (u64::from(width), u64::from(height));
        let checks = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width * height, self.max_pixels),
        ];
        for (what, value, cap) in checks {
            match cap {
                Some(cap) if value > cap => {
                    return Err(PnmError::LimitExceeded(format!(
                        "{what} {value} exceeds limit {cap}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
