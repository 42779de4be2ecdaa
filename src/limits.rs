use alloc::format;

/// Resource limits for a render call.
///
/// All fields default to `None` (no limit). The pipeline never allocates an
/// image buffer, so there is no memory cap to configure; limits here bound
/// how long a decode may run on hostile input.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum RLE records to process. Tightens the budget derived from the
    /// header; it never loosens it.
    pub max_rle_records: Option<u64>,
}

impl Limits {
    /// Check image dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::DecodeError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::DecodeError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::DecodeError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        Ok(())
    }

    /// Apply the configured RLE record cap to a header-derived budget.
    pub(crate) fn clamp_rle_budget(&self, budget: u64) -> u64 {
        match self.max_rle_records {
            Some(cap) => budget.min(cap),
            None => budget,
        }
    }
}
