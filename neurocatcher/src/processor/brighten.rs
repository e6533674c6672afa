//! Additive brightness shift.

use crate::{common::*, volume::GrayRange};

/// Adds `delta` to every pixel and saturates the result into the gray range.
pub fn brighten(
    patch: ArrayView3<'_, f32>,
    delta: f32,
    gray_range: GrayRange,
) -> Result<Array3<f32>> {
    if !delta.is_finite() {
        return Err(Error::InvalidBrightnessDelta(delta));
    }
    Ok(patch.mapv(|value| gray_range.clamp(value + delta)))
}
