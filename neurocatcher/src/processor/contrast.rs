//! Contrast stretching around the per-channel mean.

use crate::{common::*, volume::GrayRange};

/// Scales every pixel's distance to its channel mean by `factor`.
///
/// Each channel plane is processed independently and the results are
/// saturated into the gray range. The factor must be finite and positive.
pub fn adjust_contrast(
    patch: ArrayView3<'_, f32>,
    factor: f32,
    gray_range: GrayRange,
) -> Result<Array3<f32>> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(Error::InvalidContrastFactor(factor));
    }
    let mut output = patch.to_owned();

    output.axis_iter_mut(Axis(2)).for_each(|mut plane| {
        let mean = plane.mean().unwrap_or(0.0);
        plane.mapv_inplace(|value| gray_range.clamp((value - mean) * factor + mean));
    });

    Ok(output)
}
