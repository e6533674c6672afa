//! Randomized augmentation parameters and their application to patch pairs.

use super::{adjust_contrast, brighten, flip_up_down, rotate90};
use crate::{common::*, volume::GrayRange};

/// The range of multiplicative contrast factors.
pub const CONTRAST_FACTOR_RANGE: Range<f32> = 0.1..2.1;

/// Toggles for each augmentation category.
///
/// Every category is enabled unless explicitly turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Randomly mirror the patch vertically.
    pub flip: bool,
    /// Randomly rotate the patch by quarter turns.
    pub rotate: bool,
    /// Randomly shift pixel intensities.
    pub brighten: bool,
    /// Randomly stretch intensities around the channel means.
    pub contrast: bool,
}

impl AugmentConfig {
    /// Configuration with every augmentation turned off.
    pub fn disabled() -> Self {
        Self {
            flip: false,
            rotate: false,
            brighten: false,
            contrast: false,
        }
    }
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            flip: true,
            rotate: true,
            brighten: true,
            contrast: true,
        }
    }
}

/// Augmentation applied to one sampled patch pair.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
pub struct AugmentParams {
    #[getset(get_copy = "pub")]
    flip: bool,
    /// Counterclockwise quarter turns in `0..=3`.
    #[getset(get_copy = "pub")]
    rotation_steps: u8,
    #[getset(get_copy = "pub")]
    brightness_delta: f32,
    #[getset(get_copy = "pub")]
    contrast_factor: f32,
}

impl AugmentParams {
    pub fn new(
        flip: bool,
        rotation_steps: u8,
        brightness_delta: f32,
        contrast_factor: f32,
    ) -> Result<Self> {
        if rotation_steps > 3 {
            return Err(Error::InvalidRotationSteps(rotation_steps));
        }
        if !brightness_delta.is_finite() {
            return Err(Error::InvalidBrightnessDelta(brightness_delta));
        }
        if !(contrast_factor.is_finite() && contrast_factor > 0.0) {
            return Err(Error::InvalidContrastFactor(contrast_factor));
        }

        Ok(Self {
            flip,
            rotation_steps,
            brightness_delta,
            contrast_factor,
        })
    }

    /// Parameters that leave a patch untouched.
    pub fn identity() -> Self {
        Self {
            flip: false,
            rotation_steps: 0,
            brightness_delta: 0.0,
            contrast_factor: 1.0,
        }
    }

    /// Draws parameters for the enabled categories.
    ///
    /// Values are drawn in the order flip, rotation, brightness, contrast.
    /// Disabled categories take their identity value without consuming
    /// randomness.
    pub fn draw<R>(config: &AugmentConfig, gray_range: GrayRange, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let flip = config.flip && rng.gen::<bool>();
        let rotation_steps = if config.rotate {
            rng.gen_range(0..4)
        } else {
            0
        };
        let brightness_delta = if config.brighten {
            let half = gray_range.span() / 2.0;
            rng.gen_range(-half..half)
        } else {
            0.0
        };
        let contrast_factor = if config.contrast {
            rng.gen_range(CONTRAST_FACTOR_RANGE)
        } else {
            1.0
        };

        Self {
            flip,
            rotation_steps,
            brightness_delta,
            contrast_factor,
        }
    }

    /// Applies the flip and then the rotation.
    pub fn apply_geometric(&self, patch: ArrayView3<'_, f32>) -> Array3<f32> {
        if self.flip {
            let flipped = flip_up_down(patch);
            rotate90(flipped.view(), self.rotation_steps)
        } else {
            rotate90(patch, self.rotation_steps)
        }
    }

    /// Transforms an input patch: flip, rotate, brighten, then contrast.
    ///
    /// Brightness and contrast saturate into the gray range.
    pub fn apply_input(
        &self,
        patch: ArrayView3<'_, f32>,
        gray_range: GrayRange,
    ) -> Result<Array3<f32>> {
        let geometric = self.apply_geometric(patch);
        let brightened = brighten(geometric.view(), self.brightness_delta, gray_range)?;
        adjust_contrast(brightened.view(), self.contrast_factor, gray_range)
    }

    /// Transforms a truth patch with the geometric part only, keeping it binary.
    pub fn apply_truth(&self, patch: ArrayView3<'_, f32>) -> Array3<f32> {
        self.apply_geometric(patch)
    }
}

impl Default for AugmentParams {
    fn default() -> Self {
        Self::identity()
    }
}
