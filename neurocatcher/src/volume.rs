//! Image volume, annotation and gray level types.

use crate::common::*;

/// A source image in (height, width, channels) layout.
pub type ImageVolume = Array3<f32>;

/// A binary (height, width, 1) mask aligned with an [ImageVolume].
pub type TruthMask = Array3<f32>;

/// The (row, col) pixel coordinates belonging to one neuron.
pub type Neuron = Vec<[usize; 2]>;

/// The neurons annotated on one [ImageVolume].
pub type AnnotationSet = Vec<Neuron>;

/// The closed interval of valid pixel intensities.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
pub struct GrayRange {
    #[getset(get_copy = "pub")]
    min: f32,
    #[getset(get_copy = "pub")]
    max: f32,
}

impl GrayRange {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()) {
            return Err(Error::InvalidGrayRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Computes the range spanned by the observed pixel values of the volumes.
    pub fn observed<'a, I>(volumes: I) -> Result<Self>
    where
        I: IntoIterator<Item = ArrayView3<'a, f32>>,
    {
        let (min, max) = volumes
            .into_iter()
            .flat_map(|volume| volume.into_iter().copied())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), value| {
                (min.min(value), max.max(value))
            });

        let range = Self::new(min, max);
        if range.is_err() {
            warn!("degenerate observed gray range [{}, {}]", min, max);
        }
        range
    }

    /// The width of the interval.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Saturates the value into the interval.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for GrayRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 255.0,
        }
    }
}
