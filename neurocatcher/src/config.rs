//! Batch sampling configuration format.

use crate::{
    common::*,
    footprint::ValidConvFootprint,
    pool::PatchSource,
    processor::AugmentConfig,
    sampler::{BatchSampler, BatchSamplerInit},
    volume::GrayRange,
};
use anyhow::Context as _;

/// The batch sampling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// The number of patch pairs per batch.
    pub batch_size: NonZeroUsize,
    /// Input and truth patch sizes.
    pub patch: PatchConfig,
    /// The pair of minimum and maximum gray levels.
    ///
    /// If unset, the range observed over the training pool is used.
    #[serde(default)]
    pub gray_range: Option<(R64, R64)>,
    /// Augmentation toggles, all enabled by default.
    #[serde(default)]
    pub augment: AugmentConfig,
}

/// Patch size options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PatchConfig {
    /// Set both sizes directly.
    Explicit {
        in_dims: NonZeroUsize,
        out_dims: NonZeroUsize,
    },
    /// Derive the truth size from the kernel sizes of a valid convolution stack.
    Footprint {
        in_dims: NonZeroUsize,
        kernel_sizes: Vec<usize>,
    },
}

impl SamplerConfig {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Resolves the gray range, falling back to the range observed in the pool.
    pub fn gray_range<P>(&self, pool: &P) -> Result<GrayRange>
    where
        P: PatchSource + ?Sized,
    {
        match self.gray_range {
            Some((min, max)) => GrayRange::new(min.raw() as f32, max.raw() as f32),
            None => pool.observed_gray_range(),
        }
    }

    /// Creates a sampler suitable for the pool.
    pub fn build<P>(&self, pool: &P) -> Result<BatchSampler>
    where
        P: PatchSource + ?Sized,
    {
        let batch_size = self.batch_size.get();
        let gray_range = self.gray_range(pool)?;
        let augment = self.augment;

        let init = match self.patch {
            PatchConfig::Explicit { in_dims, out_dims } => BatchSamplerInit {
                batch_size,
                in_dims: in_dims.get(),
                out_dims: out_dims.get(),
                gray_range,
                augment,
            },
            PatchConfig::Footprint {
                in_dims,
                ref kernel_sizes,
            } => {
                let footprint = ValidConvFootprint::new(kernel_sizes.iter().copied())?;
                BatchSamplerInit::from_footprint(
                    batch_size,
                    in_dims.get(),
                    &footprint,
                    gray_range,
                    augment,
                )?
            }
        };

        debug!(
            "sampler uses {}x{} input and {}x{} truth patches over gray range [{}, {}]",
            init.in_dims,
            init.in_dims,
            init.out_dims,
            init.out_dims,
            gray_range.min(),
            gray_range.max()
        );

        init.build()
    }
}
