//! Random sampling of augmented training batches.

use crate::{
    batch::{Batch, PatchRecord},
    common::*,
    footprint::ValidConvFootprint,
    pool::PatchSource,
    processor::{AugmentConfig, AugmentParams, CenterCrop},
    volume::GrayRange,
};

/// Batch sampler initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSamplerInit {
    pub batch_size: usize,
    /// Side length of the square input patches.
    pub in_dims: usize,
    /// Side length of the square truth patches.
    pub out_dims: usize,
    pub gray_range: GrayRange,
    pub augment: AugmentConfig,
}

impl BatchSamplerInit {
    /// Derives `out_dims` from the footprint of a valid convolution stack.
    pub fn from_footprint(
        batch_size: usize,
        in_dims: usize,
        footprint: &ValidConvFootprint,
        gray_range: GrayRange,
        augment: AugmentConfig,
    ) -> Result<Self> {
        Ok(Self {
            batch_size,
            in_dims,
            out_dims: footprint.output_dims(in_dims)?,
            gray_range,
            augment,
        })
    }

    pub fn build(self) -> Result<BatchSampler> {
        let Self {
            batch_size,
            in_dims,
            out_dims,
            gray_range,
            augment,
        } = self;

        if batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }
        let crop = CenterCrop::new(in_dims, out_dims)?;

        Ok(BatchSampler {
            batch_size,
            crop,
            gray_range,
            augment,
        })
    }
}

/// Draws batches of randomly located and augmented patch pairs.
///
/// The sampler holds no random state. Each call draws from the random source
/// supplied by the caller, so seeding that source makes batches
/// reproducible.
#[derive(Debug, Clone, CopyGetters)]
pub struct BatchSampler {
    #[getset(get_copy = "pub")]
    batch_size: usize,
    #[getset(get_copy = "pub")]
    crop: CenterCrop,
    #[getset(get_copy = "pub")]
    gray_range: GrayRange,
    #[getset(get_copy = "pub")]
    augment: AugmentConfig,
}

impl BatchSampler {
    pub fn in_dims(&self) -> usize {
        self.crop.in_dims()
    }

    pub fn out_dims(&self) -> usize {
        self.crop.out_dims()
    }

    /// Checks that every volume of the pool can be sampled and returns the
    /// shared channel count.
    pub fn validate_pool<P>(&self, pool: &P) -> Result<usize>
    where
        P: PatchSource + ?Sized,
    {
        if pool.is_empty() {
            return Err(Error::EmptyPool);
        }
        let in_dims = self.in_dims();

        let mut expect_channels = None;
        for index in 0..pool.num_volumes() {
            let (height, width, channels) = pool.volume(index).dim();
            let (mask_height, mask_width, mask_channels) = pool.truth(index).dim();

            if (mask_height, mask_width, mask_channels) != (height, width, 1) {
                return Err(Error::MaskShapeMismatch {
                    index,
                    volume: [height, width, channels],
                    mask: [mask_height, mask_width, mask_channels],
                });
            }

            match expect_channels {
                Some(expect) if expect != channels => {
                    return Err(Error::ChannelMismatch {
                        index,
                        expect,
                        found: channels,
                    });
                }
                Some(_) => {}
                None => expect_channels = Some(channels),
            }

            if height < in_dims || width < in_dims {
                return Err(Error::InsufficientExtent {
                    index,
                    height,
                    width,
                    in_dims,
                });
            }
        }

        Ok(expect_channels.unwrap_or(0))
    }

    /// Samples one batch from the pool.
    ///
    /// Fails before drawing anything if the pool violates a precondition.
    #[instrument(skip_all, fields(batch_size = self.batch_size, in_dims = self.in_dims()))]
    pub fn sample<P, R>(&self, pool: &P, rng: &mut R) -> Result<Batch>
    where
        P: PatchSource + ?Sized,
        R: Rng + ?Sized,
    {
        let channels = self.validate_pool(pool)?;
        let in_dims = self.in_dims();
        let out_dims = self.out_dims();

        let mut inputs = Array4::zeros((self.batch_size, in_dims, in_dims, channels));
        let mut truths = Array4::zeros((self.batch_size, out_dims, out_dims, 1));

        let records = izip!(inputs.outer_iter_mut(), truths.outer_iter_mut())
            .enumerate()
            .map(|(slot, (mut input_slot, mut truth_slot))| {
                let record = self.draw_record(pool, rng);
                let (input, truth) = self.render(pool, &record)?;
                input_slot.assign(&input);
                truth_slot.assign(&self.crop.apply(truth.view()));
                trace!(
                    "slot {} drawn from volume {} at {:?}",
                    slot,
                    record.volume_index,
                    record.origin
                );
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "sampled {} patch pairs from {} volumes",
            records.len(),
            pool.num_volumes()
        );

        Ok(Batch::new(inputs, truths, records))
    }

    /// Draws the volume, window origin and augmentation of one slot.
    ///
    /// The pool must have passed [BatchSampler::validate_pool].
    pub(crate) fn draw_record<P, R>(&self, pool: &P, rng: &mut R) -> PatchRecord
    where
        P: PatchSource + ?Sized,
        R: Rng + ?Sized,
    {
        let in_dims = self.in_dims();
        let volume_index = rng.gen_range(0..pool.num_volumes());
        let (height, width, _) = pool.volume(volume_index).dim();
        let row = rng.gen_range(0..=(height - in_dims));
        let col = rng.gen_range(0..=(width - in_dims));
        let params = AugmentParams::draw(&self.augment, self.gray_range, rng);

        PatchRecord {
            volume_index,
            origin: [row, col],
            params,
        }
    }

    /// Extracts and augments the patch pair described by a record.
    ///
    /// The returned truth patch keeps the full `in_dims` extent and is not
    /// cropped yet. Fails if the record does not fit in the pool.
    pub fn render<P>(&self, pool: &P, record: &PatchRecord) -> Result<(Array3<f32>, Array3<f32>)>
    where
        P: PatchSource + ?Sized,
    {
        let PatchRecord {
            volume_index,
            origin: [row, col],
            ref params,
        } = *record;
        let out_of_bounds = || Error::RecordOutOfBounds {
            volume_index,
            origin: [row, col],
        };
        if volume_index >= pool.num_volumes() {
            return Err(out_of_bounds());
        }

        let in_dims = self.in_dims();
        let volume = pool.volume(volume_index);
        let truth = pool.truth(volume_index);
        let (height, width, _) = volume.dim();
        let (truth_height, truth_width, _) = truth.dim();
        let fits = |extent: usize, start: usize| {
            start.checked_add(in_dims).map_or(false, |end| end <= extent)
        };
        if !(fits(height.min(truth_height), row) && fits(width.min(truth_width), col)) {
            return Err(out_of_bounds());
        }

        let rows = row..row + in_dims;
        let cols = col..col + in_dims;
        let input = params.apply_input(
            volume.slice_move(s![rows.clone(), cols.clone(), ..]),
            self.gray_range,
        )?;
        let truth = params.apply_truth(truth.slice_move(s![rows, cols, ..]));

        Ok((input, truth))
    }
}

/// Samples one batch of `batch_size` augmented patch pairs from the pool.
///
/// Input patches are `in_dims` squares, truth patches are center-cropped to
/// `out_dims` squares.
pub fn sample_batch<P, R>(
    pool: &P,
    batch_size: usize,
    in_dims: usize,
    out_dims: usize,
    gray_range: GrayRange,
    augment: AugmentConfig,
    rng: &mut R,
) -> Result<Batch>
where
    P: PatchSource + ?Sized,
    R: Rng + ?Sized,
{
    BatchSamplerInit {
        batch_size,
        in_dims,
        out_dims,
        gray_range,
        augment,
    }
    .build()?
    .sample(pool, rng)
}
