//! Centered cropping of truth patches.

use crate::common::*;

/// Center crop that shrinks an `in_dims` square to `out_dims`.
///
/// The crop removes `floor(total / 2)` pixels from the leading edge and
/// `ceil(total / 2)` from the trailing edge of both spatial axes, where
/// `total = in_dims - out_dims`. This matches the footprint of a stack of
/// valid convolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CopyGetters)]
pub struct CenterCrop {
    #[getset(get_copy = "pub")]
    in_dims: usize,
    #[getset(get_copy = "pub")]
    start: usize,
    #[getset(get_copy = "pub")]
    end: usize,
}

impl CenterCrop {
    pub fn new(in_dims: usize, out_dims: usize) -> Result<Self> {
        if in_dims == 0 || out_dims == 0 {
            return Err(Error::InvalidDims(format!(
                "in_dims ({}) and out_dims ({}) must be positive",
                in_dims, out_dims
            )));
        }
        if out_dims > in_dims {
            return Err(Error::InvalidDims(format!(
                "out_dims ({}) must not exceed in_dims ({})",
                out_dims, in_dims
            )));
        }

        let total_crop = in_dims - out_dims;
        let start = total_crop / 2;
        let end = in_dims - (total_crop / 2 + total_crop % 2);
        debug_assert_eq!(end - start, out_dims);

        Ok(Self {
            in_dims,
            start,
            end,
        })
    }

    pub fn out_dims(&self) -> usize {
        self.end - self.start
    }

    /// The spatial range kept on each axis.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Crops the spatial axes of an `in_dims` square patch.
    pub fn apply<'a>(&self, patch: ArrayView3<'a, f32>) -> ArrayView3<'a, f32> {
        let Self { start, end, .. } = *self;
        debug_assert_eq!(patch.dim().0, self.in_dims);
        debug_assert_eq!(patch.dim().1, self.in_dims);
        patch.slice_move(s![start..end, start..end, ..])
    }
}
