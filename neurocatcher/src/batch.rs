//! Training batch containers.

use crate::{common::*, processor::AugmentParams};

/// Where a batch slot was sampled from and how it was augmented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchRecord {
    /// Index of the source volume in the pool.
    pub volume_index: usize,
    /// The (row, col) of the top-left corner of the input window.
    pub origin: [usize; 2],
    pub params: AugmentParams,
}

/// A batch of spatially aligned input and truth patches.
///
/// Inputs are stacked as `(batch, in_dims, in_dims, channels)` and truths
/// as `(batch, out_dims, out_dims, 1)`.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Batch {
    #[getset(get = "pub")]
    inputs: Array4<f32>,
    #[getset(get = "pub")]
    truths: Array4<f32>,
    #[getset(get = "pub")]
    records: Vec<PatchRecord>,
}

impl Batch {
    pub(crate) fn new(
        inputs: Array4<f32>,
        truths: Array4<f32>,
        records: Vec<PatchRecord>,
    ) -> Self {
        debug_assert_eq!(inputs.len_of(Axis(0)), records.len());
        debug_assert_eq!(truths.len_of(Axis(0)), records.len());
        Self {
            inputs,
            truths,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the input and truth patch of a slot.
    pub fn pair(&self, index: usize) -> Option<(ArrayView3<'_, f32>, ArrayView3<'_, f32>)> {
        (index < self.len()).then(|| {
            (
                self.inputs.index_axis(Axis(0), index),
                self.truths.index_axis(Axis(0), index),
            )
        })
    }

    /// Splits the batch into (features, labels) arrays.
    pub fn into_arrays(self) -> (Array4<f32>, Array4<f32>) {
        (self.inputs, self.truths)
    }
}
