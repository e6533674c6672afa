//! Pools of source volumes paired with their truth masks.

use crate::{
    common::*,
    truth,
    volume::{AnnotationSet, GrayRange, ImageVolume, TruthMask},
};

/// Random access to the (volume, truth mask) pairs that patches are drawn from.
pub trait PatchSource {
    fn num_volumes(&self) -> usize;

    /// The (height, width, channels) volume at `index`.
    fn volume(&self, index: usize) -> ArrayView3<'_, f32>;

    /// The (height, width, 1) truth mask at `index`.
    fn truth(&self, index: usize) -> ArrayView3<'_, f32>;

    fn is_empty(&self) -> bool {
        self.num_volumes() == 0
    }

    /// The gray range observed over all volumes.
    fn observed_gray_range(&self) -> Result<GrayRange> {
        GrayRange::observed((0..self.num_volumes()).map(|index| self.volume(index)))
    }
}

impl PatchSource for [(ImageVolume, TruthMask)] {
    fn num_volumes(&self) -> usize {
        self.len()
    }

    fn volume(&self, index: usize) -> ArrayView3<'_, f32> {
        self[index].0.view()
    }

    fn truth(&self, index: usize) -> ArrayView3<'_, f32> {
        self[index].1.view()
    }
}

impl<'a> PatchSource for [(ArrayView3<'a, f32>, ArrayView3<'a, f32>)] {
    fn num_volumes(&self) -> usize {
        self.len()
    }

    fn volume(&self, index: usize) -> ArrayView3<'_, f32> {
        self[index].0.view()
    }

    fn truth(&self, index: usize) -> ArrayView3<'_, f32> {
        self[index].1.view()
    }
}

impl<T> PatchSource for Vec<T>
where
    [T]: PatchSource,
{
    fn num_volumes(&self) -> usize {
        self.as_slice().num_volumes()
    }

    fn volume(&self, index: usize) -> ArrayView3<'_, f32> {
        self.as_slice().volume(index)
    }

    fn truth(&self, index: usize) -> ArrayView3<'_, f32> {
        self.as_slice().truth(index)
    }
}

/// Caller-owned volumes with their rasterized truth masks.
///
/// The volumes are borrowed. Masks are computed once on construction.
#[derive(Debug, Clone)]
pub struct TrainingPool<'a> {
    volumes: Vec<ArrayView3<'a, f32>>,
    masks: Vec<TruthMask>,
}

impl<'a> TrainingPool<'a> {
    /// Pairs volumes with precomputed masks.
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ArrayView3<'a, f32>, TruthMask)>,
    {
        let (volumes, masks) = pairs.into_iter().unzip();
        Self { volumes, masks }
    }

    /// Rasterizes one mask per volume from its annotations.
    pub fn from_annotations(
        volumes: &'a [ImageVolume],
        annotations: &[AnnotationSet],
    ) -> Result<Self> {
        let masks = truth::rasterize_all(volumes, annotations)?;
        debug!(
            "rasterized {} truth masks with {} neurons",
            masks.len(),
            annotations.iter().map(Vec::len).sum::<usize>()
        );

        Ok(Self {
            volumes: volumes.iter().map(|volume| volume.view()).collect(),
            masks,
        })
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn masks(&self) -> &[TruthMask] {
        &self.masks
    }
}

impl PatchSource for TrainingPool<'_> {
    fn num_volumes(&self) -> usize {
        self.volumes.len()
    }

    fn volume(&self, index: usize) -> ArrayView3<'_, f32> {
        self.volumes[index].view()
    }

    fn truth(&self, index: usize) -> ArrayView3<'_, f32> {
        self.masks[index].view()
    }
}
