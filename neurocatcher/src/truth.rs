//! Rasterization of sparse neuron annotations into dense truth masks.

use crate::{
    common::*,
    volume::{AnnotationSet, ImageVolume, Neuron, TruthMask},
};

/// Builds the binary truth mask of a `[height, width]` volume.
///
/// A mask pixel is 1 iff its coordinate appears in the coordinate list of
/// some neuron. Repeated coordinates are idempotent.
pub fn rasterize(shape: [usize; 2], annotations: &[Neuron]) -> Result<TruthMask> {
    let [height, width] = shape;
    let mut mask = TruthMask::zeros((height, width, 1));

    for (neuron, coordinates) in annotations.iter().enumerate() {
        for &[row, col] in coordinates {
            if row >= height || col >= width {
                return Err(Error::OutOfBoundsAnnotation {
                    neuron,
                    row,
                    col,
                    height,
                    width,
                });
            }
            mask[[row, col, 0]] = 1.0;
        }
    }

    Ok(mask)
}

/// Rasterizes one mask per volume.
pub fn rasterize_all(
    volumes: &[ImageVolume],
    annotations: &[AnnotationSet],
) -> Result<Vec<TruthMask>> {
    if volumes.len() != annotations.len() {
        return Err(Error::AnnotationCountMismatch {
            volumes: volumes.len(),
            annotations: annotations.len(),
        });
    }

    volumes
        .iter()
        .zip(annotations)
        .map(|(volume, annotation)| {
            let (height, width, _) = volume.dim();
            rasterize([height, width], annotation)
        })
        .collect()
}
