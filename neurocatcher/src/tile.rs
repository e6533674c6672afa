//! Exhaustive sliding-window tiling of a volume.

use crate::common::*;

/// Every window of a volume stacked into one array.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Tiles {
    /// Patches in `(n, in_dims, in_dims, channels)` layout.
    #[getset(get = "pub")]
    patches: Array4<f32>,
    /// The (row, col) top-left corner of each patch.
    #[getset(get = "pub")]
    origins: Vec<[usize; 2]>,
}

impl Tiles {
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Cuts the volume into `in_dims` square windows placed every `stride` pixels.
///
/// Windows are ordered row-major by origin. Trailing pixels that do not fit
/// a whole stride are not covered.
pub fn tile_volume(volume: ArrayView3<'_, f32>, in_dims: usize, stride: usize) -> Result<Tiles> {
    if in_dims == 0 || stride == 0 {
        return Err(Error::InvalidDims(format!(
            "in_dims ({}) and stride ({}) must be positive",
            in_dims, stride
        )));
    }

    let (height, width, channels) = volume.dim();
    if height < in_dims || width < in_dims {
        return Err(Error::InsufficientExtent {
            index: 0,
            height,
            width,
            in_dims,
        });
    }

    let origins: Vec<_> = iproduct!(
        (0..=(height - in_dims)).step_by(stride),
        (0..=(width - in_dims)).step_by(stride)
    )
    .map(|(row, col)| [row, col])
    .collect();

    let mut patches = Array4::zeros((origins.len(), in_dims, in_dims, channels));
    patches
        .outer_iter_mut()
        .zip(&origins)
        .for_each(|(mut slot, &[row, col])| {
            slot.assign(&volume.slice(s![row..row + in_dims, col..col + in_dims, ..]));
        });

    Ok(Tiles { patches, origins })
}
