//! Vertical mirroring of patches.

use crate::common::*;

/// Reverses the row order of every channel plane.
///
/// Channel indices are left untouched.
pub fn flip_up_down(patch: ArrayView3<'_, f32>) -> Array3<f32> {
    patch.slice(s![..;-1, .., ..]).to_owned()
}
