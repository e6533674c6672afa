//! Quarter-turn rotation of patches.

use crate::common::*;

/// Rotates every channel plane by `steps` quarter turns counterclockwise.
///
/// One step maps `output[i, j]` to `patch[j, width - 1 - i]`. Steps are
/// taken modulo 4, so a zero step yields a copy of the patch. The spatial
/// axes swap for odd steps.
pub fn rotate90(patch: ArrayView3<'_, f32>, steps: u8) -> Array3<f32> {
    let rotated = match steps % 4 {
        0 => patch,
        1 => patch.slice_move(s![.., ..;-1, ..]).permuted_axes([1, 0, 2]),
        2 => patch.slice_move(s![..;-1, ..;-1, ..]),
        3 => patch.slice_move(s![..;-1, .., ..]).permuted_axes([1, 0, 2]),
        _ => unreachable!(),
    };
    rotated.as_standard_layout().into_owned()
}
