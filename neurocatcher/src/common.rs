pub use crate::error::{Error, Result};
pub use getset::{CopyGetters, Getters};
pub use itertools::{iproduct, izip};
pub use ndarray::{s, Array3, Array4, ArrayView3, Axis};
pub use noisy_float::prelude::*;
pub use rand::prelude::*;
pub use serde::{Deserialize, Serialize};
pub use std::{
    num::NonZeroUsize,
    ops::Range,
    path::{Path, PathBuf},
};
pub use tracing::{debug, instrument, trace, warn};
