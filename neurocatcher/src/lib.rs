//! Training batch preparation for convolutional neuron detection.
//!
//! Sparse neuron annotations are rasterized into dense truth masks, then
//! random spatially aligned patch pairs are drawn from the source volumes,
//! augmented, and stacked into batches whose truth patches match the output
//! footprint of a valid convolution network.

mod common;
pub mod batch;
pub mod config;
pub mod error;
pub mod footprint;
pub mod pool;
pub mod processor;
pub mod sampler;
pub mod tile;
pub mod truth;
pub mod volume;

pub use batch::*;
pub use config::*;
pub use error::*;
pub use footprint::*;
pub use pool::*;
pub use processor::*;
pub use sampler::*;
pub use tile::*;
pub use truth::*;
pub use volume::*;
