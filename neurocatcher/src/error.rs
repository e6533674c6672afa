//! Error types raised by mask rasterization and batch sampling.

use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error returned by the batch preparation routines.
///
/// Every variant is a precondition violation. Calls either succeed with a
/// complete result or fail before producing any output.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error(
        "neuron {neuron} has coordinate ({row}, {col}) outside of the {height}x{width} volume"
    )]
    OutOfBoundsAnnotation {
        neuron: usize,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
    #[error("the training pool is empty")]
    EmptyPool,
    #[error("volume {index} has extent {height}x{width}, which cannot fit a {in_dims}x{in_dims} patch")]
    InsufficientExtent {
        index: usize,
        height: usize,
        width: usize,
        in_dims: usize,
    },
    #[error("invalid patch dimensions: {0}")]
    InvalidDims(String),
    #[error("batch size must be positive")]
    InvalidBatchSize,
    #[error("invalid gray range [{min}, {max}], min must be strictly less than max")]
    InvalidGrayRange { min: f32, max: f32 },
    #[error("volume {index} has {found} channels, but {expect} channels are expected")]
    ChannelMismatch {
        index: usize,
        expect: usize,
        found: usize,
    },
    #[error("truth mask {index} has shape {mask:?}, but its volume has shape {volume:?}")]
    MaskShapeMismatch {
        index: usize,
        volume: [usize; 3],
        mask: [usize; 3],
    },
    #[error("contrast factor must be finite and positive, but get {0}")]
    InvalidContrastFactor(f32),
    #[error("brightness delta must be finite, but get {0}")]
    InvalidBrightnessDelta(f32),
    #[error("rotation steps must be in 0..=3, but get {0}")]
    InvalidRotationSteps(u8),
    #[error("record refers to volume {volume_index} at {origin:?}, which is outside of the pool")]
    RecordOutOfBounds {
        volume_index: usize,
        origin: [usize; 2],
    },
    #[error("got {volumes} volumes but {annotations} annotation sets")]
    AnnotationCountMismatch { volumes: usize, annotations: usize },
}
