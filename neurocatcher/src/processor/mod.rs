//! Patch augmentation building blocks.

pub mod augment;
pub mod brighten;
pub mod contrast;
pub mod crop;
pub mod flip;
pub mod rotate;

pub use augment::*;
pub use brighten::*;
pub use contrast::*;
pub use crop::*;
pub use flip::*;
pub use rotate::*;
