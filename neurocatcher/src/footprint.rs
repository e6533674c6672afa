//! Spatial footprint of a stack of valid (unpadded) convolutions.

use crate::{common::*, processor::CenterCrop};

/// The cumulative shrinkage of a feed-forward stack of valid convolutions.
///
/// A `k`-wide kernel without edge padding removes `k - 1` pixels per axis.
/// The trailing 1x1 probability layer of the detection network shrinks
/// nothing and may be listed or omitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidConvFootprint {
    kernel_sizes: Vec<usize>,
}

impl ValidConvFootprint {
    pub fn new<I>(kernel_sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let kernel_sizes: Vec<_> = kernel_sizes.into_iter().collect();
        if let Some(layer) = kernel_sizes.iter().position(|&size| size == 0) {
            return Err(Error::InvalidDims(format!(
                "kernel size of layer {} must be positive",
                layer
            )));
        }
        Ok(Self { kernel_sizes })
    }

    pub fn kernel_sizes(&self) -> &[usize] {
        &self.kernel_sizes
    }

    /// Total pixels lost along each spatial axis.
    pub fn shrinkage(&self) -> usize {
        self.kernel_sizes.iter().map(|&size| size - 1).sum()
    }

    /// The predicted output extent for an `in_dims` input.
    pub fn output_dims(&self, in_dims: usize) -> Result<usize> {
        let shrinkage = self.shrinkage();
        if in_dims <= shrinkage {
            return Err(Error::InvalidDims(format!(
                "in_dims ({}) must exceed the convolution shrinkage ({})",
                in_dims, shrinkage
            )));
        }
        Ok(in_dims - shrinkage)
    }

    /// The input extent required to predict an `out_dims` output.
    pub fn input_dims(&self, out_dims: usize) -> Result<usize> {
        if out_dims == 0 {
            return Err(Error::InvalidDims("out_dims must be positive".into()));
        }
        Ok(out_dims + self.shrinkage())
    }

    /// The truth crop matching the output footprint of an `in_dims` input.
    pub fn crop(&self, in_dims: usize) -> Result<CenterCrop> {
        CenterCrop::new(in_dims, self.output_dims(in_dims)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_shrinkage() {
        let footprint = ValidConvFootprint::new([3, 5, 1]).unwrap();
        assert_eq!(footprint.shrinkage(), 6);
        assert_eq!(footprint.output_dims(20).unwrap(), 14);
        assert_eq!(footprint.input_dims(14).unwrap(), 20);

        let crop = footprint.crop(20).unwrap();
        assert_eq!((crop.start(), crop.end()), (3, 17));
    }

    #[test]
    fn footprint_empty_stack_is_identity() {
        let footprint = ValidConvFootprint::new(vec![]).unwrap();
        assert_eq!(footprint.shrinkage(), 0);
        assert_eq!(footprint.output_dims(9).unwrap(), 9);
    }

    #[test]
    fn footprint_rejects_invalid_sizes() {
        assert!(matches!(
            ValidConvFootprint::new([3, 0]),
            Err(Error::InvalidDims(_))
        ));

        let footprint = ValidConvFootprint::new([5, 5]).unwrap();
        assert!(footprint.output_dims(8).is_err());
        assert!(footprint.input_dims(0).is_err());
    }
}
