//! Uniform sampling grid over the network bounding box

pub mod sampling_grid;

pub use sampling_grid::{linspace, SamplingGrid};
