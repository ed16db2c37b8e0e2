//! Interest points and their descriptors.
//!
//! - [`InterestPoint`]: pose, scale and descriptor of one detected feature
//! - [`Descriptor`]: histogram with its distance function attached
//! - [`HistogramDistance`]: the supported histogram distances

mod descriptor;
mod distance;
mod interest_point;

pub use descriptor::{Descriptor, DescriptorKind, RawDescriptor};
pub use distance::HistogramDistance;
pub use interest_point::InterestPoint;
