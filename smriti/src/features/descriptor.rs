//! Feature descriptors.
//!
//! A [`Descriptor`] is a histogram tagged with its kind and carrying the
//! distance function it is compared with. The metric is chosen once, when the
//! descriptor is built, so comparing two descriptors never needs to inspect
//! concrete descriptor types.

use serde::{Deserialize, Serialize};

use super::distance::HistogramDistance;

/// Family of a descriptor histogram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    /// Polar grid of beta-distributed occupancy values.
    BetaGrid,
    /// Shape context histogram of neighbouring points.
    ShapeContext,
}

impl DescriptorKind {
    /// Short tag used in output file names.
    pub fn tag(self) -> &'static str {
        match self {
            DescriptorKind::BetaGrid => "beta",
            DescriptorKind::ShapeContext => "shape",
        }
    }
}

/// Descriptor as stored on disk, before a metric is attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDescriptor {
    /// Descriptor family.
    pub kind: DescriptorKind,
    /// Histogram bins.
    pub histogram: Vec<f64>,
}

impl RawDescriptor {
    /// Attach a distance function.
    pub fn attach(self, metric: HistogramDistance) -> Descriptor {
        Descriptor::new(self.kind, self.histogram, metric)
    }
}

/// A comparable descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor {
    kind: DescriptorKind,
    histogram: Vec<f64>,
    metric: HistogramDistance,
}

impl Descriptor {
    /// Create a descriptor compared with `metric`.
    pub fn new(kind: DescriptorKind, histogram: Vec<f64>, metric: HistogramDistance) -> Self {
        Self {
            kind,
            histogram,
            metric,
        }
    }

    /// Descriptor family.
    #[inline]
    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    /// Histogram bins.
    #[inline]
    pub fn histogram(&self) -> &[f64] {
        &self.histogram
    }

    /// Attached distance function.
    #[inline]
    pub fn metric(&self) -> HistogramDistance {
        self.metric
    }

    /// Distance to another descriptor using this descriptor's metric.
    ///
    /// Returns `None` when the descriptors are of different kinds or have a
    /// different number of bins.
    pub fn distance(&self, other: &Descriptor) -> Option<f64> {
        if self.kind != other.kind || self.histogram.len() != other.histogram.len() {
            return None;
        }
        Some(self.metric.compute(&self.histogram, &other.histogram))
    }

    /// Strip the metric for serialization.
    pub fn to_raw(&self) -> RawDescriptor {
        RawDescriptor {
            kind: self.kind,
            histogram: self.histogram.clone(),
        }
    }
}
