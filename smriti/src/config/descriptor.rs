//! Descriptor configuration section.

use serde::{Deserialize, Serialize};

use crate::features::HistogramDistance;

/// Descriptor settings section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DescriptorSection {
    /// Histogram distance attached to every loaded descriptor
    #[serde(default)]
    pub distance: HistogramDistance,
}
