//! Evaluation inputs: scans with features and the neighbour table.
//!
//! | Type | Contents |
//! |------|----------|
//! | [`ScanStore`] | Per-scan world-frame features and ground-truth poses |
//! | [`NeighborTable`] | Ranked candidate scans for every query scan |
//! | [`Dataset`] | JSON file wrapper around a [`ScanStore`] |

mod format;
mod neighbors;
mod scan_store;

pub use format::{Dataset, ExtractionTime};
pub use neighbors::NeighborTable;
pub use scan_store::{ScanRecord, ScanStore};
