//! Output configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Output settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputSection {
    /// Write the `.dat` tables
    #[serde(default = "defaults::enabled")]
    pub write_tables: bool,

    /// Directory for the tables (None = next to the dataset)
    #[serde(default)]
    pub directory: Option<String>,

    /// Optional JSON summary path
    #[serde(default)]
    pub json_summary: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            write_tables: true,
            directory: None,
            json_summary: None,
        }
    }
}
