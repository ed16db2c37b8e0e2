//! Default value functions for serde deserialization.

pub fn enabled() -> bool {
    true
}

pub fn config_path() -> &'static str {
    "configs/smriti.yaml"
}
