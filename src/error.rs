use thiserror::Error;

/// Failure to classify a single record.
///
/// A well-formed mode that matches nothing is *not* an error; it classifies
/// as `"unknown"`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("zone {zone_key}: mode must be a string, found {found}")]
    InvalidModeType {
        zone_key: String,
        found: &'static str,
    },
}
