use rayon::prelude::*;
use serde_json::Value;

use crate::config::InvalidModePolicy;
use crate::error::ClassifyError;
use crate::mode::tables::ModeTables;
use crate::models::{json_type_name, Classification, MatchRule, ProductionRecord, UNKNOWN_MODE};

/// Maps `(zone_key, raw_mode)` pairs onto canonical production modes.
///
/// Rules, first match wins:
/// 1. zone-specific override, raw mode compared as given
/// 2. lower-cased raw mode is already canonical
/// 3. lower-cased raw mode is in the generic table
/// 4. `"unknown"`
#[derive(Debug, Clone, Default)]
pub struct ModeClassifier {
    tables: ModeTables,
    invalid_mode: InvalidModePolicy,
}

impl ModeClassifier {
    pub fn new(tables: ModeTables, invalid_mode: InvalidModePolicy) -> Self {
        Self {
            tables,
            invalid_mode,
        }
    }

    pub fn tables(&self) -> &ModeTables {
        &self.tables
    }

    /// Canonical mode for a string record.
    pub fn classify(&self, zone_key: &str, raw_mode: &str) -> String {
        self.classify_detailed(zone_key, raw_mode).mode
    }

    /// Same as [`classify`](Self::classify), also reporting which rule fired.
    pub fn classify_detailed(&self, zone_key: &str, raw_mode: &str) -> Classification {
        if let Some(mode) = self.tables.specific_for(zone_key, raw_mode) {
            return Classification {
                mode: mode.to_string(),
                rule: MatchRule::Specific,
            };
        }

        let folded = raw_mode.to_lowercase();

        if self.tables.canonical.contains(&folded) {
            return Classification {
                mode: folded,
                rule: MatchRule::Canonical,
            };
        }

        if let Some(mode) = self.tables.generic.get(&folded) {
            return Classification {
                mode: mode.clone(),
                rule: MatchRule::Generic,
            };
        }

        Classification {
            mode: UNKNOWN_MODE.to_string(),
            rule: MatchRule::Default,
        }
    }

    /// Classify a record whose mode may not be a string.
    ///
    /// Non-string modes are checked before any lookup and handled according
    /// to the configured [`InvalidModePolicy`].
    pub fn classify_record(
        &self,
        record: &ProductionRecord,
    ) -> Result<Classification, ClassifyError> {
        let raw_mode = match &record.mode {
            Value::String(s) => s,
            other => {
                let found = json_type_name(other);
                return match self.invalid_mode {
                    InvalidModePolicy::Reject => {
                        tracing::warn!(zone = %record.zone_key, found, "rejecting non-string mode");
                        Err(ClassifyError::InvalidModeType {
                            zone_key: record.zone_key.clone(),
                            found,
                        })
                    }
                    InvalidModePolicy::Unknown => {
                        tracing::debug!(zone = %record.zone_key, found, "non-string mode classified as unknown");
                        Ok(Classification {
                            mode: UNKNOWN_MODE.to_string(),
                            rule: MatchRule::NonStringMode,
                        })
                    }
                };
            }
        };

        let classification = self.classify_detailed(&record.zone_key, raw_mode);
        if classification.rule == MatchRule::Default {
            tracing::debug!(zone = %record.zone_key, mode = %raw_mode, "no mapping, using unknown");
        }
        Ok(classification)
    }

    /// Classify a batch in parallel. Output order matches input order.
    pub fn classify_all(
        &self,
        records: &[ProductionRecord],
    ) -> Vec<Result<Classification, ClassifyError>> {
        records
            .par_iter()
            .map(|record| self.classify_record(record))
            .collect()
    }
}
