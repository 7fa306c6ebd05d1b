use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label returned when no table matches a well-formed mode.
pub const UNKNOWN_MODE: &str = "unknown";

/// One generation record as supplied by the ingestion side.
///
/// Only `zone_key` and `mode` are read; any other fields are ignored. `mode`
/// stays an untyped JSON value so non-string inputs reach the classifier and
/// can be rejected explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub zone_key: String,
    #[serde(default)]
    pub mode: Value,
}

impl ProductionRecord {
    pub fn new(zone_key: impl Into<String>, mode: impl Into<Value>) -> Self {
        Self {
            zone_key: zone_key.into(),
            mode: mode.into(),
        }
    }
}

/// Which step of the decision policy produced a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchRule {
    /// Zone-specific override.
    Specific,
    /// Mode was already canonical (after case folding).
    Canonical,
    /// Generic keyword table.
    Generic,
    /// Nothing matched.
    Default,
    /// Mode was not a string and the policy maps it to `"unknown"`.
    NonStringMode,
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchRule::Specific => write!(f, "specific"),
            MatchRule::Canonical => write!(f, "canonical"),
            MatchRule::Generic => write!(f, "generic"),
            MatchRule::Default => write!(f, "default"),
            MatchRule::NonStringMode => write!(f, "non-string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub mode: String,
    pub rule: MatchRule,
}

/// Output row: the input record plus its classification outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub zone_key: String,
    pub raw_mode: Value,
    pub production_mode: Option<String>,
    pub rule: Option<MatchRule>,
    pub error: Option<String>,
}

impl ClassifiedRecord {
    pub fn from_outcome(
        record: &ProductionRecord,
        outcome: Result<Classification, crate::error::ClassifyError>,
    ) -> Self {
        let (production_mode, rule, error) = match outcome {
            Ok(c) => (Some(c.mode), Some(c.rule), None),
            Err(e) => (None, None, Some(e.to_string())),
        };
        Self {
            zone_key: record.zone_key.clone(),
            raw_mode: record.mode.clone(),
            production_mode,
            rule,
            error,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }

    /// Classified, but with the `"unknown"` label, whichever rule produced it.
    pub fn is_unknown(&self) -> bool {
        self.production_mode.as_deref() == Some(UNKNOWN_MODE)
    }
}

/// Short name of a JSON value's type, used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
