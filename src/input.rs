use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ProductionRecord;

/// Read production records from `path`, or from stdin when `path` is `-`.
pub fn read_records(path: &Path) -> Result<Vec<ProductionRecord>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading records from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading records from {}", path.display()))?
    };

    parse_records(&content)
}

/// Parse either a JSON array of records or JSON Lines (one record per line).
///
/// The format is picked from the first non-whitespace character.
pub fn parse_records(content: &str) -> Result<Vec<ProductionRecord>> {
    let trimmed = content.trim_start();

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("parsing JSON array of records");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("parsing record on line {}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_parse_json_array() {
        let records = parse_records(
            r#"
            [
              {"zone_key": "TR", "mode": "other renewables"},
              {"zone_key": "FR", "mode": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            records,
            vec![
                ProductionRecord::new("TR", "other renewables"),
                ProductionRecord::new("FR", Value::Null),
            ]
        );
    }

    #[test]
    fn test_parse_json_lines() {
        let records = parse_records(
            "{\"zone_key\": \"FR\", \"mode\": \"SOLAR\"}\n\n{\"zone_key\": \"BD\", \"mode\": 4}\n{\"zone_key\": \"NZ\"}\n",
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], ProductionRecord::new("FR", "SOLAR"));
        assert_eq!(records[1].mode, json!(4));
        assert_eq!(records[2].mode, Value::Null);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let err = parse_records("{\"zone_key\": \"FR\", \"mode\": \"solar\"}\n{\"mode\": \"wind\"}\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "parsing record on line 2");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_records("").unwrap().is_empty());
    }

    #[test]
    fn test_read_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        std::fs::write(&path, "{\"zone_key\": \"FR\", \"mode\": \"bioenergy\"}\n").unwrap();
        let records = read_records(&path).unwrap();
        assert_eq!(records, vec![ProductionRecord::new("FR", "bioenergy")]);
    }
}
