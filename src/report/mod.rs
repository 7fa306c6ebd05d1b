//! Report renderers for classification results.
//!
//! - [`terminal`]: colored summary box and tables; respects `--verbose` / `--quiet`.
//!
//! JSON output is a plain `serde_json` dump of the rows and lives in `main`.

pub mod terminal;
