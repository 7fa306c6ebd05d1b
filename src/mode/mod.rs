//! Production-mode normalization.
//!
//! - [`tables`]: the canonical set, zone-specific overrides and generic
//!   keyword mapping, plus the built-in Ember data.
//! - [`classifier`]: applies the tables in priority order to one record or
//!   a batch.

pub mod classifier;
pub mod tables;
